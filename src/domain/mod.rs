//! Domain layer - Business logic and domain models

pub mod date_format;
pub mod journey;
pub mod path_date;
pub mod pattern;
pub mod position;

pub use date_format::DateFormat;
pub use journey::{ExtractionResult, JourneyAction, JourneyEvent, NoteId};
pub use path_date::resolve_date;
pub use position::{Position, PositionKind};
