//! Reading journeys extracted from notes

pub mod event;
pub mod extractor;
pub mod section;

pub use event::{ExtractionResult, JourneyAction, JourneyEvent, NoteId};
pub use extractor::{
    link_target, BookLogExtractor, DayLogExtractor, JourneyExtractor, NoteContent, NoteResolver,
};
pub use section::{MarkdownNote, SectionLines};
