//! Application layer - Use cases and orchestration

pub mod check_templates;
pub mod extract_journeys;
pub mod init;

pub use check_templates::{CheckTemplatesService, TemplateCheck};
pub use extract_journeys::{JourneyOptions, JourneyReport, JourneyService};
pub use init::InitService;
