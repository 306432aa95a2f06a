//! Template patterns

pub mod compiler;
pub mod set;

pub use compiler::{CompiledPattern, LogFamily, MatchResult, Placeholder, TemplateAction, TemplateKind};
pub use set::{PatternSet, PatternSetBuild, PatternSetBuilder, TemplateFailure};
