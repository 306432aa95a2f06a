//! Ordered pattern collections

use super::{CompiledPattern, MatchResult, TemplateKind};
use crate::domain::DateFormat;
use crate::error::ReadjourError;

/// Compiled patterns tried in registration order
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    patterns: Vec<CompiledPattern>,
}

impl PatternSet {
    pub fn new(patterns: Vec<CompiledPattern>) -> Self {
        PatternSet { patterns }
    }

    /// Start building a set whose `{date}` captures use `date_format`
    pub fn builder(date_format: DateFormat) -> PatternSetBuilder {
        PatternSetBuilder {
            date_format,
            patterns: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// First pattern that matches `text` wins
    pub fn matches(&self, text: &str) -> Option<MatchResult> {
        self.patterns.iter().find_map(|p| p.matches(text))
    }

    pub fn patterns(&self) -> &[CompiledPattern] {
        &self.patterns
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// A template that failed to compile
#[derive(Debug)]
pub struct TemplateFailure {
    pub kind: TemplateKind,
    pub error: ReadjourError,
}

/// Compiles templates one by one, keeping the ones that compile
#[derive(Debug)]
pub struct PatternSetBuilder {
    date_format: DateFormat,
    patterns: Vec<CompiledPattern>,
    errors: Vec<TemplateFailure>,
}

impl PatternSetBuilder {
    /// Compile and append `template`; a failure is recorded, not returned
    pub fn register(mut self, kind: TemplateKind, template: &str) -> Self {
        match CompiledPattern::compile(template, kind) {
            Ok(pattern) => self
                .patterns
                .push(pattern.with_date_format(self.date_format.clone())),
            Err(error) => {
                tracing::warn!(%kind, template, %error, "Skipping template that failed to compile");
                self.errors.push(TemplateFailure { kind, error });
            }
        }
        self
    }

    /// Register `template` only when one is configured
    pub fn register_optional(self, kind: TemplateKind, template: Option<&str>) -> Self {
        match template.map(str::trim) {
            Some(t) if !t.is_empty() => self.register(kind, t),
            _ => self,
        }
    }

    pub fn build(self) -> PatternSetBuild {
        PatternSetBuild {
            patterns: PatternSet::new(self.patterns),
            errors: self.errors,
        }
    }
}

/// Outcome of building a pattern set: usable patterns plus any failures
#[derive(Debug)]
pub struct PatternSetBuild {
    pub patterns: PatternSet,
    pub errors: Vec<TemplateFailure>,
}

impl PatternSetBuild {
    pub fn has_compile_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}
