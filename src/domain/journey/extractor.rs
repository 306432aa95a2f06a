//! Journey extraction from book notes and daily notes
//!
//! # Examples
//!
//! ```
//! use readjour::domain::journey::{
//!     DayLogExtractor, JourneyExtractor, MarkdownNote, NoteId, NoteResolver,
//! };
//! use readjour::domain::pattern::{LogFamily, PatternSet, TemplateAction, TemplateKind};
//! use readjour::domain::DateFormat;
//!
//! struct Books;
//!
//! impl NoteResolver for Books {
//!     fn resolve(&self, target: &str, _source: &NoteId) -> Option<NoteId> {
//!         Some(NoteId::new(format!("Books/{}.md", target)))
//!     }
//! }
//!
//! let patterns = PatternSet::builder(DateFormat::default())
//!     .register(TemplateKind::new(LogFamily::DayLog, TemplateAction::Started), "Started {book}")
//!     .build()
//!     .patterns;
//! let extractor = DayLogExtractor::new(patterns, "Reading", DateFormat::default(), None);
//! let note = MarkdownNote::new(NoteId::new("2024-10-12.md"), "## Reading\n\n- Started [[Dune]]\n");
//!
//! let result = extractor.extract(&note, &Books);
//! assert_eq!(result.events.len(), 1);
//! assert_eq!(result.events[0].book.as_str(), "Books/Dune.md");
//! ```

use super::{ExtractionResult, JourneyEvent, NoteId};
use crate::domain::pattern::PatternSet;
use crate::domain::{resolve_date, DateFormat};
use std::borrow::Cow;

/// Source of a note's lines
pub trait NoteContent {
    /// Identity of the note; its vault-relative path
    fn id(&self) -> &NoteId;

    /// Lines under `heading`, in document order; each call starts over
    fn lines_under_heading<'a>(&'a self, heading: &str) -> Box<dyn Iterator<Item = &'a str> + 'a>;
}

/// Resolves a textual book reference to a note
pub trait NoteResolver {
    /// `None` when no note matches `target`
    fn resolve(&self, target: &str, source: &NoteId) -> Option<NoteId>;
}

/// Turns one note into journey events
pub trait JourneyExtractor {
    fn extract(&self, note: &dyn NoteContent, resolver: &dyn NoteResolver) -> ExtractionResult;
}

/// Target of a book reference: `[[Target|alias]]`, `[[Target#Heading]]`,
/// `[text](Target.md)` or plain text
///
/// Markdown link targets are percent-decoded, so `Book%20A.md` becomes
/// `Book A.md`.
pub fn link_target(reference: &str) -> Cow<'_, str> {
    let reference = reference.trim();
    let reference = reference.strip_prefix('!').unwrap_or(reference);

    if let Some(inner) = reference
        .strip_prefix("[[")
        .and_then(|r| r.strip_suffix("]]"))
    {
        return Cow::Borrowed(inner.split(['|', '#']).next().unwrap_or_default().trim());
    }

    if let Some((_, target)) = reference
        .strip_prefix('[')
        .and_then(|r| r.split_once("]("))
    {
        if let Some(target) = target.strip_suffix(')') {
            let target = target.split('#').next().unwrap_or_default().trim();
            return urlencoding::decode(target).unwrap_or(Cow::Borrowed(target));
        }
    }

    Cow::Borrowed(reference)
}

/// Extracts events logged inside a book's own note
///
/// Every line carries its own date; the book is the note itself.
#[derive(Debug, Clone)]
pub struct BookLogExtractor {
    patterns: PatternSet,
    heading: String,
}

impl BookLogExtractor {
    pub fn new(patterns: PatternSet, heading: impl Into<String>) -> Self {
        BookLogExtractor {
            patterns,
            heading: heading.into(),
        }
    }

    pub fn extract_book(&self, note: &dyn NoteContent) -> ExtractionResult {
        let mut result = ExtractionResult::new();

        for line in note.lines_under_heading(&self.heading) {
            let Some(found) = self.patterns.matches(line) else {
                tracing::trace!(note = %note.id(), line, "No template matches");
                continue;
            };
            let Some(date) = found.date else {
                continue;
            };
            result.push(JourneyEvent::new(found.action, date, note.id().clone()));
        }

        result
    }
}

impl JourneyExtractor for BookLogExtractor {
    fn extract(&self, note: &dyn NoteContent, _resolver: &dyn NoteResolver) -> ExtractionResult {
        self.extract_book(note)
    }
}

/// Extracts events logged in daily notes
///
/// The date comes from the note's path; each line names the book it is about.
#[derive(Debug, Clone)]
pub struct DayLogExtractor {
    patterns: PatternSet,
    heading: String,
    date_format: DateFormat,
    folder: Option<String>,
}

impl DayLogExtractor {
    pub fn new(
        patterns: PatternSet,
        heading: impl Into<String>,
        date_format: DateFormat,
        folder: Option<String>,
    ) -> Self {
        DayLogExtractor {
            patterns,
            heading: heading.into(),
            date_format,
            folder,
        }
    }

    /// Date of a daily note, `None` for any other note
    pub fn note_date(&self, note: &NoteId) -> Option<chrono::NaiveDate> {
        resolve_date(note.as_str(), &self.date_format, self.folder.as_deref())
    }
}

impl JourneyExtractor for DayLogExtractor {
    fn extract(&self, note: &dyn NoteContent, resolver: &dyn NoteResolver) -> ExtractionResult {
        let mut result = ExtractionResult::new();

        let Some(date) = self.note_date(note.id()) else {
            return result;
        };

        for line in note.lines_under_heading(&self.heading) {
            let Some(found) = self.patterns.matches(line) else {
                tracing::trace!(note = %note.id(), line, "No template matches");
                continue;
            };
            let Some(reference) = found.book.as_deref() else {
                continue;
            };
            let target = link_target(reference);
            match resolver.resolve(&target, note.id()) {
                Some(book) => result.push(JourneyEvent::new(found.action, date, book)),
                None => {
                    tracing::debug!(
                        note = %note.id(),
                        reference = %target,
                        "Skipping line with unresolved book reference"
                    );
                }
            }
        }

        result
    }
}
