//! Journey extraction use case
//!
//! Scans every note of the vault with both extractors and returns the
//! events in chronological order.

use crate::domain::journey::{
    link_target, BookLogExtractor, DayLogExtractor, JourneyExtractor, NoteResolver,
};
use crate::domain::pattern::{LogFamily, TemplateFailure};
use crate::domain::{ExtractionResult, JourneyEvent, NoteId};
use crate::error::{ReadjourError, Result};
use crate::infrastructure::repository::JournalRepository;
use crate::infrastructure::{FileSystemRepository, VaultIndex};
use chrono::NaiveDate;
use std::collections::BTreeSet;

/// Filters for journey extraction
#[derive(Debug, Clone, Default)]
pub struct JourneyOptions {
    /// Only events of this book (title, path or wikilink)
    pub book: Option<String>,

    /// Start date filter (inclusive)
    pub from: Option<NaiveDate>,

    /// End date filter (inclusive)
    pub to: Option<NaiveDate>,
}

/// Events found in the vault plus templates that could not be used
#[derive(Debug)]
pub struct JourneyReport {
    /// Events sorted by date; same-day events keep note and line order
    pub events: Vec<JourneyEvent>,
    pub referenced_notes: BTreeSet<NoteId>,
    pub template_errors: Vec<TemplateFailure>,
}

impl JourneyReport {
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Service for extracting reading journeys
pub struct JourneyService {
    repository: FileSystemRepository,
}

impl JourneyService {
    /// Create new journey service
    pub fn new(repository: FileSystemRepository) -> Self {
        JourneyService { repository }
    }

    /// Execute the extraction
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config cannot be loaded or has an invalid date format
    /// - `options.book` does not name a note of the vault
    /// - A note cannot be read
    pub fn execute(&self, options: JourneyOptions) -> Result<JourneyReport> {
        let config = self.repository.load_config()?;
        let daily_format = config.daily_date_format()?;
        let books_format = config.books_date_format()?;

        let daily = config
            .daily
            .templates
            .build(LogFamily::DayLog, daily_format.clone());
        let books = config.books.templates.build(LogFamily::BookLog, books_format);

        let mut template_errors = daily.errors;
        template_errors.extend(books.errors);

        let day_extractor = DayLogExtractor::new(
            daily.patterns,
            config.daily.heading.clone(),
            daily_format,
            config.daily.folder.clone(),
        );
        let book_extractor = BookLogExtractor::new(books.patterns, config.books.heading.clone());

        let notes = self.repository.list_notes();
        let index = VaultIndex::new(notes.clone());

        let book_filter = match options.book.as_deref() {
            Some(reference) => Some(
                index
                    .resolve(&link_target(reference), &NoteId::new(""))
                    .ok_or_else(|| {
                        ReadjourError::NoJourneys(format!("no note matches book '{}'", reference))
                    })?,
            ),
            None => None,
        };

        let extractors: [&dyn JourneyExtractor; 2] = [&day_extractor, &book_extractor];
        let mut found = ExtractionResult::new();
        for id in &notes {
            let note = self.repository.load_note(id)?;
            if note.content().is_empty() {
                continue;
            }
            for extractor in extractors {
                found.merge(extractor.extract(&note, &index));
            }
        }
        tracing::debug!(
            notes = notes.len(),
            events = found.events.len(),
            "Scanned vault"
        );

        let mut result = ExtractionResult::new();
        for event in found.events {
            if book_filter.as_ref().is_some_and(|book| *book != event.book) {
                continue;
            }
            if options.from.is_some_and(|from| event.date < from) {
                continue;
            }
            if options.to.is_some_and(|to| event.date > to) {
                continue;
            }
            result.push(event);
        }
        result.events.sort_by_key(|event| event.date);

        Ok(JourneyReport {
            events: result.events,
            referenced_notes: result.referenced_notes,
            template_errors,
        })
    }
}
