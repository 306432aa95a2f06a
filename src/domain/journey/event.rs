//! Journey events and extraction results

use crate::domain::Position;
use chrono::NaiveDate;
use std::collections::BTreeSet;
use std::fmt;

/// Identity of a note: its vault-relative path with `/` separators
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NoteId(String);

impl NoteId {
    pub fn new(path: impl Into<String>) -> Self {
        NoteId(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File name without folders or `.md` extension
    pub fn title(&self) -> &str {
        let leaf = self.0.rsplit('/').next().unwrap_or(&self.0);
        leaf.strip_suffix(".md").unwrap_or(leaf)
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What happened to a book
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JourneyAction {
    Started,
    Finished,
    Abandoned,
    Progress {
        start: Option<Position>,
        end: Position,
    },
}

impl JourneyAction {
    pub fn name(&self) -> &'static str {
        match self {
            JourneyAction::Started => "started",
            JourneyAction::Finished => "finished",
            JourneyAction::Abandoned => "abandoned",
            JourneyAction::Progress { .. } => "progress",
        }
    }
}

impl fmt::Display for JourneyAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JourneyAction::Progress {
                start: Some(start),
                end,
            } => write!(f, "progress {}-{}", start, end),
            JourneyAction::Progress { start: None, end } => write!(f, "progress {}", end),
            other => f.write_str(other.name()),
        }
    }
}

/// One dated step of a reading journey
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JourneyEvent {
    pub action: JourneyAction,
    pub date: NaiveDate,
    pub book: NoteId,
}

impl JourneyEvent {
    pub fn new(action: JourneyAction, date: NaiveDate, book: NoteId) -> Self {
        JourneyEvent { action, date, book }
    }
}

/// Everything extracted from one note
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionResult {
    /// Book notes the events point to
    pub referenced_notes: BTreeSet<NoteId>,
    /// Events in source line order
    pub events: Vec<JourneyEvent>,
}

impl ExtractionResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an event and the book note it refers to
    pub fn push(&mut self, event: JourneyEvent) {
        self.referenced_notes.insert(event.book.clone());
        self.events.push(event);
    }

    /// Append another note's result, keeping event order
    pub fn merge(&mut self, other: ExtractionResult) {
        self.referenced_notes.extend(other.referenced_notes);
        self.events.extend(other.events);
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
