//! Template compilation
//!
//! A template is literal text with `{name}` placeholders. Which names count as
//! placeholders depends on the [`TemplateKind`]; any other `{...}` is literal.
//! `{*}` matches any text (possibly empty) and may be repeated.
//!
//! # Examples
//!
//! ```
//! use readjour::domain::pattern::{CompiledPattern, TemplateKind};
//! use readjour::domain::{JourneyAction, Position};
//!
//! let pattern = CompiledPattern::compile("Read {book}: {endPage}", TemplateKind::day_progress()).unwrap();
//! let found = pattern.matches("Read [[Dune]]: 42").unwrap();
//! assert_eq!(found.book.as_deref(), Some("[[Dune]]"));
//! assert_eq!(
//!     found.action,
//!     JourneyAction::Progress { start: None, end: Position::Page(42) }
//! );
//! ```

use crate::domain::journey::JourneyAction;
use crate::domain::{DateFormat, Position, PositionKind};
use crate::error::{ReadjourError, Result};
use chrono::NaiveDate;
use regex::{Captures, Regex};
use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

/// Regex for placeholder tokens: {name} or {*}
fn placeholder_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"\{([A-Za-z]+|\*)\}").unwrap())
}

/// Placeholders understood by the compiler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placeholder {
    Date,
    Book,
    StartPage,
    EndPage,
    End,
    Wildcard,
}

impl Placeholder {
    pub fn name(&self) -> &'static str {
        match self {
            Placeholder::Date => "date",
            Placeholder::Book => "book",
            Placeholder::StartPage => "startPage",
            Placeholder::EndPage => "endPage",
            Placeholder::End => "end",
            Placeholder::Wildcard => "*",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "date" => Some(Placeholder::Date),
            "book" => Some(Placeholder::Book),
            "startPage" => Some(Placeholder::StartPage),
            "endPage" => Some(Placeholder::EndPage),
            "end" => Some(Placeholder::End),
            "*" => Some(Placeholder::Wildcard),
            _ => None,
        }
    }

    /// Regex fragment for this placeholder
    fn segment(&self) -> String {
        match self {
            Placeholder::Date | Placeholder::Book => format!("(?P<{}>.+?)", self.name()),
            Placeholder::StartPage | Placeholder::EndPage => format!(r"(?P<{}>\d+)", self.name()),
            Placeholder::End => format!(r"(?P<{}>\d+%?)", self.name()),
            Placeholder::Wildcard => ".*?".to_string(),
        }
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.name())
    }
}

/// The two kinds of reading logs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogFamily {
    /// Lines inside a book's own note, each carrying an inline date
    BookLog,
    /// Lines inside a daily note, each naming a book; the date is the note's
    DayLog,
}

/// What a template records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateAction {
    Started,
    Finished,
    Abandoned,
    /// Progress in pages
    Progress,
    /// Progress as a percentage
    RelativeProgress,
}

impl TemplateAction {
    pub const ALL: [TemplateAction; 5] = [
        TemplateAction::Started,
        TemplateAction::Finished,
        TemplateAction::Abandoned,
        TemplateAction::Progress,
        TemplateAction::RelativeProgress,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            TemplateAction::Started => "started",
            TemplateAction::Finished => "finished",
            TemplateAction::Abandoned => "abandoned",
            TemplateAction::Progress => "progress",
            TemplateAction::RelativeProgress => "relative_progress",
        }
    }
}

/// Family and action of a template; decides its placeholder vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TemplateKind {
    pub family: LogFamily,
    pub action: TemplateAction,
}

impl TemplateKind {
    pub fn new(family: LogFamily, action: TemplateAction) -> Self {
        TemplateKind { family, action }
    }

    pub fn book_progress() -> Self {
        Self::new(LogFamily::BookLog, TemplateAction::Progress)
    }

    pub fn day_progress() -> Self {
        Self::new(LogFamily::DayLog, TemplateAction::Progress)
    }

    /// Placeholders that must appear exactly once
    pub fn required(&self) -> Vec<Placeholder> {
        let mut required = vec![match self.family {
            LogFamily::BookLog => Placeholder::Date,
            LogFamily::DayLog => Placeholder::Book,
        }];
        match self.action {
            TemplateAction::Progress => required.push(Placeholder::EndPage),
            TemplateAction::RelativeProgress => required.push(Placeholder::End),
            _ => {}
        }
        required
    }

    /// Placeholders recognized in templates of this kind
    pub fn accepts(&self, placeholder: Placeholder) -> bool {
        match placeholder {
            Placeholder::Wildcard => true,
            Placeholder::StartPage => self.action == TemplateAction::Progress,
            _ => self.required().contains(&placeholder),
        }
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let family = match self.family {
            LogFamily::BookLog => "book log",
            LogFamily::DayLog => "daily log",
        };
        write!(f, "{} {}", family, self.action.name())
    }
}

/// Piece of a scanned template
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment<'t> {
    Literal(&'t str),
    Placeholder(Placeholder),
}

/// Split a template into literal text and placeholders of `kind`
fn scan(template: &str, kind: TemplateKind) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut literal_start = 0;

    for caps in placeholder_regex().captures_iter(template) {
        let Some(placeholder) = Placeholder::from_name(&caps[1]).filter(|p| kind.accepts(*p))
        else {
            continue;
        };
        let whole = caps.get(0).map_or(0..0, |m| m.range());
        if whole.start > literal_start {
            segments.push(Segment::Literal(&template[literal_start..whole.start]));
        }
        segments.push(Segment::Placeholder(placeholder));
        literal_start = whole.end;
    }

    if literal_start < template.len() {
        segments.push(Segment::Literal(&template[literal_start..]));
    }
    segments
}

/// Check placeholder counts before building the matcher
fn validate(template: &str, kind: TemplateKind, segments: &[Segment<'_>]) -> Result<()> {
    let mut counts: HashMap<Placeholder, usize> = HashMap::new();
    for segment in segments {
        if let Segment::Placeholder(p) = segment {
            *counts.entry(*p).or_default() += 1;
        }
    }

    if let Some(missing) = kind.required().into_iter().find(|p| !counts.contains_key(p)) {
        return Err(ReadjourError::MissingPlaceholder {
            template: template.to_string(),
            placeholder: missing.name().to_string(),
        });
    }

    // Report duplicates in template order
    for segment in segments {
        if let Segment::Placeholder(p) = segment {
            if *p != Placeholder::Wildcard && counts[p] > 1 {
                return Err(ReadjourError::DuplicatePlaceholder {
                    template: template.to_string(),
                    placeholder: p.name().to_string(),
                });
            }
        }
    }

    Ok(())
}

/// Values extracted from one matching line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    pub action: JourneyAction,
    /// Raw book reference, day log family only
    pub book: Option<String>,
    /// Inline date, book log family only
    pub date: Option<NaiveDate>,
}

/// A template compiled into an anchored matcher
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    kind: TemplateKind,
    template: String,
    regex: Regex,
    date_format: DateFormat,
    /// `{date}` follows a `{*}`, so its capture may start with wildcard text
    date_after_wildcard: bool,
}

impl CompiledPattern {
    /// Compile `template` for `kind`
    ///
    /// Fails when a required placeholder is missing or a placeholder other
    /// than `{*}` appears twice.
    pub fn compile(template: &str, kind: TemplateKind) -> Result<Self> {
        let segments = scan(template, kind);
        validate(template, kind, &segments)?;

        let mut source = String::from("^");
        for segment in &segments {
            match segment {
                Segment::Literal(text) => source.push_str(&regex::escape(text)),
                Segment::Placeholder(p) => source.push_str(&p.segment()),
            }
        }
        source.push('$');

        let regex = Regex::new(&source)
            .map_err(|e| ReadjourError::Template(format!("{}: {}", template, e)))?;

        let date_after_wildcard = segments
            .iter()
            .take_while(|s| **s != Segment::Placeholder(Placeholder::Date))
            .any(|s| *s == Segment::Placeholder(Placeholder::Wildcard));

        Ok(CompiledPattern {
            kind,
            template: template.to_string(),
            regex,
            date_format: DateFormat::default(),
            date_after_wildcard,
        })
    }

    /// Use `format` for the `{date}` placeholder instead of `YYYY-MM-DD`
    pub fn with_date_format(mut self, format: DateFormat) -> Self {
        self.date_format = format;
        self
    }

    pub fn kind(&self) -> TemplateKind {
        self.kind
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// Match the whole of `text`
    ///
    /// Returns `None` when the text does not fit the template, or when a
    /// captured date or position does not parse.
    pub fn matches(&self, text: &str) -> Option<MatchResult> {
        let caps = self.regex.captures(text)?;

        let action = match self.kind.action {
            TemplateAction::Started => JourneyAction::Started,
            TemplateAction::Finished => JourneyAction::Finished,
            TemplateAction::Abandoned => JourneyAction::Abandoned,
            TemplateAction::Progress => JourneyAction::Progress {
                start: match caps.name(Placeholder::StartPage.name()) {
                    Some(m) => Some(PositionKind::Page.parse(m.as_str()).ok()?),
                    None => None,
                },
                end: position(&caps, Placeholder::EndPage, PositionKind::Page)?,
            },
            TemplateAction::RelativeProgress => JourneyAction::Progress {
                start: None,
                end: position(&caps, Placeholder::End, PositionKind::Percent)?,
            },
        };

        let date = match self.kind.family {
            LogFamily::BookLog => {
                let raw = caps.name(Placeholder::Date.name())?.as_str();
                Some(self.captured_date(raw)?)
            }
            LogFamily::DayLog => None,
        };

        let book = caps
            .name(Placeholder::Book.name())
            .map(|m| m.as_str().trim().to_string());

        Some(MatchResult { action, book, date })
    }

    /// Parse a `{date}` capture
    ///
    /// After a wildcard the lazy capture can swallow the tail of the
    /// wildcard's text, so the date is then looked for at the end of the
    /// capture.
    fn captured_date(&self, raw: &str) -> Option<NaiveDate> {
        let raw = raw.trim();
        if let Some(date) = self.date_format.parse(raw) {
            return Some(date);
        }
        if !self.date_after_wildcard {
            return None;
        }
        self.date_format
            .candidates(raw)
            .filter(|candidate| raw.ends_with(candidate))
            .find_map(|candidate| {
                self.date_format
                    .parse(candidate)
                    .filter(|date| self.date_format.format(*date) == candidate)
            })
    }
}

fn position(
    caps: &Captures<'_>,
    placeholder: Placeholder,
    kind: PositionKind,
) -> Option<Position> {
    let raw = caps.name(placeholder.name())?.as_str();
    kind.parse(raw).ok()
}
