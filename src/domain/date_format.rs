//! User-defined date formats
//!
//! Formats are written with the tokens note-taking apps use for daily note
//! names (`YYYY-MM-DD`, `D MMMM YYYY`, ...). Each format is translated once
//! into a chrono format string for parsing and formatting, and into a regex
//! used to scan longer text (such as a file path) for candidate dates.
//!
//! # Examples
//!
//! ```
//! use readjour::domain::DateFormat;
//! use chrono::NaiveDate;
//!
//! let format = DateFormat::new("DD/MM/YYYY").unwrap();
//! let date = format.parse("12/10/2024").unwrap();
//! assert_eq!(date, NaiveDate::from_ymd_opt(2024, 10, 12).unwrap());
//! assert_eq!(format.format(date), "12/10/2024");
//! ```

use crate::error::{ReadjourError, Result};
use chrono::NaiveDate;
use regex::Regex;
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_DATE_FORMAT: &str = "YYYY-MM-DD";

/// Token of a date format string
#[derive(Debug, Clone, PartialEq, Eq)]
enum FormatToken {
    Year,
    ShortYear,
    MonthName,
    MonthAbbrev,
    PaddedMonth,
    Month,
    PaddedDay,
    Day,
    WeekdayName,
    WeekdayAbbrev,
    Literal(String),
}

/// Recognized tokens, longest first so `YYYY` wins over `YY`
const TOKENS: &[(&str, FormatToken)] = &[
    ("YYYY", FormatToken::Year),
    ("YY", FormatToken::ShortYear),
    ("MMMM", FormatToken::MonthName),
    ("MMM", FormatToken::MonthAbbrev),
    ("MM", FormatToken::PaddedMonth),
    ("M", FormatToken::Month),
    ("DD", FormatToken::PaddedDay),
    ("D", FormatToken::Day),
    ("dddd", FormatToken::WeekdayName),
    ("ddd", FormatToken::WeekdayAbbrev),
];

impl FormatToken {
    fn strftime(&self) -> String {
        match self {
            FormatToken::Year => "%Y".to_string(),
            FormatToken::ShortYear => "%y".to_string(),
            FormatToken::MonthName => "%B".to_string(),
            FormatToken::MonthAbbrev => "%b".to_string(),
            FormatToken::PaddedMonth => "%m".to_string(),
            FormatToken::Month => "%-m".to_string(),
            FormatToken::PaddedDay => "%d".to_string(),
            FormatToken::Day => "%-d".to_string(),
            FormatToken::WeekdayName => "%A".to_string(),
            FormatToken::WeekdayAbbrev => "%a".to_string(),
            FormatToken::Literal(text) => text.replace('%', "%%"),
        }
    }

    fn scan_pattern(&self) -> String {
        match self {
            FormatToken::Year => r"\d{4}".to_string(),
            FormatToken::ShortYear | FormatToken::PaddedMonth | FormatToken::PaddedDay => {
                r"\d{2}".to_string()
            }
            FormatToken::Month | FormatToken::Day => r"\d{1,2}".to_string(),
            FormatToken::MonthName | FormatToken::WeekdayName => "[A-Za-z]+".to_string(),
            FormatToken::MonthAbbrev | FormatToken::WeekdayAbbrev => "[A-Za-z]{3}".to_string(),
            FormatToken::Literal(text) => regex::escape(text),
        }
    }
}

/// Split a format string into tokens; `[...]` escapes literal text
fn tokenize(pattern: &str) -> Vec<FormatToken> {
    let mut tokens: Vec<FormatToken> = Vec::new();
    let mut rest = pattern;

    let push_literal = |tokens: &mut Vec<FormatToken>, text: &str| {
        if let Some(FormatToken::Literal(prev)) = tokens.last_mut() {
            prev.push_str(text);
        } else {
            tokens.push(FormatToken::Literal(text.to_string()));
        }
    };

    'scan: while !rest.is_empty() {
        if let Some(escaped) = rest.strip_prefix('[') {
            match escaped.find(']') {
                Some(end) => {
                    push_literal(&mut tokens, &escaped[..end]);
                    rest = &escaped[end + 1..];
                }
                None => {
                    push_literal(&mut tokens, escaped);
                    rest = "";
                }
            }
            continue;
        }

        for (text, token) in TOKENS {
            if let Some(after) = rest.strip_prefix(text) {
                tokens.push(token.clone());
                rest = after;
                continue 'scan;
            }
        }

        let len = rest.chars().next().map_or(1, char::len_utf8);
        push_literal(&mut tokens, &rest[..len]);
        rest = &rest[len..];
    }

    tokens
}

/// A validated date format
#[derive(Debug, Clone)]
pub struct DateFormat {
    pattern: String,
    strftime: String,
    scanner: Regex,
}

impl DateFormat {
    /// Build a format, requiring a year, a month and a day token
    pub fn new(pattern: &str) -> Result<Self> {
        let tokens = tokenize(pattern);

        let has_year = tokens
            .iter()
            .any(|t| matches!(t, FormatToken::Year | FormatToken::ShortYear));
        let has_month = tokens.iter().any(|t| {
            matches!(
                t,
                FormatToken::MonthName
                    | FormatToken::MonthAbbrev
                    | FormatToken::PaddedMonth
                    | FormatToken::Month
            )
        });
        let has_day = tokens
            .iter()
            .any(|t| matches!(t, FormatToken::PaddedDay | FormatToken::Day));

        if !(has_year && has_month && has_day) {
            return Err(ReadjourError::InvalidDateFormat(pattern.to_string()));
        }

        let strftime: String = tokens.iter().map(FormatToken::strftime).collect();
        let scan: String = tokens.iter().map(FormatToken::scan_pattern).collect();
        let scanner = Regex::new(&scan)
            .map_err(|e| ReadjourError::InvalidDateFormat(format!("{}: {}", pattern, e)))?;

        Ok(DateFormat {
            pattern: pattern.to_string(),
            strftime,
            scanner,
        })
    }

    /// The format as written by the user
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Parse text that must consist of exactly one date in this format
    pub fn parse(&self, text: &str) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(text, &self.strftime).ok()
    }

    /// Render a date in this format
    pub fn format(&self, date: NaiveDate) -> String {
        date.format(&self.strftime).to_string()
    }

    /// Substrings of `text` shaped like a date in this format, left to right
    ///
    /// Candidates are not validated; `1234-56-78` is a candidate for `YYYY-MM-DD`.
    /// The scan resumes one character after each candidate's start, so
    /// candidates may overlap.
    pub fn candidates<'a>(&'a self, text: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        let mut start = 0;
        std::iter::from_fn(move || {
            let found = self.scanner.find_at(text, start)?;
            start = found.start()
                + text[found.start()..]
                    .chars()
                    .next()
                    .map_or(1, char::len_utf8);
            Some(found.as_str())
        })
    }
}

impl Default for DateFormat {
    fn default() -> Self {
        DateFormat::new(DEFAULT_DATE_FORMAT).expect("default date format is valid")
    }
}

impl FromStr for DateFormat {
    type Err = ReadjourError;

    fn from_str(s: &str) -> Result<Self> {
        DateFormat::new(s)
    }
}

impl fmt::Display for DateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern)
    }
}
