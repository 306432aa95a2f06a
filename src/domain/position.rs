//! Reading positions: absolute pages and relative percentages

use crate::error::{ReadjourError, Result};
use std::cmp::Ordering;
use std::fmt;

/// A point reached in a book
///
/// Pages and percentages are separate representations. Positions only
/// compare within the same representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Position {
    /// Absolute page number
    Page(u32),
    /// Completion percentage (0..=100)
    Percent(u8),
}

/// Which representation a token should be parsed as
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionKind {
    Page,
    Percent,
}

impl PositionKind {
    pub fn parse(self, token: &str) -> Result<Position> {
        match self {
            PositionKind::Page => Position::parse_page(token),
            PositionKind::Percent => Position::parse_percent(token),
        }
    }
}

impl Position {
    /// Parse a page number: ASCII digits only
    pub fn parse_page(token: &str) -> Result<Self> {
        parse_digits(token)
            .and_then(|n| u32::try_from(n).ok())
            .map(Position::Page)
            .ok_or_else(|| ReadjourError::InvalidPosition(token.to_string()))
    }

    /// Parse a percentage such as `42` or `42%`
    pub fn parse_percent(token: &str) -> Result<Self> {
        let digits = token.strip_suffix('%').unwrap_or(token);
        parse_digits(digits)
            .filter(|n| *n <= 100)
            .and_then(|n| u8::try_from(n).ok())
            .map(Position::Percent)
            .ok_or_else(|| ReadjourError::InvalidPosition(token.to_string()))
    }

    pub fn kind(&self) -> PositionKind {
        match self {
            Position::Page(_) => PositionKind::Page,
            Position::Percent(_) => PositionKind::Percent,
        }
    }
}

fn parse_digits(token: &str) -> Option<u64> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    token.parse().ok()
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Position::Page(a), Position::Page(b)) => Some(a.cmp(b)),
            (Position::Percent(a), Position::Percent(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::Page(page) => write!(f, "{}", page),
            Position::Percent(percent) => write!(f, "{}%", percent),
        }
    }
}
