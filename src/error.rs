//! Error types for readjour

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for readjour
#[derive(Debug, Error)]
pub enum ReadjourError {
    #[error("Not a readjour directory: {0}")]
    NotReadjourDirectory(PathBuf),

    #[error("Template '{template}' is missing required placeholder {{{placeholder}}}")]
    MissingPlaceholder {
        template: String,
        placeholder: String,
    },

    #[error("Template '{template}' uses placeholder {{{placeholder}}} more than once")]
    DuplicatePlaceholder {
        template: String,
        placeholder: String,
    },

    #[error("Invalid position: {0}")]
    InvalidPosition(String),

    #[error("Invalid date format: {0}")]
    InvalidDateFormat(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Template error: {0}")]
    Template(String),

    #[error("No reading journeys found: {0}")]
    NoJourneys(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl ReadjourError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            ReadjourError::NotReadjourDirectory(_) => 2,
            ReadjourError::MissingPlaceholder { .. }
            | ReadjourError::DuplicatePlaceholder { .. }
            | ReadjourError::InvalidDateFormat(_) => 3,
            ReadjourError::InvalidDate(_) => 4,
            _ => 1,
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            ReadjourError::NotReadjourDirectory(path) => {
                format!(
                    "Not a readjour directory: {}\n\n\
                    Suggestions:\n\
                    • Run 'readjour init' in your notes directory\n\
                    • Navigate to an existing readjour directory\n\
                    • Set READJOUR_ROOT environment variable to your notes path",
                    path.display()
                )
            }
            ReadjourError::MissingPlaceholder { .. } | ReadjourError::DuplicatePlaceholder { .. } => {
                format!(
                    "{}\n\n\
                    Template placeholders:\n\
                    • Book log templates need {{date}}, daily templates need {{book}}\n\
                    • Progress templates need {{endPage}} and may use {{startPage}}\n\
                    • Relative progress templates need {{end}}\n\
                    • {{*}} matches any text and may be repeated\n\n\
                    Run 'readjour check' to list every invalid template.",
                    self
                )
            }
            ReadjourError::InvalidDateFormat(_) => {
                format!(
                    "{}\n\n\
                    Date formats use YYYY, MM, M, DD, D, MMMM, MMM, dddd, ddd\n\
                    and must contain a year, a month and a day.\n\
                    Example: YYYY-MM-DD",
                    self
                )
            }
            ReadjourError::InvalidDate(_) => {
                format!(
                    "{}\n\n\
                    Expected format: DD-MM-YYYY\n\
                    Example: readjour journeys --from 01-01-2025 --to 31-01-2025",
                    self
                )
            }
            ReadjourError::NoJourneys(_) => {
                format!(
                    "{}\n\n\
                    Suggestions:\n\
                    • Check the headings in .readjour/config.toml match your notes\n\
                    • Run 'readjour check' to find templates that failed to compile\n\
                    • Widen the --from/--to range or drop --book",
                    self
                )
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using ReadjourError
pub type Result<T> = std::result::Result<T, ReadjourError>;
