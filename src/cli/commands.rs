//! CLI command definitions

use crate::error::{ReadjourError, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "readjour")]
#[command(about = "Reading journeys from markdown notes", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Show debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize readjour in a notes directory
    Init {
        /// Directory to initialize (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// List reading events in chronological order
    Journeys {
        /// Only events of this book (title, path or [[wikilink]])
        #[arg(short, long)]
        book: Option<String>,

        /// Start date (DD-MM-YYYY format)
        #[arg(long)]
        from: Option<String>,

        /// End date (DD-MM-YYYY format)
        #[arg(long)]
        to: Option<String>,
    },

    /// Compile every configured template and report errors
    Check,
}

/// Parse a `DD-MM-YYYY` command line date
pub fn parse_cli_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%d-%m-%Y")
        .map_err(|_| ReadjourError::InvalidDate(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cli_date() {
        assert_eq!(
            parse_cli_date("17-01-2025").unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 17).unwrap()
        );
        assert!(matches!(
            parse_cli_date("2025-01-17"),
            Err(ReadjourError::InvalidDate(_))
        ));
        assert!(parse_cli_date("31-02-2025").is_err());
    }

    #[test]
    fn test_parse_journeys_args() {
        let cli = Cli::try_parse_from([
            "readjour", "journeys", "--book", "Dune", "--from", "01-01-2025", "-v",
        ])
        .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Journeys { book, from, to } => {
                assert_eq!(book.as_deref(), Some("Dune"));
                assert_eq!(from.as_deref(), Some("01-01-2025"));
                assert_eq!(to, None);
            }
            other => panic!("Expected journeys, got {:?}", other),
        }
    }
}
