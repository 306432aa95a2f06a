//! CLI layer - Command-line interface

pub mod commands;
pub mod output;

pub use commands::{parse_cli_date, Cli, Commands};
pub use output::{format_journey_list, format_template_failures};
