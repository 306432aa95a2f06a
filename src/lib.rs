//! readjour - Reading journeys from markdown notes
//!
//! Finds when books were started, finished, abandoned and how far they were
//! read, using user-written line templates over daily notes and per-book
//! reading logs.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::ReadjourError;
