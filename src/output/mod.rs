//! Output formatting for udo.
//!
//! This module provides formatters for displaying to-dos in various formats.

mod json;
mod pretty;

use chrono::NaiveDateTime;
use colored::Colorize;

use crate::cli::args::OutputFormat;
use crate::core::{Bucket, DueToken};
use crate::error::UdoError;
use crate::todo::{Todo, DUE_FORMAT};

pub use json::*;
pub use pretty::*;

/// Width used when the terminal size cannot be queried.
pub const FALLBACK_COLUMNS: usize = 80;

/// Current terminal width in columns.
#[must_use]
pub fn terminal_width() -> usize {
    crossterm::terminal::size().map_or(FALLBACK_COLUMNS, |(cols, _)| usize::from(cols))
}

/// Format the bucketed list based on output format
///
/// # Errors
///
/// Returns `UdoError::Parse` if JSON serialization fails.
pub fn format_buckets(buckets: &[Bucket<Todo>], format: OutputFormat) -> Result<String, UdoError> {
    match format {
        OutputFormat::Pretty => Ok(format_buckets_pretty(buckets, terminal_width())),
        OutputFormat::Json => format_buckets_json(buckets),
    }
}

/// Format a single to-do after a status change
///
/// # Errors
///
/// Returns `UdoError::Parse` if JSON serialization fails.
pub fn format_status(todo: &Todo, verb: &str, format: OutputFormat) -> Result<String, UdoError> {
    match format {
        OutputFormat::Pretty => Ok(format_status_pretty(todo, verb)),
        OutputFormat::Json => to_json(todo),
    }
}

/// Format a resolved due token
///
/// # Errors
///
/// Returns `UdoError::Parse` if JSON serialization fails.
pub fn format_due(token: DueToken, due: NaiveDateTime, format: OutputFormat) -> Result<String, UdoError> {
    match format {
        OutputFormat::Pretty => Ok(format!(
            "{} {}\n{} {}",
            "Token:".cyan(),
            token,
            "Due:".cyan(),
            due.format(DUE_FORMAT)
        )),
        OutputFormat::Json => format_due_json(token, due),
    }
}
