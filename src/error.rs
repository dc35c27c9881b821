//! Error types for udo.

use thiserror::Error;

/// Errors raised while turning a due-date token into a timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DueError {
    /// The raw string is not one of the accepted due options.
    #[error("invalid due date '{0}': not in allowed options")]
    InvalidToken(String),

    /// A year token that lies before the current year.
    #[error("year {0} has already passed")]
    YearElapsed(i32),

    /// Calendar arithmetic left the range chrono can represent.
    #[error("due date is out of the representable range")]
    OutOfRange,
}

/// Top-level error type for the application.
#[derive(Debug, Error)]
pub enum UdoError {
    #[error(transparent)]
    Due(#[from] DueError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("database error: {0}")]
    Database(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    NotInitialized(String),

    #[error("prompt failed: {0}")]
    Prompt(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl UdoError {
    /// Shorthand for wrapping a rusqlite failure with some context.
    pub(crate) fn db(context: &str, err: &rusqlite::Error) -> Self {
        Self::Database(format!("{context}: {err}"))
    }
}
