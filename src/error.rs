//! Error types for PROJTRACK.

use thiserror::Error;

/// Common error type for PROJTRACK.
#[derive(Error, Debug)]
pub enum ProjtrackError {
    /// Database error.
    ///
    /// Wraps errors from the sqlx backend. The full text is logged
    /// server-side; user-facing layers must replace it with a generic
    /// message.
    #[error("database error: {0}")]
    Database(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Authentication error.
    #[error("authentication error: {0}")]
    Auth(String),

    /// Validation error for user input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

// Conversion from sqlx errors
impl From<sqlx::Error> for ProjtrackError {
    fn from(e: sqlx::Error) -> Self {
        ProjtrackError::Database(e.to_string())
    }
}

/// Result type alias for PROJTRACK operations.
pub type Result<T> = std::result::Result<T, ProjtrackError>;
