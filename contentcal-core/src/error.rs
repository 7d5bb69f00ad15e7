//! Error types for contentcal.

use thiserror::Error;

/// Errors that can occur while loading or indexing content calendars.
#[derive(Error, Debug)]
pub enum ContentCalError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Could not fetch {month} posts: {reason}")]
    Fetch { month: String, reason: String },

    #[error("No {month} document for client '{client}'")]
    MissingDocument { client: String, month: String },

    #[error("Invalid month document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid month '{0}'. Expected YYYY-MM")]
    InvalidMonth(String),

    #[error("Invalid date '{0}'. Expected YYYY-MM-DD")]
    InvalidDate(String),
}

/// Result type alias for contentcal operations.
pub type ContentCalResult<T> = Result<T, ContentCalError>;
