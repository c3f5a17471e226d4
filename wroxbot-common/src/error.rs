// ================================================================
// File: wroxbot-common/src/error.rs
// ================================================================

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Not found error: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Anything the chat platform rejected (send, edit, lookups).
    #[error("Platform error: {0}")]
    Platform(String),

    /// Missing or malformed command input. `usage` is echoed back to the requester.
    #[error("Usage error: {message}")]
    Usage { message: String, usage: String },

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    /// A hex code given where only a literal `#RRGGBB` is accepted.
    #[error("Invalid hex code: {0}")]
    InvalidHex(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

impl Error {
    pub fn usage(message: impl Into<String>, usage: impl Into<String>) -> Self {
        Error::Usage {
            message: message.into(),
            usage: usage.into(),
        }
    }

    /// True for errors caused by the requester's input rather than by the bot.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Error::Usage { .. }
                | Error::InvalidColor(_)
                | Error::InvalidHex(_)
                | Error::AlreadyExists(_)
        )
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Parse(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Parse(s.to_string())
    }
}

impl From<anyhow::Error> for Error {
    fn from(e: anyhow::Error) -> Self {
        Error::Parse(e.to_string())
    }
}
