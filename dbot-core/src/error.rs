//! Error types for the bot core.

use thiserror::Error;

/// Top-level error for dbot transport operations.
#[derive(Error, Debug)]
pub enum DbotError {
    #[error("Bot error: {0}")]
    Bot(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for core operations; uses [`DbotError`].
pub type Result<T> = std::result::Result<T, DbotError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bot_error_display() {
        let err = DbotError::Bot("Forbidden: bot was blocked by the user".to_string());
        assert_eq!(err.to_string(), "Bot error: Forbidden: bot was blocked by the user");
    }

    #[test]
    fn test_io_error_converts_into_dbot_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: DbotError = io.into();
        assert!(matches!(err, DbotError::Io(_)));
    }
}
