//! Error types and handling for rs2-seq
//!
//! Every fault a consumer can observe while pulling from a sequence is a
//! [`SeqError`]. Errors are `Clone` because a [`Subject`](crate::subject::Subject)
//! broadcasts the same error to every attached consumer.

use thiserror::Error;

/// Main error type for sequence operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeqError {
    /// The subject was already completed or errored
    #[error("Subject has been disposed")]
    Disposed,
    /// The cursor already reported its terminal event
    #[error("Cursor is exhausted")]
    Exhausted,
    /// A user supplied transform, predicate or combiner failed
    #[error("Callback failed: {0}")]
    Callback(String),
    /// Configuration could not be loaded
    #[error("Invalid configuration: {0}")]
    Config(String),
    /// I/O related errors raised by producers
    #[error("IO error: {0}")]
    Io(String),
    /// Custom error with message
    #[error("Sequence error: {0}")]
    Custom(String),
}

impl SeqError {
    /// Shorthand for a [`SeqError::Custom`] error
    pub fn custom(msg: impl Into<String>) -> Self {
        SeqError::Custom(msg.into())
    }

    /// Shorthand for a [`SeqError::Callback`] error
    pub fn callback(msg: impl Into<String>) -> Self {
        SeqError::Callback(msg.into())
    }
}

impl From<std::io::Error> for SeqError {
    fn from(err: std::io::Error) -> Self {
        SeqError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for SeqError {
    fn from(err: serde_json::Error) -> Self {
        SeqError::Config(err.to_string())
    }
}

/// Result type for rs2-seq operations
pub type SeqResult<T> = Result<T, SeqError>;
