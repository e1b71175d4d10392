//! Error types for rs-readerview.
//!
//! This module defines the error types returned by extraction operations.

/// Error type for extraction operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input document is empty.
    #[error("document has no content")]
    Empty,

    /// No article was selectable, even through the fallback candidate.
    #[error("no extractable content found")]
    NoContent,

    /// A structural precondition was violated.
    #[error("malformed document: {0}")]
    Malformed(String),
}

/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, Error>;
