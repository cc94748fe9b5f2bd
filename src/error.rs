//! Error types for gleaner.
//!
//! Only the document-level walk can fail; individual records that cannot be
//! extracted are reported as `None` by the extractors, never as errors.

/// Error type for document-level extraction.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input document was empty or blank.
    #[error("document is empty")]
    EmptyDocument,

    /// No post containers were found in the document.
    #[error("no post containers found")]
    NoContent,
}

/// Result type alias for document-level extraction.
pub type Result<T> = std::result::Result<T, Error>;
