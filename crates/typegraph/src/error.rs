//! Error types for typegraph operations.
//!
//! Errors split along the boundary between the in-memory core and the
//! storage layer around it:
//!
//! - **Core errors** (`RecordNotFound`, `MalformedGraph`) come from impact
//!   queries and decoding. They are always reported to the caller, never
//!   retried or defaulted away.
//! - **Boundary errors** (`Io`, `Config`, `Extraction`) come from the store,
//!   configuration loading, and the front-end extractor.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for typegraph operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for typegraph operations.
#[derive(Debug, Error)]
pub enum Error {
    /// An impact query named a path that no record in the graph carries
    #[error("source file not found in graph ({})", path.display())]
    RecordNotFound {
        /// The path that was requested
        path: PathBuf,
    },

    /// A persisted graph document does not have the expected shape
    #[error("malformed graph: {0}")]
    MalformedGraph(String),

    /// A graph could not be encoded (e.g. a path that is not valid UTF-8)
    #[error("encode error: {0}")]
    Encode(String),

    /// File system operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration or arguments
    #[error("configuration error: {0}")]
    Config(String),

    /// The front-end extractor could not produce a record for a file
    #[error("extraction failed for {}: {message}", path.display())]
    Extraction {
        /// The file that was being scanned
        path: PathBuf,
        /// Human-readable error message
        message: String,
    },
}

impl Error {
    /// Create a `RecordNotFound` error for a path.
    #[must_use]
    pub fn record_not_found(path: impl Into<PathBuf>) -> Self {
        Self::RecordNotFound { path: path.into() }
    }

    /// Create an extraction error for a file.
    #[must_use]
    pub fn extraction(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Extraction {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Returns `true` if this error originates in the in-memory core.
    #[must_use]
    pub fn is_core_error(&self) -> bool {
        matches!(self, Self::RecordNotFound { .. } | Self::MalformedGraph(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_not_found_message_contains_path() {
        let error = Error::record_not_found("src/main/java/org/example/NonExistent.java");

        assert_eq!(
            error.to_string(),
            "source file not found in graph (src/main/java/org/example/NonExistent.java)"
        );
    }

    #[test]
    fn extraction_error_display_includes_path_and_message() {
        let error = Error::extraction("src/Foo.java", "unexpected token");

        let display = error.to_string();
        assert!(display.contains("src/Foo.java"));
        assert!(display.contains("unexpected token"));
    }

    #[test]
    fn error_categorization() {
        assert!(Error::record_not_found("a").is_core_error());
        assert!(Error::MalformedGraph("missing field".into()).is_core_error());
        assert!(!Error::Config("bad".into()).is_core_error());
        assert!(!Error::Io(std::io::Error::other("disk")).is_core_error());
    }
}
