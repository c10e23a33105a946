//! Unified error handling for the nanum crate
//!
//! This module provides a unified error type that consolidates the
//! domain-specific errors into a single [`Error`] enum, while the domain
//! types stay usable on their own where callers only touch one subsystem.
//!
//! # Architecture
//!
//! - [`Error`] - Unified error enum wrapping all domain-specific errors
//! - [`ErrorCategory`] - Classification of errors for handling strategies

use thiserror::Error;

// Re-export domain-specific errors for convenience
pub use crate::allocator::error::AllocatorError;
pub use crate::ingest::error::IngestError;

/// Result type alias using the unified error
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for all nanum operations
#[derive(Error, Debug)]
pub enum Error {
    /// Allocation engine error
    #[error(transparent)]
    Allocator(#[from] AllocatorError),

    /// File ingestion error
    #[error(transparent)]
    Ingest(#[from] IngestError),

    /// Configuration error
    #[error("Configuration error: {reason}")]
    Config { reason: String },

    /// Underlying I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// CSV output error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Classification of errors for handling strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Bad input data (issuer records, issuer files)
    Input,
    /// Allocation and balance validation errors
    Allocation,
    /// Configuration errors
    Config,
    /// Storage and I/O errors
    Io,
    /// Other/unknown errors
    Other,
}

impl Error {
    /// Create a configuration error
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }

    /// Get the error category for handling strategies
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Allocator(AllocatorError::InvalidIssuer { .. }) => ErrorCategory::Input,
            Self::Allocator(_) => ErrorCategory::Allocation,
            Self::Ingest(_) => ErrorCategory::Input,
            Self::Config { .. } => ErrorCategory::Config,
            Self::Io(_) => ErrorCategory::Io,
            Self::Serialization(_) | Self::Csv(_) => ErrorCategory::Other,
        }
    }

    /// Check if this error is recoverable (can be retried)
    ///
    /// Only transient I/O failures qualify; every other failure needs a
    /// corrected input or configuration first.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Io(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocator_error_category() {
        let err: Error = AllocatorError::EmptyRoster.into();
        assert_eq!(err.category(), ErrorCategory::Allocation);

        let err: Error = AllocatorError::invalid_issuer("x", "bad weight").into();
        assert_eq!(err.category(), ErrorCategory::Input);
    }

    #[test]
    fn test_ingest_error_category() {
        let err: Error = IngestError::MissingColumn("TOTAL".to_string()).into();
        assert_eq!(err.category(), ErrorCategory::Input);
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_io_error_is_recoverable() {
        let err: Error = std::io::Error::new(std::io::ErrorKind::Other, "disk").into();
        assert_eq!(err.category(), ErrorCategory::Io);
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_config_error_display() {
        let err = Error::config("home market must not be empty");
        assert!(err.to_string().contains("Configuration error"));
    }
}
