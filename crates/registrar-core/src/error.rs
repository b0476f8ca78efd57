//! Error types for the registrar crates.

use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the registrar crates.
#[derive(Error, Debug)]
pub enum Error {
    /// Input failed a presence or length check.
    #[error("{message}")]
    Validation {
        /// Description of what was missing or out of bounds.
        message: String,
    },

    /// No record exists for the requested id.
    #[error("student not found: {id}")]
    NotFound {
        /// The requested record id.
        id: String,
    },

    /// A generated id is already taken by an existing record.
    #[error("student already exists")]
    Conflict {
        /// The colliding record id.
        id: String,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Internal error (unexpected state).
    #[error("internal error: {message}")]
    Internal {
        /// Error message.
        message: String,
    },
}

impl Error {
    /// Returns `true` if this error was caused by the caller's input.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Validation { .. } | Self::NotFound { .. } | Self::Conflict { .. }
        )
    }

    /// Creates a validation error with the given message.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Creates a not-found error for the given record id.
    #[must_use]
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    /// Creates a conflict error for the given record id.
    #[must_use]
    pub fn conflict(id: impl Into<String>) -> Self {
        Self::Conflict { id: id.into() }
    }

    /// Creates an internal error with the given message.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_classification() {
        assert!(Error::validation("bad input").is_client_error());
        assert!(Error::not_found("abc").is_client_error());
        assert!(Error::conflict("abc").is_client_error());
        assert!(!Error::internal("boom").is_client_error());
    }

    #[test]
    fn test_validation_display_is_bare_message() {
        let err = Error::validation("names and lastNames are required");
        assert_eq!(err.to_string(), "names and lastNames are required");
    }

    #[test]
    fn test_conflict_display() {
        let err = Error::conflict("Ana_Lop_1_20240101");
        assert_eq!(err.to_string(), "student already exists");
    }
}
