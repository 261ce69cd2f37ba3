//! Result and error types for acs-coverage.
//!
//! Range parsing and coverage computation are total and never fail; these
//! errors come from form validation, roster edits and backend responses.

use thiserror::Error;

/// Result type for acs-coverage operations
pub type AcsResult<T> = Result<T, CoverageError>;

/// Errors that can occur around coverage records
#[derive(Debug, Error)]
pub enum CoverageError {
    /// A form field failed validation
    #[error("Validation failed for {field}: {message}")]
    Validation {
        /// Field that failed
        field: String,
        /// Error message
        message: String,
    },

    /// Named entity not present
    #[error("{what} not found: {name}")]
    NotFound {
        /// Kind of entity
        what: String,
        /// Name or id that was looked up
        name: String,
    },

    /// The backend answered with `status: "erro"`
    #[error("Rejected by backend: {message}")]
    Rejected {
        /// Message returned by the backend
        message: String,
    },

    /// A submission is already in flight
    #[error("Operation in progress: {message}")]
    Busy {
        /// Error message
        message: String,
    },

    /// Status thresholds are inconsistent
    #[error("Invalid status policy: {message}")]
    InvalidPolicy {
        /// Error message
        message: String,
    },

    /// JSON encoding or decoding failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CoverageError {
    /// Create a validation error
    #[must_use]
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a not-found error
    #[must_use]
    pub fn not_found(what: impl Into<String>, name: impl Into<String>) -> Self {
        Self::NotFound {
            what: what.into(),
            name: name.into(),
        }
    }

    /// Create a backend rejection error
    #[must_use]
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }

    /// Create a busy error
    #[must_use]
    pub fn busy(message: impl Into<String>) -> Self {
        Self::Busy {
            message: message.into(),
        }
    }

    /// Create an invalid policy error
    #[must_use]
    pub fn invalid_policy(message: impl Into<String>) -> Self {
        Self::InvalidPolicy {
            message: message.into(),
        }
    }
}
