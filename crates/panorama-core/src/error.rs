//! Error types for the Panorama engine.
//!
//! Only genuine construction failures become errors. Per-entity data
//! degradations (missing series, short history, degenerate statistics)
//! are values, not errors, and live with the components that produce
//! them.

use thiserror::Error;

/// A specialized Result type for Panorama operations.
pub type PanoramaResult<T> = Result<T, PanoramaError>;

/// The main error type for Panorama operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PanoramaError {
    /// Error in date calculations or invalid date.
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// Description of the date error.
        message: String,
    },

    /// Calendar range where the end precedes the start.
    #[error("Invalid calendar range: {start} > {end}")]
    InvalidRange {
        /// Requested range start.
        start: String,
        /// Requested range end.
        end: String,
    },

    /// A referenced series id is not present in the table or store.
    #[error("Unknown series: {id}")]
    UnknownSeries {
        /// Identifier of the missing series.
        id: String,
    },

    /// Invalid computation configuration.
    #[error("Invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of what's invalid.
        reason: String,
    },
}

impl PanoramaError {
    /// Create an invalid date error.
    #[must_use]
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }

    /// Create an invalid range error.
    #[must_use]
    pub fn invalid_range(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self::InvalidRange {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Create an unknown series error.
    #[must_use]
    pub fn unknown_series(id: impl Into<String>) -> Self {
        Self::UnknownSeries { id: id.into() }
    }

    /// Create an invalid configuration error.
    #[must_use]
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PanoramaError::invalid_date("2025-02-30");
        assert!(err.to_string().contains("2025-02-30"));

        let err = PanoramaError::unknown_series("WALCL");
        assert!(err.to_string().contains("WALCL"));

        let err = PanoramaError::invalid_range("2025-06-01", "2025-01-01");
        assert!(err.to_string().contains("2025-06-01"));
        assert!(err.to_string().contains("2025-01-01"));
    }

    #[test]
    fn test_error_clone_eq() {
        let err = PanoramaError::invalid_config("window must be positive");
        assert_eq!(err.clone(), err);
    }
}
