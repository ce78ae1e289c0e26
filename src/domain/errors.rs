//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into these. A superseded async result is
//! not an error: it surfaces as [`Completion::Stale`](super::Completion) instead.

use crate::domain::ExportSink;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Rejected before any network call (empty search form, empty selection, ...).
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Geocoding or autocomplete failure. Non-fatal: the search degrades to text only.
    #[error("Location resolution failed: {0}")]
    Resolution(String),

    /// Search backend returned non-2xx or the transport failed.
    #[error("Search backend error: {0}")]
    Backend(String),

    #[error("Export to {sink} failed: {reason}")]
    Export { sink: ExportSink, reason: String },

    /// Outbound call exceeded the configured bounded wait.
    #[error("{operation} timed out after {after:?}")]
    Timeout {
        operation: &'static str,
        after: Duration,
    },

    #[error("Preference store error: {0}")]
    Preference(String),

    /// Saving a downloaded file or opening a link failed.
    #[error("Delivery failed: {0}")]
    Delivery(String),

    #[error("UI error: {0}")]
    Ui(String),
}

impl DomainError {
    /// Message shown to the user. Drops the category prefix for backend failures,
    /// whose body is already a readable sentence.
    pub fn user_message(&self) -> String {
        match self {
            DomainError::Backend(msg) => format!("Search failed: {}", msg),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_message_keeps_sub_second_precision() {
        let err = DomainError::Timeout {
            operation: "geocoding",
            after: Duration::from_millis(800),
        };
        assert_eq!(err.to_string(), "geocoding timed out after 800ms");
    }

    #[test]
    fn test_timeout_message_in_seconds() {
        let err = DomainError::Timeout {
            operation: "search",
            after: Duration::from_secs(30),
        };
        assert_eq!(err.to_string(), "search timed out after 30s");
    }
}
