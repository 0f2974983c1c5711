//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// A forecast entry carried a timestamp too short to hold a calendar day
    #[error("Malformed forecast entry: timestamp {timestamp:?} is shorter than a calendar-day prefix")]
    MalformedEntry { timestamp: String },

    /// Invalid crop name
    #[error("Invalid crop name: {0}")]
    InvalidCropName(String),

    /// Invalid city name
    #[error("Invalid city name: {0}")]
    InvalidCityName(String),

    /// Entity not found
    #[error("{entity_type} not found: {id}")]
    NotFound { entity_type: String, id: String },

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

impl DomainError {
    /// Create a not found error
    pub fn not_found(entity_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: entity_type.into(),
            id: id.into(),
        }
    }

    /// Create a malformed entry error for the given timestamp
    pub fn malformed_entry(timestamp: impl Into<String>) -> Self {
        Self::MalformedEntry {
            timestamp: timestamp.into(),
        }
    }
}
