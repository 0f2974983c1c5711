//! City name value object with validation

use std::fmt;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::errors::DomainError;

/// A validated, trimmed city name used to query the weather feed
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Validate)]
#[serde(transparent)]
pub struct CityName {
    #[validate(length(min = 1, max = 80))]
    value: String,
}

impl CityName {
    /// Create a new city name, trimming surrounding whitespace
    ///
    /// # Errors
    ///
    /// Returns an error when the trimmed name is empty or longer than
    /// 80 characters.
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let value = name.into().trim().to_string();

        let candidate = Self { value };
        candidate
            .validate()
            .map_err(|e| DomainError::InvalidCityName(e.to_string()))?;

        Ok(candidate)
    }

    /// Get the city name as a string slice
    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for CityName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl TryFrom<String> for CityName {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for CityName {
    type Error = DomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
