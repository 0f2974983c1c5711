//! Crop name value object with validation
//!
//! # Examples
//!
//! ```
//! use domain::CropName;
//!
//! let crop = CropName::new("  Winter Wheat ").unwrap();
//! assert_eq!(crop.as_str(), "Winter Wheat");
//!
//! assert!(CropName::new("").is_err());
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::errors::DomainError;

/// A validated, trimmed crop name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Validate)]
#[serde(transparent)]
pub struct CropName {
    #[validate(length(min = 1, max = 80))]
    value: String,
}

impl CropName {
    /// Create a new crop name, trimming surrounding whitespace
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
            .map_err(|e| DomainError::InvalidCropName(e.to_string()))?;

        Ok(candidate)
    }

    /// Get the crop name as a string slice
    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for CropName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl TryFrom<String> for CropName {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for CropName {
    type Error = DomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
