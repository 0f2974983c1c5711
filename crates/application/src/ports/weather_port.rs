//! Weather port - Interface for weather data retrieval
//!
//! Adapters implementing this port must hand back temperatures in
//! Celsius regardless of the unit system the upstream feed was queried
//! in. The conversion happens once, behind this boundary.

use async_trait::async_trait;
use domain::{forecast::ForecastEntry, value_objects::CityName};
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::error::ApplicationError;

/// Current weather conditions for a city
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentConditions {
    /// Condition group, e.g. "Rain", "Clouds"
    pub condition: String,
    /// Longer description, e.g. "light rain"
    pub description: String,
    /// Temperature in Celsius
    pub temperature_c: f64,
    /// Relative humidity in percent, when the feed reports it
    pub humidity: Option<u8>,
    /// Wind speed in the feed's native unit
    pub wind_speed: f64,
    /// Resolved city name as reported by the feed
    pub city: String,
}

/// Port for weather data operations
#[cfg_attr(test, automock)]
#[async_trait]
pub trait WeatherPort: Send + Sync {
    /// Get current conditions for a city
    async fn current_conditions(
        &self,
        city: &CityName,
    ) -> Result<CurrentConditions, ApplicationError>;

    /// Get the raw 3-hourly forecast entries for a city
    ///
    /// Entries come back chronological, with temperatures already in
    /// Celsius, ready for normalization.
    async fn forecast_entries(
        &self,
        city: &CityName,
    ) -> Result<Vec<ForecastEntry>, ApplicationError>;

    /// Check if the weather service is available
    async fn is_available(&self) -> bool;
}
