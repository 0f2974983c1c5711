//! OpenWeatherMap weather client
//!
//! HTTP client for the OpenWeatherMap current-weather and 5-day/3-hour
//! forecast endpoints, keyed by city name.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::models::{CurrentResponse, ForecastResponse, Units};

/// Weather client errors
#[derive(Debug, Error)]
pub enum WeatherError {
    /// Connection to the weather service failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to the weather service failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Failed to parse response from weather service
    #[error("Parse error: {0}")]
    ParseError(String),

    /// The requested city is not known to the weather service
    #[error("City not found: {0}")]
    CityNotFound(String),

    /// API key rejected by the weather service
    #[error("Invalid API key")]
    InvalidApiKey,

    /// Service is temporarily unavailable
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,
}

/// Weather service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// OpenWeatherMap API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API key
    #[serde(default)]
    pub api_key: String,

    /// Unit system to request (default: metric)
    #[serde(default)]
    pub units: Units,

    /// Connection timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Number of 3-hour forecast slots to request (default: 40 ≈ 5 days)
    #[serde(default = "default_forecast_count")]
    pub forecast_count: u8,
}

fn default_base_url() -> String {
    "https://api.openweathermap.org/data/2.5".to_string()
}

const fn default_timeout() -> u64 {
    30
}

const fn default_forecast_count() -> u8 {
    40
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: String::new(),
            units: Units::default(),
            timeout_secs: default_timeout(),
            forecast_count: default_forecast_count(),
        }
    }
}

/// Weather client trait for fetching weather data
#[async_trait]
pub trait WeatherClient: Send + Sync {
    /// Get current weather for a city
    async fn get_current(&self, city: &str) -> Result<CurrentResponse, WeatherError>;

    /// Get the 3-hourly forecast for a city
    async fn get_forecast(&self, city: &str) -> Result<ForecastResponse, WeatherError>;

    /// Check if the weather service is reachable
    async fn is_healthy(&self) -> bool;
}

/// OpenWeatherMap HTTP client implementation
#[derive(Debug)]
pub struct OpenWeatherClient {
    client: Client,
    config: WeatherConfig,
}

impl OpenWeatherClient {
    /// Create a new OpenWeatherMap client with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: WeatherConfig) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| WeatherError::ConnectionFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// The unit system this client requests from the feed
    pub const fn units(&self) -> Units {
        self.config.units
    }

    /// Build the URL for a current-weather request
    fn build_current_url(&self, city: &str) -> String {
        format!(
            "{}/weather?q={}&units={}&appid={}",
            self.config.base_url,
            city,
            self.config.units.as_query_param(),
            self.config.api_key
        )
    }

    /// Build the URL for a forecast request
    fn build_forecast_url(&self, city: &str) -> String {
        format!(
            "{}/forecast?q={}&cnt={}&units={}&appid={}",
            self.config.base_url,
            city,
            self.config.forecast_count,
            self.config.units.as_query_param(),
            self.config.api_key
        )
    }

    fn check_status(status: reqwest::StatusCode, city: &str) -> Result<(), WeatherError> {
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(WeatherError::CityNotFound(city.to_string()));
        }
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(WeatherError::InvalidApiKey);
        }
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(WeatherError::RateLimitExceeded);
        }
        if status.is_server_error() {
            return Err(WeatherError::ServiceUnavailable(format!("HTTP {status}")));
        }
        if !status.is_success() {
            return Err(WeatherError::RequestFailed(format!("HTTP {status}")));
        }
        Ok(())
    }
}

#[async_trait]
impl WeatherClient for OpenWeatherClient {
    #[instrument(skip(self), fields(city = %city))]
    async fn get_current(&self, city: &str) -> Result<CurrentResponse, WeatherError> {
        let url = self.build_current_url(city);
        debug!("Fetching current weather");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| WeatherError::RequestFailed(e.to_string()))?;

        Self::check_status(response.status(), city)?;

        response
            .json()
            .await
            .map_err(|e| WeatherError::ParseError(e.to_string()))
    }

    #[instrument(skip(self), fields(city = %city))]
    async fn get_forecast(&self, city: &str) -> Result<ForecastResponse, WeatherError> {
        let url = self.build_forecast_url(city);
        debug!("Fetching weather forecast");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| WeatherError::RequestFailed(e.to_string()))?;

        Self::check_status(response.status(), city)?;

        response
            .json()
            .await
            .map_err(|e| WeatherError::ParseError(e.to_string()))
    }

    async fn is_healthy(&self) -> bool {
        // A city-not-found response still proves the service is up and
        // the key is accepted.
        match self.get_current("London").await {
            Ok(_) | Err(WeatherError::CityNotFound(_)) => true,
            Err(_) => false,
        }
    }
}
