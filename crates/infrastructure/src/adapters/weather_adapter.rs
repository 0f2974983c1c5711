//! Weather adapter - Implements WeatherPort using integration_weather
//!
//! Temperature readings cross this boundary exactly once, and come out
//! in Celsius no matter which unit system the feed was queried in.

use application::error::ApplicationError;
use application::ports::{CurrentConditions, WeatherPort};
use async_trait::async_trait;
use domain::forecast::ForecastEntry;
use domain::value_objects::CityName;
use integration_weather::{
    CurrentResponse, ForecastSlot, OpenWeatherClient, Units, WeatherClient, WeatherConfig,
    WeatherError,
};
use tracing::{debug, instrument};

/// Adapter for weather data using the OpenWeatherMap API
#[derive(Debug)]
pub struct WeatherAdapter {
    client: OpenWeatherClient,
}

impl WeatherAdapter {
    /// Create a new adapter with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn new(config: WeatherConfig) -> Result<Self, ApplicationError> {
        let client =
            OpenWeatherClient::new(config).map_err(|e| ApplicationError::Internal(e.to_string()))?;
        Ok(Self { client })
    }

    /// Map integration weather error to application error
    fn map_error(err: WeatherError) -> ApplicationError {
        match err {
            WeatherError::CityNotFound(city) => {
                ApplicationError::NotFound(format!("city {city}"))
            },
            WeatherError::InvalidApiKey => {
                ApplicationError::Configuration("Weather API key rejected".into())
            },
            WeatherError::RateLimitExceeded => ApplicationError::RateLimited,
            WeatherError::ConnectionFailed(e)
            | WeatherError::RequestFailed(e)
            | WeatherError::ServiceUnavailable(e) => ApplicationError::ExternalService(e),
            WeatherError::ParseError(e) => ApplicationError::Internal(e),
        }
    }

    /// Convert a current-weather payload, normalizing the temperature
    fn map_current(current: &CurrentResponse, units: Units) -> CurrentConditions {
        let (condition, description) = current.weather.first().map_or_else(
            || ("Unknown".to_string(), "unknown".to_string()),
            |summary| (summary.main.clone(), summary.description.clone()),
        );

        CurrentConditions {
            condition,
            description,
            temperature_c: units.temperature_to_celsius(current.main.temp),
            humidity: current.main.humidity,
            wind_speed: current.wind.speed,
            city: current.name.clone(),
        }
    }

    /// Convert a forecast slot, normalizing the temperature
    fn map_slot(slot: &ForecastSlot, units: Units) -> ForecastEntry {
        ForecastEntry {
            timestamp: slot.dt_txt.clone(),
            rain_mm_3h: slot.rain_mm_3h(),
            wind_speed: slot.wind.speed,
            temperature_c: units.temperature_to_celsius(slot.main.temp),
        }
    }
}

#[async_trait]
impl WeatherPort for WeatherAdapter {
    #[instrument(skip(self), fields(city = %city))]
    async fn current_conditions(
        &self,
        city: &CityName,
    ) -> Result<CurrentConditions, ApplicationError> {
        let current = self
            .client
            .get_current(city.as_str())
            .await
            .map_err(Self::map_error)?;

        let conditions = Self::map_current(&current, self.client.units());
        debug!(
            temperature_c = conditions.temperature_c,
            description = %conditions.description,
            "Retrieved current conditions"
        );
        Ok(conditions)
    }

    #[instrument(skip(self), fields(city = %city))]
    async fn forecast_entries(
        &self,
        city: &CityName,
    ) -> Result<Vec<ForecastEntry>, ApplicationError> {
        let forecast = self
            .client
            .get_forecast(city.as_str())
            .await
            .map_err(Self::map_error)?;

        let units = self.client.units();
        let entries: Vec<ForecastEntry> = forecast
            .list
            .iter()
            .map(|slot| Self::map_slot(slot, units))
            .collect();

        debug!(slots = entries.len(), "Retrieved forecast entries");
        Ok(entries)
    }

    async fn is_available(&self) -> bool {
        self.client.is_healthy().await
    }
}
