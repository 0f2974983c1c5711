//! OpenWeatherMap integration
//!
//! Client for the OpenWeatherMap API (<https://openweathermap.org/api>).
//! Provides current conditions and the 5-day/3-hour forecast, keyed by
//! city name.

pub mod client;
mod models;

pub use client::{OpenWeatherClient, WeatherClient, WeatherConfig, WeatherError};
pub use models::{
    ConditionSummary, CurrentResponse, ForecastResponse, ForecastSlot, MainReadings, RainVolume,
    Units, WindReading,
};
