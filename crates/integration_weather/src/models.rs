//! OpenWeatherMap API data models
//!
//! Raw serde structs mirroring the upstream payloads, plus the `Units`
//! type that records which temperature unit a payload was requested in.

use serde::{Deserialize, Serialize};

/// Unit system requested from the feed
///
/// OpenWeatherMap reports temperatures in Kelvin (`standard`), Celsius
/// (`metric`) or Fahrenheit (`imperial`). The unit travels with the
/// payload so the conversion to Celsius happens exactly once, at the
/// adapter boundary, instead of being guessed downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    /// Kelvin temperatures (the API default)
    Standard,
    /// Celsius temperatures, metric wind speed (m/s)
    Metric,
    /// Fahrenheit temperatures, imperial wind speed (mph)
    Imperial,
}

impl Units {
    /// The `units` query parameter value for this unit system
    pub const fn as_query_param(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Metric => "metric",
            Self::Imperial => "imperial",
        }
    }

    /// Convert a temperature reported in this unit system to Celsius
    pub fn temperature_to_celsius(self, value: f64) -> f64 {
        match self {
            Self::Standard => value - 273.15,
            Self::Metric => value,
            Self::Imperial => (value - 32.0) / 1.8,
        }
    }
}

impl Default for Units {
    fn default() -> Self {
        Self::Metric
    }
}

/// Weather condition summary as reported by the feed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConditionSummary {
    /// Group name, e.g. "Rain", "Clouds"
    pub main: String,
    /// Longer description, e.g. "light rain"
    pub description: String,
}

/// Temperature and humidity readings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MainReadings {
    /// Temperature in the requested unit system
    pub temp: f64,
    /// Relative humidity in percent
    #[serde(default)]
    pub humidity: Option<u8>,
}

/// Wind readings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindReading {
    /// Wind speed in the requested unit system
    pub speed: f64,
}

/// Rain volume; the feed omits the whole object on dry slots
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RainVolume {
    /// Rain volume over the last 3 hours, in mm
    #[serde(rename = "3h", default)]
    pub last_3h: Option<f64>,
}

/// Response from the current-weather endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentResponse {
    /// Condition summaries (usually one entry)
    pub weather: Vec<ConditionSummary>,
    pub main: MainReadings,
    pub wind: WindReading,
    /// Resolved city name
    pub name: String,
}

/// One 3-hour slot from the forecast endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastSlot {
    /// Slot timestamp, "YYYY-MM-DD HH:MM:SS"
    pub dt_txt: String,
    pub main: MainReadings,
    pub wind: WindReading,
    #[serde(default)]
    pub rain: Option<RainVolume>,
}

impl ForecastSlot {
    /// Rain volume for this slot, treating an absent field as dry
    pub fn rain_mm_3h(&self) -> Option<f64> {
        self.rain.as_ref().and_then(|r| r.last_3h)
    }
}

/// Response from the forecast endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastResponse {
    /// 3-hour slots, chronological
    pub list: Vec<ForecastSlot>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn units_query_params() {
        assert_eq!(Units::Standard.as_query_param(), "standard");
        assert_eq!(Units::Metric.as_query_param(), "metric");
        assert_eq!(Units::Imperial.as_query_param(), "imperial");
    }

    #[test]
    fn kelvin_converts_to_celsius() {
        let c = Units::Standard.temperature_to_celsius(308.15);
        assert!((c - 35.0).abs() < 1e-9);
    }

    #[test]
    fn celsius_passes_through() {
        let c = Units::Metric.temperature_to_celsius(21.5);
        assert!((c - 21.5).abs() < f64::EPSILON);
    }

    #[test]
    fn fahrenheit_converts_to_celsius() {
        let c = Units::Imperial.temperature_to_celsius(95.0);
        assert!((c - 35.0).abs() < 1e-9);
    }

    #[test]
    fn freezing_point_in_all_units() {
        assert!(Units::Standard.temperature_to_celsius(273.15).abs() < 1e-9);
        assert!(Units::Metric.temperature_to_celsius(0.0).abs() < f64::EPSILON);
        assert!(Units::Imperial.temperature_to_celsius(32.0).abs() < 1e-9);
    }

    #[test]
    fn forecast_slot_parses_with_rain() {
        let json = serde_json::json!({
            "dt_txt": "2024-07-01 12:00:00",
            "main": {"temp": 298.15, "humidity": 60},
            "wind": {"speed": 4.2},
            "rain": {"3h": 2.5}
        });

        let slot: ForecastSlot = serde_json::from_value(json).unwrap();
        assert_eq!(slot.dt_txt, "2024-07-01 12:00:00");
        assert_eq!(slot.rain_mm_3h(), Some(2.5));
    }

    #[test]
    fn forecast_slot_parses_without_rain() {
        let json = serde_json::json!({
            "dt_txt": "2024-07-01 12:00:00",
            "main": {"temp": 298.15},
            "wind": {"speed": 4.2}
        });

        let slot: ForecastSlot = serde_json::from_value(json).unwrap();
        assert!(slot.rain.is_none());
        assert_eq!(slot.rain_mm_3h(), None);
    }

    #[test]
    fn empty_rain_object_counts_as_dry() {
        let json = serde_json::json!({
            "dt_txt": "2024-07-01 12:00:00",
            "main": {"temp": 298.15},
            "wind": {"speed": 4.2},
            "rain": {}
        });

        let slot: ForecastSlot = serde_json::from_value(json).unwrap();
        assert_eq!(slot.rain_mm_3h(), None);
    }

    #[test]
    fn current_response_parses() {
        let json = serde_json::json!({
            "weather": [{"main": "Clouds", "description": "scattered clouds"}],
            "main": {"temp": 293.15, "humidity": 72},
            "wind": {"speed": 3.1},
            "name": "Pune"
        });

        let current: CurrentResponse = serde_json::from_value(json).unwrap();
        assert_eq!(current.name, "Pune");
        assert_eq!(current.weather[0].main, "Clouds");
        assert_eq!(current.main.humidity, Some(72));
    }

    #[test]
    fn units_serialize_lowercase() {
        assert_eq!(serde_json::to_string(&Units::Metric).unwrap(), "\"metric\"");
    }
}
