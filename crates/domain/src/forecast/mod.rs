//! Forecast normalization
//!
//! The upstream forecast feed delivers several samples per calendar day
//! (3-hour slots). Normalization collapses that series to exactly one
//! entry per day so the severe-weather classifier sees daily granularity.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

pub mod severe_weather;

pub use severe_weather::{SevereCondition, SevereDayFlag, flag_severe_days, thresholds};

/// Length of the calendar-day prefix in a feed timestamp ("YYYY-MM-DD")
pub const DAY_PREFIX_LEN: usize = 10;

/// A single raw sample from the forecast feed
///
/// `timestamp` is the feed's textual form, "YYYY-MM-DD HH:MM:SS".
/// `temperature_c` is always Celsius: whatever unit the feed was queried
/// in, the producing adapter converts before constructing entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    /// Feed timestamp, "YYYY-MM-DD HH:MM:SS"
    pub timestamp: String,
    /// Rain volume over the sample's 3-hour window, in mm; absent means none
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rain_mm_3h: Option<f64>,
    /// Wind speed in the feed's native unit
    pub wind_speed: f64,
    /// Air temperature in degrees Celsius
    pub temperature_c: f64,
}

impl ForecastEntry {
    /// The calendar-day portion of the timestamp
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::MalformedEntry`] when the timestamp is too
    /// short to contain a full "YYYY-MM-DD" prefix.
    fn day_key(&self) -> Result<&str, DomainError> {
        self.timestamp
            .get(..DAY_PREFIX_LEN)
            .ok_or_else(|| DomainError::malformed_entry(&self.timestamp))
    }
}

/// One representative forecast sample per calendar day
///
/// Produced by [`normalize_forecast`]; carries the first sample seen for
/// its day, with missing rain collapsed to `0.0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedDay {
    /// Full timestamp of the surviving sample
    pub timestamp: String,
    /// Rain volume in mm over 3 hours (0.0 when the feed omitted it)
    pub rain_mm_3h: f64,
    /// Wind speed in the feed's native unit
    pub wind_speed: f64,
    /// Air temperature in degrees Celsius
    pub temperature_c: f64,
}

impl From<&NormalizedDay> for ForecastEntry {
    fn from(day: &NormalizedDay) -> Self {
        Self {
            timestamp: day.timestamp.clone(),
            rain_mm_3h: Some(day.rain_mm_3h),
            wind_speed: day.wind_speed,
            temperature_c: day.temperature_c,
        }
    }
}

/// Collapse a 3-hourly forecast series to one entry per calendar day.
///
/// The first sample encountered for each day wins; input order is
/// preserved. Every entry is validated, including same-day duplicates
/// that would otherwise be skipped, and a single malformed timestamp
/// fails the whole call with no partial output.
///
/// # Errors
///
/// Returns [`DomainError::MalformedEntry`] if any entry's timestamp is
/// shorter than the "YYYY-MM-DD" day prefix.
pub fn normalize_forecast(entries: &[ForecastEntry]) -> Result<Vec<NormalizedDay>, DomainError> {
    let mut seen_days: HashSet<String> = HashSet::with_capacity(entries.len().min(16));
    let mut days = Vec::new();

    for entry in entries {
        let day = entry.day_key()?;
        if seen_days.insert(day.to_string()) {
            days.push(NormalizedDay {
                timestamp: entry.timestamp.clone(),
                rain_mm_3h: entry.rain_mm_3h.unwrap_or(0.0),
                wind_speed: entry.wind_speed,
                temperature_c: entry.temperature_c,
            });
        }
    }

    Ok(days)
}
