//! Severe-weather classification over normalized forecast days
//!
//! A day is severe when any single threshold trips; all comparisons are
//! inclusive. Thresholds are fixed constants, not configuration.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::NormalizedDay;

/// Fixed classification thresholds
pub mod thresholds {
    /// Rain volume at or above this many mm per 3-hour window is heavy
    pub const HEAVY_RAIN_MM_3H: f64 = 1.6;
    /// Wind speed at or above this value (feed-native unit) is strong
    pub const STRONG_WIND_SPEED: f64 = 20.0;
    /// Temperature at or above this many degrees Celsius is extreme heat
    pub const EXTREME_HEAT_C: f64 = 35.0;
    /// Temperature at or below this many degrees Celsius is extreme cold
    pub const EXTREME_COLD_C: f64 = 0.0;
}

/// A threshold that tripped for a given day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SevereCondition {
    HeavyRain,
    StrongWind,
    ExtremeHeat,
    ExtremeCold,
}

impl SevereCondition {
    /// Human-readable description for prompts and API responses
    pub const fn description(self) -> &'static str {
        match self {
            Self::HeavyRain => "heavy rain",
            Self::StrongWind => "strong wind",
            Self::ExtremeHeat => "extreme heat",
            Self::ExtremeCold => "freezing temperatures",
        }
    }
}

impl fmt::Display for SevereCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// A normalized day flagged as severe, with the conditions that tripped
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SevereDayFlag {
    /// Full timestamp of the flagged day's surviving sample
    pub timestamp: String,
    /// Conditions that tripped, in rain/wind/heat/cold order
    pub conditions: Vec<SevereCondition>,
}

fn conditions_for(day: &NormalizedDay) -> Vec<SevereCondition> {
    let mut conditions = Vec::new();
    if day.rain_mm_3h >= thresholds::HEAVY_RAIN_MM_3H {
        conditions.push(SevereCondition::HeavyRain);
    }
    if day.wind_speed >= thresholds::STRONG_WIND_SPEED {
        conditions.push(SevereCondition::StrongWind);
    }
    if day.temperature_c >= thresholds::EXTREME_HEAT_C {
        conditions.push(SevereCondition::ExtremeHeat);
    }
    if day.temperature_c <= thresholds::EXTREME_COLD_C {
        conditions.push(SevereCondition::ExtremeCold);
    }
    conditions
}

/// Flag the days whose weather crosses any severe threshold.
///
/// Pure and order-preserving: the output lists flagged days in the same
/// order they appear in the input, each with the conditions that tripped.
pub fn flag_severe_days(days: &[NormalizedDay]) -> Vec<SevereDayFlag> {
    days.iter()
        .filter_map(|day| {
            let conditions = conditions_for(day);
            if conditions.is_empty() {
                None
            } else {
                Some(SevereDayFlag {
                    timestamp: day.timestamp.clone(),
                    conditions,
                })
            }
        })
        .collect()
}
