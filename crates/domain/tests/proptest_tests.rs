//! Property-based tests for forecast normalization and classification
//!
//! These tests use proptest to verify invariants across many random inputs.

use domain::forecast::{ForecastEntry, flag_severe_days, normalize_forecast, thresholds};
use domain::value_objects::{CityName, CropName};
use proptest::prelude::*;

// ============================================================================
// Forecast Normalization Property Tests
// ============================================================================

mod normalization_tests {
    use super::*;

    /// Strategy for a well-formed feed timestamp on a small date range
    fn feed_timestamp() -> impl Strategy<Value = String> {
        (1u8..=28u8, 0u8..=7u8).prop_map(|(day, slot)| {
            format!("2024-07-{day:02} {:02}:00:00", slot * 3)
        })
    }

    fn arb_entry() -> impl Strategy<Value = ForecastEntry> {
        (
            feed_timestamp(),
            proptest::option::of(0.0f64..50.0),
            0.0f64..60.0,
            -40.0f64..55.0,
        )
            .prop_map(|(timestamp, rain_mm_3h, wind_speed, temperature_c)| ForecastEntry {
                timestamp,
                rain_mm_3h,
                wind_speed,
                temperature_c,
            })
    }

    proptest! {
        #[test]
        fn well_formed_input_always_normalizes(
            entries in proptest::collection::vec(arb_entry(), 0..60)
        ) {
            prop_assert!(normalize_forecast(&entries).is_ok());
        }

        #[test]
        fn output_never_exceeds_input_length(
            entries in proptest::collection::vec(arb_entry(), 0..60)
        ) {
            let days = normalize_forecast(&entries).unwrap();
            prop_assert!(days.len() <= entries.len());
        }

        #[test]
        fn day_prefixes_are_unique(
            entries in proptest::collection::vec(arb_entry(), 0..60)
        ) {
            let days = normalize_forecast(&entries).unwrap();
            let mut prefixes: Vec<&str> = days.iter().map(|d| &d.timestamp[..10]).collect();
            let before = prefixes.len();
            prefixes.sort_unstable();
            prefixes.dedup();
            prop_assert_eq!(before, prefixes.len());
        }

        #[test]
        fn normalization_is_idempotent(
            entries in proptest::collection::vec(arb_entry(), 0..60)
        ) {
            let once = normalize_forecast(&entries).unwrap();
            let reentered: Vec<ForecastEntry> =
                once.iter().map(ForecastEntry::from).collect();
            let twice = normalize_forecast(&reentered).unwrap();
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn output_preserves_relative_input_order(
            entries in proptest::collection::vec(arb_entry(), 0..60)
        ) {
            let days = normalize_forecast(&entries).unwrap();
            // Each surviving timestamp appears in the input, and the
            // survivors occur in input order.
            let mut cursor = 0;
            for day in &days {
                let pos = entries[cursor..]
                    .iter()
                    .position(|e| e.timestamp == day.timestamp);
                prop_assert!(pos.is_some());
                cursor += pos.unwrap() + 1;
            }
        }

        #[test]
        fn one_malformed_entry_fails_everything(
            mut entries in proptest::collection::vec(arb_entry(), 1..30),
            short in "[0-9-]{0,9}",
            index in any::<prop::sample::Index>()
        ) {
            let at = index.index(entries.len());
            entries[at].timestamp = short;
            prop_assert!(normalize_forecast(&entries).is_err());
        }

        #[test]
        fn rain_in_output_is_never_negative_or_missing(
            entries in proptest::collection::vec(arb_entry(), 0..60)
        ) {
            let days = normalize_forecast(&entries).unwrap();
            for day in days {
                prop_assert!(day.rain_mm_3h >= 0.0);
            }
        }
    }
}

// ============================================================================
// Severe-Weather Classification Property Tests
// ============================================================================

mod classification_tests {
    use super::*;
    use domain::forecast::NormalizedDay;

    fn arb_day() -> impl Strategy<Value = NormalizedDay> {
        (1u8..=28u8, 0.0f64..50.0, 0.0f64..60.0, -40.0f64..55.0).prop_map(
            |(day, rain_mm_3h, wind_speed, temperature_c)| NormalizedDay {
                timestamp: format!("2024-07-{day:02} 00:00:00"),
                rain_mm_3h,
                wind_speed,
                temperature_c,
            },
        )
    }

    proptest! {
        #[test]
        fn flags_are_a_subset_of_input(
            days in proptest::collection::vec(arb_day(), 0..40)
        ) {
            let flags = flag_severe_days(&days);
            prop_assert!(flags.len() <= days.len());
            for flag in &flags {
                prop_assert!(days.iter().any(|d| d.timestamp == flag.timestamp));
            }
        }

        #[test]
        fn every_flag_names_at_least_one_condition(
            days in proptest::collection::vec(arb_day(), 0..40)
        ) {
            for flag in flag_severe_days(&days) {
                prop_assert!(!flag.conditions.is_empty());
            }
        }

        #[test]
        fn flags_match_the_severe_days_in_order(
            days in proptest::collection::vec(arb_day(), 0..40)
        ) {
            // Generated timestamps can repeat, so match flags to days
            // positionally instead of looking them up by timestamp.
            let flags = flag_severe_days(&days);
            let severe: Vec<&NormalizedDay> = days
                .iter()
                .filter(|d| {
                    d.rain_mm_3h >= thresholds::HEAVY_RAIN_MM_3H
                        || d.wind_speed >= thresholds::STRONG_WIND_SPEED
                        || d.temperature_c >= thresholds::EXTREME_HEAT_C
                        || d.temperature_c <= thresholds::EXTREME_COLD_C
                })
                .collect();

            prop_assert_eq!(flags.len(), severe.len());
            for (flag, day) in flags.iter().zip(severe) {
                prop_assert_eq!(&flag.timestamp, &day.timestamp);
            }
        }

        #[test]
        fn unflagged_days_cross_no_threshold(
            days in proptest::collection::vec(arb_day(), 0..40)
        ) {
            let flags = flag_severe_days(&days);
            for day in &days {
                if !flags.iter().any(|f| f.timestamp == day.timestamp) {
                    prop_assert!(day.rain_mm_3h < thresholds::HEAVY_RAIN_MM_3H);
                    prop_assert!(day.wind_speed < thresholds::STRONG_WIND_SPEED);
                    prop_assert!(day.temperature_c < thresholds::EXTREME_HEAT_C);
                    prop_assert!(day.temperature_c > thresholds::EXTREME_COLD_C);
                }
            }
        }

        #[test]
        fn classification_is_deterministic(
            days in proptest::collection::vec(arb_day(), 0..40)
        ) {
            prop_assert_eq!(flag_severe_days(&days), flag_severe_days(&days));
        }
    }
}

// ============================================================================
// Value Object Property Tests
// ============================================================================

mod value_object_tests {
    use super::*;

    proptest! {
        #[test]
        fn reasonable_crop_names_are_accepted(name in "[A-Za-z][A-Za-z ]{0,78}") {
            prop_assume!(!name.trim().is_empty());
            let crop = CropName::new(&name).unwrap();
            prop_assert_eq!(crop.as_str(), name.trim());
        }

        #[test]
        fn overlong_names_are_rejected(len in 81usize..200) {
            prop_assert!(CropName::new("a".repeat(len)).is_err());
            prop_assert!(CityName::new("b".repeat(len)).is_err());
        }

        #[test]
        fn whitespace_only_names_are_rejected(ws in "[ \\t]{0,10}") {
            prop_assert!(CropName::new(&ws).is_err());
            prop_assert!(CityName::new(&ws).is_err());
        }

        #[test]
        fn city_names_roundtrip_through_json(name in "[A-Za-z][A-Za-z ]{0,40}") {
            prop_assume!(!name.trim().is_empty());
            if let Ok(city) = CityName::new(&name) {
                let json = serde_json::to_string(&city).unwrap();
                let parsed: CityName = serde_json::from_str(&json).unwrap();
                prop_assert_eq!(city, parsed);
            }
        }
    }
}
