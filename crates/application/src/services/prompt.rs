//! Prompt construction for the crop advisory
//!
//! The advisory prompt packs the weather picture into plain text the
//! model can reason over: current conditions first, then the flagged
//! days with the thresholds they tripped.

use std::fmt::Write as _;

use domain::{
    forecast::{DAY_PREFIX_LEN, SevereDayFlag},
    value_objects::{CityName, CropName},
};

use crate::ports::CurrentConditions;

/// System prompt establishing the advisor persona
pub const ADVISOR_SYSTEM_PROMPT: &str = "You are an expert agricultural advisor. \
Given a crop, a location, and the weather outlook, give clear, practical guidance \
a farmer can act on this week. Be specific to the crop and the conditions, and \
keep the advice concise.";

/// Build the opening advisory prompt for a crop and city
pub fn advisory_prompt(
    crop: &CropName,
    city: &CityName,
    current: &CurrentConditions,
    severe_days: &[SevereDayFlag],
) -> String {
    let mut prompt = format!(
        "I am growing {crop} near {city}.\n\nCurrent weather in {}: {}, {:.1} degrees Celsius",
        current.city, current.description, current.temperature_c
    );
    if let Some(humidity) = current.humidity {
        let _ = write!(prompt, ", humidity {humidity}%");
    }
    let _ = write!(prompt, ", wind speed {:.1}.", current.wind_speed);

    if severe_days.is_empty() {
        prompt.push_str("\n\nNo severe weather is expected over the coming days.");
    } else {
        prompt.push_str("\n\nSevere weather is expected on the following days:\n");
        for day in severe_days {
            let date = day.timestamp.get(..DAY_PREFIX_LEN).unwrap_or(&day.timestamp);
            let conditions = day
                .conditions
                .iter()
                .map(|c| c.description())
                .collect::<Vec<_>>()
                .join(", ");
            let _ = writeln!(prompt, "- {date}: {conditions}");
        }
    }

    prompt.push_str("\nWhat should I do to protect and care for my crop this week?");
    prompt
}
