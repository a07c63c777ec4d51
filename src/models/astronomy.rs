use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Sun and moon events for one location and date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AstronomySnapshot {
    pub date: NaiveDate,
    /// Provider formatted local time, e.g. "06:40 AM"
    pub sunrise: String,
    pub sunset: String,
    pub moonrise: String,
    pub moonset: String,
    pub moon_phase: String,
    /// Moon illumination in percent
    pub moon_illumination: f64,
    pub is_sun_up: bool,
    pub is_moon_up: bool,
}

impl AstronomySnapshot {
    /// Sunrise as a local time, if the provider sent a parseable value.
    /// "No sunrise" days (polar regions) yield `None`.
    #[must_use]
    pub fn sunrise_time(&self) -> Option<NaiveTime> {
        parse_clock(&self.sunrise)
    }
}

/// Accepts "06:40 AM" as well as "06:40"
fn parse_clock(value: &str) -> Option<NaiveTime> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%I:%M %p")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .ok()
}
