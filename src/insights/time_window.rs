//! Best and worst time of day to be outside

use chrono::Timelike;
use serde::{Deserialize, Serialize};

use crate::models::{AstronomySnapshot, DailyForecast, TodaySummary, WeatherSnapshot};

pub const DEFAULT_BEST: &str = "Morning (6:00–9:00)";
pub const DEFAULT_WORST: &str = "Afternoon (12:00–16:00)";

const HEAT_WORST: &str = "Midday–Afternoon (11:00–16:00)";
const RAIN_WORST: &str = "Late afternoon–Evening (15:00–19:00)";
const UV_WORST: &str = "Late morning–Afternoon (10:00–15:00)";

/// Earliest hour a best window may start
const EARLIEST_START_HOUR: u32 = 6;
/// Later starts mean an implausible sunrise; the default is used instead
const LATEST_START_HOUR: u32 = 12;
const BEST_SPAN_HOURS: u32 = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindows {
    pub best: String,
    pub worst: String,
}

impl TimeWindows {
    #[must_use]
    pub fn from_summary(summary: &TodaySummary) -> Self {
        calculate(&summary.current, &summary.today, &summary.astronomy)
    }
}

/// Best window follows sunrise; worst window is picked by the last matching
/// rule in the order heat, rain, UV.
#[must_use]
pub fn calculate(
    current: &WeatherSnapshot,
    today: &DailyForecast,
    astronomy: &AstronomySnapshot,
) -> TimeWindows {
    let best = astronomy
        .sunrise_time()
        .map(|sunrise| (sunrise.hour() + 1).max(EARLIEST_START_HOUR))
        .filter(|start| *start <= LATEST_START_HOUR)
        .map(|start| format!("Morning ({}:00–{}:00)", start, start + BEST_SPAN_HOURS))
        .unwrap_or_else(|| DEFAULT_BEST.to_string());

    let mut worst = DEFAULT_WORST;
    if current.feels_like_c >= 35.0 || today.max_temp_c >= 35.0 {
        worst = HEAT_WORST;
    }
    if today.chance_of_rain >= 60 {
        worst = RAIN_WORST;
    }
    if today.uv >= 9.0 {
        worst = UV_WORST;
    }

    TimeWindows {
        best,
        worst: worst.to_string(),
    }
}
