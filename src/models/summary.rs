//! Composed view of one city's day

use serde::{Deserialize, Serialize};

use super::{AirQuality, AstronomySnapshot, DailyForecast, WeatherSnapshot};

/// Current conditions, today's forecast and today's astronomy for one city.
///
/// Only built when all three parts were fetched; there is no partial summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TodaySummary {
    pub current: WeatherSnapshot,
    pub today: DailyForecast,
    pub astronomy: AstronomySnapshot,
}

impl TodaySummary {
    #[must_use]
    pub fn new(current: WeatherSnapshot, today: DailyForecast, astronomy: AstronomySnapshot) -> Self {
        Self {
            current,
            today,
            astronomy,
        }
    }

    /// The scoring inputs, each read from one fixed source field.
    #[must_use]
    pub fn conditions(&self) -> Conditions {
        Conditions {
            feels_like_c: self.current.feels_like_c,
            temp_c: self.current.temp_c,
            max_temp_c: self.today.max_temp_c,
            rain_chance: self.today.chance_of_rain,
            precip_mm: self.today.total_precip_mm,
            max_wind_kph: self.today.max_wind_kph,
            uv: self.today.uv,
            visibility_km: self.current.visibility_km,
            pressure_mb: self.current.pressure_mb,
            air_quality: self
                .current
                .air_quality
                .clone()
                .or_else(|| self.today.air_quality.clone()),
        }
    }
}

/// Flattened inputs shared by every rule set.
///
/// Instantaneous readings (feels-like, temperature, visibility, pressure) come
/// from current conditions; whole-day figures (rain, wind, UV, max temperature)
/// from today's forecast. Air quality prefers the current block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conditions {
    pub feels_like_c: f64,
    pub temp_c: f64,
    pub max_temp_c: f64,
    pub rain_chance: u8,
    pub precip_mm: f64,
    pub max_wind_kph: f64,
    pub uv: f64,
    pub visibility_km: f64,
    pub pressure_mb: f64,
    pub air_quality: Option<AirQuality>,
}

impl Default for Conditions {
    /// A mild, dry, clear day
    fn default() -> Self {
        Self {
            feels_like_c: 24.0,
            temp_c: 24.0,
            max_temp_c: 26.0,
            rain_chance: 0,
            precip_mm: 0.0,
            max_wind_kph: 10.0,
            uv: 2.0,
            visibility_km: 10.0,
            pressure_mb: 1013.0,
            air_quality: None,
        }
    }
}
