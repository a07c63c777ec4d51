//! Weather observation and forecast models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Current conditions for one location, as reported by the provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub city: String,
    pub region: String,
    pub country: String,
    /// Provider local time, e.g. "2024-06-01 14:30"
    pub local_time: String,
    pub temp_c: f64,
    pub temp_f: f64,
    pub feels_like_c: f64,
    pub feels_like_f: f64,
    /// Relative humidity in percent
    pub humidity: u8,
    pub pressure_mb: f64,
    pub pressure_in: f64,
    /// Cloud cover in percent
    pub cloud: u8,
    pub uv: f64,
    pub wind: Wind,
    pub visibility_km: f64,
    pub visibility_miles: f64,
    pub is_day: bool,
    pub condition: String,
    pub air_quality: Option<AirQuality>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wind {
    pub kph: f64,
    pub mph: f64,
    /// Direction in degrees (0-360, where 0/360 is North)
    pub degree: u16,
    /// Compass direction, e.g. "WSW"
    pub direction: String,
    pub gust_kph: f64,
    pub gust_mph: f64,
}

/// Pollutant concentrations in μg/m³ plus the two index scales.
///
/// Every field is optional: the provider omits or nulls values it has no
/// reading for, and a missing reading must never be mistaken for zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AirQuality {
    pub co: Option<f64>,
    pub no2: Option<f64>,
    pub o3: Option<f64>,
    pub so2: Option<f64>,
    pub pm2_5: Option<f64>,
    pub pm10: Option<f64>,
    /// US-EPA index, 1 (good) to 6 (hazardous)
    pub us_epa_index: Option<u8>,
    /// UK-DEFRA index, 1 (low) to 10 (very high)
    pub gb_defra_index: Option<u8>,
}

impl AirQuality {
    /// True when the EPA index is known and at least `threshold`
    #[must_use]
    pub fn epa_at_least(&self, threshold: u8) -> bool {
        self.us_epa_index.is_some_and(|index| index >= threshold)
    }

    /// True when PM2.5 is known and strictly above `threshold`
    #[must_use]
    pub fn pm2_5_above(&self, threshold: f64) -> bool {
        self.pm2_5.is_some_and(|pm| pm > threshold)
    }
}

/// One calendar day of forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecast {
    pub date: NaiveDate,
    pub max_temp_c: f64,
    pub max_temp_f: f64,
    pub min_temp_c: f64,
    pub min_temp_f: f64,
    pub avg_temp_c: f64,
    pub avg_temp_f: f64,
    pub total_precip_mm: f64,
    pub total_precip_in: f64,
    /// Chance of rain in percent
    pub chance_of_rain: u8,
    /// Chance of snow in percent
    pub chance_of_snow: u8,
    pub max_wind_kph: f64,
    pub max_wind_mph: f64,
    pub uv: f64,
    pub avg_visibility_km: f64,
    pub avg_humidity: f64,
    pub condition: String,
    pub air_quality: Option<AirQuality>,
}

/// Multi-day forecast for a resolved location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub city: String,
    pub region: String,
    pub country: String,
    /// Forecast days in chronological order, today first
    pub days: Vec<DailyForecast>,
}

impl Forecast {
    /// The first forecast day, which the provider anchors on the location's today
    #[must_use]
    pub fn today(&self) -> Option<&DailyForecast> {
        self.days.first()
    }
}
