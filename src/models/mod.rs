//! Data models for Weatherwise
//!
//! This module contains the core domain models organized by concern:
//! - Weather: current conditions, forecast days and air quality
//! - Astronomy: sun and moon events for a date
//! - Location: timezone, IP lookup and search results
//! - Summary: the composed view of today used by the insight engines
//! - WeatherApi: wire types of the provider's JSON responses

pub mod astronomy;
pub mod location;
pub mod summary;
pub mod weather;
pub mod weatherapi;

pub use astronomy::AstronomySnapshot;
pub use location::{IpLocation, LocationMatch, TimeZoneInfo};
pub use summary::{Conditions, TodaySummary};
pub use weather::{AirQuality, DailyForecast, Forecast, WeatherSnapshot, Wind};
