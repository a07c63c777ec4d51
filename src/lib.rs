//! Weatherwise - cached daily weather summaries with outdoor advisories
//!
//! This library fetches current conditions, forecasts and astronomy data
//! from a weather provider, composes them into a single "today" summary,
//! and runs rule engines for travel comfort, occupations, health conditions
//! and everyday advice on top of it.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod insights;
pub mod location;
pub mod logging;
pub mod models;
pub mod summary;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use api::AppState;
pub use cache::{CacheKey, ExpiringCache};
pub use config::WeatherwiseConfig;
pub use error::WeatherwiseError;
pub use insights::{
    Advice, HealthCondition, HealthInsight, Occupation, OccupationInsight, TimeWindows,
    TravelScore,
};
pub use location::LocationQuery;
pub use models::{AstronomySnapshot, DailyForecast, Forecast, TodaySummary, WeatherSnapshot};
pub use summary::SummaryAggregator;
pub use weather::{ProviderClient, WeatherApiSource, WeatherSource};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, WeatherwiseError>;
