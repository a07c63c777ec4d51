//! Weather provider access
//!
//! [`WeatherSource`] is the raw, uncached view of the provider. [`ProviderClient`]
//! puts the short-lived cache in front of it for current conditions and
//! forecasts; every other lookup goes straight to the source.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::{debug, instrument};

use crate::Result;
use crate::cache::{CacheKey, ExpiringCache};
use crate::models::{
    AstronomySnapshot, Forecast, IpLocation, LocationMatch, TimeZoneInfo, WeatherSnapshot,
};

pub mod weather_api;

pub use weather_api::WeatherApiSource;

/// Forecast length accepted by the provider
pub const MIN_FORECAST_DAYS: u8 = 1;
pub const MAX_FORECAST_DAYS: u8 = 14;

/// Raw provider operations.
///
/// `Ok(None)` (or an empty list for search) means the provider answered
/// "bad request" or "not found" for the query. Any other failure is an error.
#[async_trait]
pub trait WeatherSource: Send + Sync {
    async fn current(&self, query: &str) -> Result<Option<WeatherSnapshot>>;

    async fn forecast(&self, query: &str, days: u8) -> Result<Option<Forecast>>;

    async fn time_zone(&self, query: &str) -> Result<Option<TimeZoneInfo>>;

    async fn astronomy(&self, query: &str, date: NaiveDate) -> Result<Option<AstronomySnapshot>>;

    async fn ip_lookup(&self, ip: &str) -> Result<Option<IpLocation>>;

    async fn search(&self, text: &str) -> Result<Vec<LocationMatch>>;
}

/// Caching front of a [`WeatherSource`]. Cheap to clone; clones share the cache.
#[derive(Clone)]
pub struct ProviderClient {
    source: Arc<dyn WeatherSource>,
    cache: Arc<ExpiringCache>,
}

impl ProviderClient {
    pub fn new(source: Arc<dyn WeatherSource>) -> Self {
        Self {
            source,
            cache: Arc::new(ExpiringCache::new()),
        }
    }

    /// Current conditions, served from cache for up to a minute
    #[instrument(skip(self))]
    pub async fn fetch_current(&self, location: &str) -> Result<Option<WeatherSnapshot>> {
        let key = CacheKey::current(location);
        if let Some(cached) = self.cache.get::<WeatherSnapshot>(&key).await {
            debug!("Serving current conditions from cache");
            return Ok(Some(cached));
        }

        let fetched = self.source.current(location.trim()).await?;
        if let Some(snapshot) = &fetched {
            self.cache.put(key, snapshot.clone()).await;
        } else {
            debug!("Provider has no current conditions for this location");
        }
        Ok(fetched)
    }

    /// Forecast for `days` days (clamped to 1..=14), served from cache for up to ten minutes
    #[instrument(skip(self))]
    pub async fn fetch_forecast(&self, location: &str, days: u8) -> Result<Option<Forecast>> {
        let days = days.clamp(MIN_FORECAST_DAYS, MAX_FORECAST_DAYS);
        let key = CacheKey::forecast(location, days);
        if let Some(cached) = self.cache.get::<Forecast>(&key).await {
            debug!("Serving forecast from cache");
            return Ok(Some(cached));
        }

        let fetched = self.source.forecast(location.trim(), days).await?;
        if let Some(forecast) = &fetched {
            self.cache.put(key, forecast.clone()).await;
        } else {
            debug!("Provider has no forecast for this location");
        }
        Ok(fetched)
    }

    #[instrument(skip(self))]
    pub async fn fetch_time_zone(&self, query: &str) -> Result<Option<TimeZoneInfo>> {
        self.source.time_zone(query.trim()).await
    }

    #[instrument(skip(self))]
    pub async fn fetch_astronomy(
        &self,
        query: &str,
        date: NaiveDate,
    ) -> Result<Option<AstronomySnapshot>> {
        self.source.astronomy(query.trim(), date).await
    }

    #[instrument(skip(self))]
    pub async fn fetch_ip_lookup(&self, ip: &str) -> Result<Option<IpLocation>> {
        self.source.ip_lookup(ip.trim()).await
    }

    /// Free-text location search; never fails for "no match", returns an empty list instead
    #[instrument(skip(self))]
    pub async fn search_locations(&self, text: &str) -> Result<Vec<LocationMatch>> {
        let matches = self.source.search(text.trim()).await?;
        debug!(
            "Search results: {:?}",
            matches
                .iter()
                .map(|m| format!("{} ({})", m.name, m.format_coordinates()))
                .collect::<Vec<_>>()
        );
        Ok(matches)
    }
}
