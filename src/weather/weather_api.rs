//! WeatherAPI.com HTTP source
//!
//! Retries and backoff for transient failures are delegated to the
//! `reqwest-retry` middleware; this module only translates provider
//! statuses and payloads into the crate's result types.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::StatusCode;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use serde::de::DeserializeOwned;
use tracing::{debug, error, info, instrument, warn};

use super::WeatherSource;
use crate::config::ProviderConfig;
use crate::models::weatherapi::{
    AstronomyResponse, CurrentResponse, ErrorResponse, ForecastResponse, IpResponse,
    SearchResultDto, TimeZoneResponse,
};
use crate::models::{
    AstronomySnapshot, Forecast, IpLocation, LocationMatch, TimeZoneInfo, WeatherSnapshot,
};
use crate::{Result, WeatherwiseError};

/// HTTP client for the WeatherAPI.com REST endpoints
pub struct WeatherApiSource {
    client: ClientWithMiddleware,
    base_url: String,
    api_key: String,
}

impl WeatherApiSource {
    /// Create a new source from provider settings
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| WeatherwiseError::config("Weather provider API key is missing"))?;

        let timeout = Duration::from_secs(config.timeout_seconds.into());
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("Weatherwise/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| WeatherwiseError::config(format!("Failed to create HTTP client: {e}")))?;

        let retry_policy = ExponentialBackoff::builder().build_with_max_retries(config.max_retries);
        let client = ClientBuilder::new(client)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn endpoint_url(&self, endpoint: &str, params: &[(&str, &str)]) -> String {
        let mut url = format!(
            "{}/{}?key={}",
            self.base_url,
            endpoint,
            urlencoding::encode(&self.api_key)
        );
        for (name, value) in params {
            url.push('&');
            url.push_str(name);
            url.push('=');
            url.push_str(&urlencoding::encode(value));
        }
        url
    }

    /// GET an endpoint and decode its JSON body.
    ///
    /// 400 and 404 mean the provider could not resolve the query and map to
    /// `Ok(None)`. Any other non-success status or an undecodable body is an
    /// upstream failure; a timeout is a cancellation.
    #[instrument(skip(self, params))]
    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<Option<T>> {
        let url = self.endpoint_url(endpoint, params);
        let request_start = Instant::now();

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| request_error(endpoint, &e))?;

        let status = response.status();
        debug!(
            "HTTP response received: {} in {:.3}s",
            status,
            request_start.elapsed().as_secs_f64()
        );

        if status == StatusCode::BAD_REQUEST || status == StatusCode::NOT_FOUND {
            let body = response.text().await.unwrap_or_default();
            let reason = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| format!("{} (code {})", e.error.message, e.error.code))
                .unwrap_or_else(|_| status.to_string());
            info!("Provider could not resolve query: {}", reason);
            return Ok(None);
        }

        if !status.is_success() {
            let error_msg = format!(
                "{endpoint} failed with status: {} - {}",
                status,
                status.canonical_reason().unwrap_or("Unknown error")
            );
            warn!("{}", error_msg);
            return Err(WeatherwiseError::upstream(error_msg, Some(status.as_u16())));
        }

        let body = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                WeatherwiseError::cancelled(format!("{endpoint} body read timed out"))
            } else {
                WeatherwiseError::upstream(format!("{endpoint} body read failed: {e}"), None)
            }
        })?;

        let parsed = serde_json::from_slice::<T>(&body).map_err(|e| {
            error!("Failed to parse {} response: {}", endpoint, e);
            WeatherwiseError::upstream(format!("Invalid {endpoint} payload: {e}"), None)
        })?;

        let total_duration = request_start.elapsed();
        if total_duration.as_secs() > 5 {
            warn!(
                "Slow provider response detected: {:.3}s",
                total_duration.as_secs_f64()
            );
        }

        Ok(Some(parsed))
    }
}

fn request_error(endpoint: &str, err: &reqwest_middleware::Error) -> WeatherwiseError {
    if is_timeout(err) {
        warn!("{} request timed out", endpoint);
        WeatherwiseError::cancelled(format!("{endpoint} request timed out"))
    } else {
        error!("Network error calling {}: {}", endpoint, err);
        WeatherwiseError::upstream(format!("Network error calling {endpoint}: {err}"), None)
    }
}

/// The retry middleware wraps the final transport error once retries are exhausted
fn is_timeout(err: &reqwest_middleware::Error) -> bool {
    match err {
        reqwest_middleware::Error::Reqwest(e) => e.is_timeout(),
        reqwest_middleware::Error::Middleware(e) => e.chain().any(|cause| {
            cause
                .downcast_ref::<reqwest::Error>()
                .is_some_and(reqwest::Error::is_timeout)
        }),
    }
}

#[async_trait]
impl WeatherSource for WeatherApiSource {
    async fn current(&self, query: &str) -> Result<Option<WeatherSnapshot>> {
        let response: Option<CurrentResponse> = self
            .get_json("current.json", &[("q", query), ("aqi", "yes")])
            .await?;
        Ok(response.map(WeatherSnapshot::from))
    }

    async fn forecast(&self, query: &str, days: u8) -> Result<Option<Forecast>> {
        let days = days.to_string();
        let response: Option<ForecastResponse> = self
            .get_json(
                "forecast.json",
                &[("q", query), ("days", days.as_str()), ("aqi", "yes"), ("alerts", "no")],
            )
            .await?;
        Ok(response.map(Forecast::from))
    }

    async fn time_zone(&self, query: &str) -> Result<Option<TimeZoneInfo>> {
        let response: Option<TimeZoneResponse> =
            self.get_json("timezone.json", &[("q", query)]).await?;
        Ok(response.map(TimeZoneInfo::from))
    }

    async fn astronomy(&self, query: &str, date: NaiveDate) -> Result<Option<AstronomySnapshot>> {
        let dt = date.format("%Y-%m-%d").to_string();
        let response: Option<AstronomyResponse> = self
            .get_json("astronomy.json", &[("q", query), ("dt", dt.as_str())])
            .await?;
        Ok(response.map(|r| r.into_snapshot(date)))
    }

    async fn ip_lookup(&self, ip: &str) -> Result<Option<IpLocation>> {
        let response: Option<IpResponse> = self.get_json("ip.json", &[("q", ip)]).await?;
        Ok(response.map(IpLocation::from))
    }

    async fn search(&self, text: &str) -> Result<Vec<LocationMatch>> {
        let response: Option<Vec<SearchResultDto>> =
            self.get_json("search.json", &[("q", text)]).await?;
        Ok(response
            .unwrap_or_default()
            .into_iter()
            .map(LocationMatch::from)
            .collect())
    }
}
