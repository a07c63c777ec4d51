use axum::{
    Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    Result, WeatherwiseError,
    insights::{
        Advice, HealthCondition, HealthInsight, Occupation, OccupationInsight, TimeWindows,
        TravelExplanation, TravelScore,
    },
    location::LocationQuery,
    models::{
        AstronomySnapshot, Forecast, IpLocation, LocationMatch, TimeZoneInfo, TodaySummary,
        WeatherSnapshot,
    },
    summary::SummaryAggregator,
    weather::ProviderClient,
};

const DEFAULT_FORECAST_DAYS: u8 = 3;
/// Lets the provider geolocate the caller's own address
const AUTO_IP: &str = "auto:ip";

/// Shared handler state; clones share the provider cache
#[derive(Clone)]
pub struct AppState {
    client: ProviderClient,
    summaries: SummaryAggregator,
}

impl AppState {
    pub fn new(client: ProviderClient) -> Self {
        Self {
            summaries: SummaryAggregator::new(client.clone()),
            client,
        }
    }
}

#[derive(Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
    pub status: u16,
}

impl IntoResponse for WeatherwiseError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            warn!("Request failed: {}", self);
        } else {
            debug!("Request rejected: {}", self);
        }
        let body = ApiError {
            error: self.user_message(),
            status: status.as_u16(),
        };
        (status, Json(body)).into_response()
    }
}

#[derive(Deserialize)]
pub struct LocationParams {
    pub location: String,
}

#[derive(Deserialize)]
pub struct ForecastParams {
    pub location: String,
    pub days: Option<u8>,
}

#[derive(Deserialize)]
pub struct AstronomyParams {
    pub location: String,
    pub date: Option<NaiveDate>,
}

#[derive(Deserialize)]
pub struct IpParams {
    pub ip: Option<String>,
}

#[derive(Deserialize)]
pub struct SearchParams {
    pub q: String,
}

#[derive(Deserialize)]
pub struct CityParams {
    pub city: String,
}

#[derive(Deserialize)]
pub struct OccupationParams {
    pub city: String,
    pub occupation: Option<String>,
}

#[derive(Deserialize)]
pub struct HealthParams {
    pub city: String,
    pub condition: String,
}

#[derive(Serialize, Deserialize)]
pub struct TravelResponse {
    #[serde(flatten)]
    pub score: TravelScore,
    pub explanation: TravelExplanation,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/weather/current", get(get_current))
        .route("/weather/forecast", get(get_forecast))
        .route("/weather/timezone", get(get_time_zone))
        .route("/weather/astronomy", get(get_astronomy))
        .route("/weather/ip", get(get_ip_lookup))
        .route("/weather/search", get(search_locations))
        .route("/summary/today", get(get_today_summary))
        .route("/insights/travel", get(get_travel_score))
        .route("/insights/advice", get(get_advice))
        .route("/insights/occupation", get(get_occupation_insight))
        .route("/insights/health", get(get_health_insight))
        .route("/insights/time-window", get(get_time_windows))
        .with_state(state)
}

fn found<T>(value: Option<T>, what: &str, query: &LocationQuery) -> Result<Json<T>> {
    value
        .map(Json)
        .ok_or_else(|| WeatherwiseError::not_found(format!("No {what} found for '{query}'")))
}

async fn today(state: &AppState, city: &str) -> Result<TodaySummary> {
    let query = LocationQuery::parse(city)?;
    state
        .summaries
        .get_today_summary(&query.provider_query())
        .await
        .ok_or_else(|| {
            WeatherwiseError::not_found(format!("No weather summary available for '{query}'"))
        })
}

async fn get_current(
    State(state): State<AppState>,
    Query(params): Query<LocationParams>,
) -> Result<Json<WeatherSnapshot>> {
    let query = LocationQuery::parse(&params.location)?;
    let current = state.client.fetch_current(&query.provider_query()).await?;
    found(current, "current conditions", &query)
}

async fn get_forecast(
    State(state): State<AppState>,
    Query(params): Query<ForecastParams>,
) -> Result<Json<Forecast>> {
    let query = LocationQuery::parse(&params.location)?;
    let days = params.days.unwrap_or(DEFAULT_FORECAST_DAYS);
    let forecast = state
        .client
        .fetch_forecast(&query.provider_query(), days)
        .await?;
    found(forecast, "forecast", &query)
}

async fn get_time_zone(
    State(state): State<AppState>,
    Query(params): Query<LocationParams>,
) -> Result<Json<TimeZoneInfo>> {
    let query = LocationQuery::parse(&params.location)?;
    let time_zone = state.client.fetch_time_zone(&query.provider_query()).await?;
    found(time_zone, "time zone", &query)
}

async fn get_astronomy(
    State(state): State<AppState>,
    Query(params): Query<AstronomyParams>,
) -> Result<Json<AstronomySnapshot>> {
    let query = LocationQuery::parse(&params.location)?;
    let date = params.date.unwrap_or_else(|| Utc::now().date_naive());
    let astronomy = state
        .client
        .fetch_astronomy(&query.provider_query(), date)
        .await?;
    found(astronomy, "astronomy data", &query)
}

async fn get_ip_lookup(
    State(state): State<AppState>,
    Query(params): Query<IpParams>,
) -> Result<Json<IpLocation>> {
    let ip = params
        .ip
        .filter(|ip| !ip.trim().is_empty())
        .unwrap_or_else(|| AUTO_IP.to_string());
    state
        .client
        .fetch_ip_lookup(&ip)
        .await?
        .map(Json)
        .ok_or_else(|| WeatherwiseError::not_found(format!("No location found for IP '{ip}'")))
}

async fn search_locations(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<LocationMatch>>> {
    if params.q.trim().is_empty() {
        return Err(WeatherwiseError::validation("Search text cannot be empty"));
    }
    Ok(Json(state.client.search_locations(&params.q).await?))
}

async fn get_today_summary(
    State(state): State<AppState>,
    Query(params): Query<CityParams>,
) -> Result<Json<TodaySummary>> {
    Ok(Json(today(&state, &params.city).await?))
}

async fn get_travel_score(
    State(state): State<AppState>,
    Query(params): Query<CityParams>,
) -> Result<Json<TravelResponse>> {
    let summary = today(&state, &params.city).await?;
    let score = TravelScore::from_summary(&summary);
    let explanation = score.explain();
    Ok(Json(TravelResponse { score, explanation }))
}

async fn get_advice(
    State(state): State<AppState>,
    Query(params): Query<CityParams>,
) -> Result<Json<Advice>> {
    let summary = today(&state, &params.city).await?;
    Ok(Json(Advice::from_summary(&summary)))
}

async fn get_occupation_insight(
    State(state): State<AppState>,
    Query(params): Query<OccupationParams>,
) -> Result<Json<OccupationInsight>> {
    let occupation = params
        .occupation
        .as_deref()
        .map_or(Occupation::General, |name| {
            name.parse().unwrap_or(Occupation::General)
        });
    let summary = today(&state, &params.city).await?;
    Ok(Json(OccupationInsight::from_summary(&summary, occupation)))
}

async fn get_health_insight(
    State(state): State<AppState>,
    Query(params): Query<HealthParams>,
) -> Result<Json<HealthInsight>> {
    let condition: HealthCondition = params.condition.parse()?;
    let summary = today(&state, &params.city).await?;
    Ok(Json(HealthInsight::from_summary(&summary, condition)))
}

async fn get_time_windows(
    State(state): State<AppState>,
    Query(params): Query<CityParams>,
) -> Result<Json<TimeWindows>> {
    let summary = today(&state, &params.city).await?;
    Ok(Json(TimeWindows::from_summary(&summary)))
}
