//! WeatherAPI response structures
//!
//! Mirrors the JSON the provider returns from `current.json`,
//! `forecast.json`, `astronomy.json`, `timezone.json`, `ip.json` and
//! `search.json`, and converts it into the domain models.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};

use super::{
    AirQuality, AstronomySnapshot, DailyForecast, Forecast, IpLocation, LocationMatch,
    TimeZoneInfo, WeatherSnapshot, Wind,
};

#[derive(Debug, Deserialize)]
pub struct LocationDto {
    pub name: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub country: String,
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub tz_id: String,
    #[serde(default)]
    pub localtime: String,
}

#[derive(Debug, Deserialize)]
pub struct ConditionDto {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct AirQualityDto {
    pub co: Option<f64>,
    pub no2: Option<f64>,
    pub o3: Option<f64>,
    pub so2: Option<f64>,
    pub pm2_5: Option<f64>,
    pub pm10: Option<f64>,
    #[serde(rename = "us-epa-index")]
    pub us_epa_index: Option<u8>,
    #[serde(rename = "gb-defra-index")]
    pub gb_defra_index: Option<u8>,
}

#[derive(Debug, Deserialize)]
pub struct CurrentDto {
    pub temp_c: f64,
    pub temp_f: f64,
    #[serde(deserialize_with = "flag")]
    pub is_day: bool,
    pub condition: ConditionDto,
    pub wind_mph: f64,
    pub wind_kph: f64,
    pub wind_degree: u16,
    pub wind_dir: String,
    pub pressure_mb: f64,
    pub pressure_in: f64,
    pub humidity: u8,
    pub cloud: u8,
    pub feelslike_c: f64,
    pub feelslike_f: f64,
    pub vis_km: f64,
    pub vis_miles: f64,
    pub uv: f64,
    #[serde(default)]
    pub gust_mph: f64,
    #[serde(default)]
    pub gust_kph: f64,
    pub air_quality: Option<AirQualityDto>,
}

/// `current.json`
#[derive(Debug, Deserialize)]
pub struct CurrentResponse {
    pub location: LocationDto,
    pub current: CurrentDto,
}

#[derive(Debug, Deserialize)]
pub struct DayDto {
    pub maxtemp_c: f64,
    pub maxtemp_f: f64,
    pub mintemp_c: f64,
    pub mintemp_f: f64,
    pub avgtemp_c: f64,
    pub avgtemp_f: f64,
    pub maxwind_mph: f64,
    pub maxwind_kph: f64,
    pub totalprecip_mm: f64,
    pub totalprecip_in: f64,
    #[serde(default)]
    pub avgvis_km: f64,
    #[serde(default)]
    pub avghumidity: f64,
    #[serde(default)]
    pub daily_chance_of_rain: u8,
    #[serde(default)]
    pub daily_chance_of_snow: u8,
    pub condition: ConditionDto,
    pub uv: f64,
    pub air_quality: Option<AirQualityDto>,
}

#[derive(Debug, Deserialize)]
pub struct ForecastDayDto {
    pub date: NaiveDate,
    pub day: DayDto,
}

#[derive(Debug, Deserialize)]
pub struct ForecastDaysDto {
    pub forecastday: Vec<ForecastDayDto>,
}

/// `forecast.json`
#[derive(Debug, Deserialize)]
pub struct ForecastResponse {
    pub location: LocationDto,
    pub forecast: ForecastDaysDto,
}

#[derive(Debug, Deserialize)]
pub struct AstroDto {
    pub sunrise: String,
    pub sunset: String,
    pub moonrise: String,
    pub moonset: String,
    pub moon_phase: String,
    #[serde(deserialize_with = "number_or_string")]
    pub moon_illumination: f64,
    #[serde(default, deserialize_with = "flag")]
    pub is_moon_up: bool,
    #[serde(default, deserialize_with = "flag")]
    pub is_sun_up: bool,
}

#[derive(Debug, Deserialize)]
pub struct AstronomyDto {
    pub astro: AstroDto,
}

/// `astronomy.json`
#[derive(Debug, Deserialize)]
pub struct AstronomyResponse {
    pub location: LocationDto,
    pub astronomy: AstronomyDto,
}

/// `timezone.json`
#[derive(Debug, Deserialize)]
pub struct TimeZoneResponse {
    pub location: LocationDto,
}

/// `ip.json`
#[derive(Debug, Deserialize)]
pub struct IpResponse {
    pub ip: String,
    #[serde(rename = "type", default)]
    pub ip_type: String,
    #[serde(default)]
    pub continent_code: String,
    #[serde(default)]
    pub continent_name: String,
    #[serde(default)]
    pub country_code: String,
    #[serde(default)]
    pub country_name: String,
    #[serde(default, deserialize_with = "flag")]
    pub is_eu: bool,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub region: String,
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub tz_id: String,
    pub localtime: Option<String>,
}

/// One element of the `search.json` array
#[derive(Debug, Deserialize)]
pub struct SearchResultDto {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub country: String,
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub url: String,
}

/// Provider error body, e.g. `{"error":{"code":1006,"message":"No matching location found."}}`
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    pub code: i64,
    pub message: String,
}

/// Accepts `0`/`1`, `true`/`false` and their string forms.
fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
        Text(String),
    }

    match Flag::deserialize(deserializer)? {
        Flag::Bool(value) => Ok(value),
        Flag::Int(value) => Ok(value != 0),
        Flag::Text(value) => match value.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" => Ok(true),
            "0" | "false" | "no" | "" => Ok(false),
            other => Err(serde::de::Error::custom(format!("invalid flag '{other}'"))),
        },
    }
}

/// Moon illumination arrives as a number or as a numeric string.
fn number_or_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(f64),
        Text(String),
    }

    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(value) => Ok(value),
        NumberOrString::Text(value) => value
            .trim()
            .parse::<f64>()
            .map_err(|e| serde::de::Error::custom(format!("invalid number '{value}': {e}"))),
    }
}

impl From<AirQualityDto> for AirQuality {
    fn from(dto: AirQualityDto) -> Self {
        Self {
            co: dto.co,
            no2: dto.no2,
            o3: dto.o3,
            so2: dto.so2,
            pm2_5: dto.pm2_5,
            pm10: dto.pm10,
            us_epa_index: dto.us_epa_index.filter(|index| (1..=6).contains(index)),
            gb_defra_index: dto.gb_defra_index.filter(|index| (1..=10).contains(index)),
        }
    }
}

impl From<CurrentResponse> for WeatherSnapshot {
    fn from(response: CurrentResponse) -> Self {
        let CurrentResponse { location, current } = response;
        Self {
            city: location.name,
            region: location.region,
            country: location.country,
            local_time: location.localtime,
            temp_c: current.temp_c,
            temp_f: current.temp_f,
            feels_like_c: current.feelslike_c,
            feels_like_f: current.feelslike_f,
            humidity: current.humidity,
            pressure_mb: current.pressure_mb,
            pressure_in: current.pressure_in,
            cloud: current.cloud,
            uv: current.uv,
            wind: Wind {
                kph: current.wind_kph,
                mph: current.wind_mph,
                degree: current.wind_degree,
                direction: current.wind_dir,
                gust_kph: current.gust_kph,
                gust_mph: current.gust_mph,
            },
            visibility_km: current.vis_km,
            visibility_miles: current.vis_miles,
            is_day: current.is_day,
            condition: current.condition.text,
            air_quality: current.air_quality.map(AirQuality::from),
        }
    }
}

impl From<ForecastDayDto> for DailyForecast {
    fn from(dto: ForecastDayDto) -> Self {
        let day = dto.day;
        Self {
            date: dto.date,
            max_temp_c: day.maxtemp_c,
            max_temp_f: day.maxtemp_f,
            min_temp_c: day.mintemp_c,
            min_temp_f: day.mintemp_f,
            avg_temp_c: day.avgtemp_c,
            avg_temp_f: day.avgtemp_f,
            total_precip_mm: day.totalprecip_mm,
            total_precip_in: day.totalprecip_in,
            chance_of_rain: day.daily_chance_of_rain.min(100),
            chance_of_snow: day.daily_chance_of_snow.min(100),
            max_wind_kph: day.maxwind_kph,
            max_wind_mph: day.maxwind_mph,
            uv: day.uv,
            avg_visibility_km: day.avgvis_km,
            avg_humidity: day.avghumidity,
            condition: day.condition.text,
            air_quality: day.air_quality.map(AirQuality::from),
        }
    }
}

impl From<ForecastResponse> for Forecast {
    fn from(response: ForecastResponse) -> Self {
        Self {
            city: response.location.name,
            region: response.location.region,
            country: response.location.country,
            days: response
                .forecast
                .forecastday
                .into_iter()
                .map(DailyForecast::from)
                .collect(),
        }
    }
}

impl AstronomyResponse {
    /// The astronomy payload does not echo the requested date back
    #[must_use]
    pub fn into_snapshot(self, date: NaiveDate) -> AstronomySnapshot {
        let astro = self.astronomy.astro;
        AstronomySnapshot {
            date,
            sunrise: astro.sunrise,
            sunset: astro.sunset,
            moonrise: astro.moonrise,
            moonset: astro.moonset,
            moon_phase: astro.moon_phase,
            moon_illumination: astro.moon_illumination,
            is_sun_up: astro.is_sun_up,
            is_moon_up: astro.is_moon_up,
        }
    }
}

impl From<TimeZoneResponse> for TimeZoneInfo {
    fn from(response: TimeZoneResponse) -> Self {
        let location = response.location;
        Self {
            name: location.name,
            region: location.region,
            country: location.country,
            latitude: location.lat,
            longitude: location.lon,
            tz_id: location.tz_id,
            local_time: location.localtime,
        }
    }
}

impl From<IpResponse> for IpLocation {
    fn from(response: IpResponse) -> Self {
        Self {
            ip: response.ip,
            ip_type: response.ip_type,
            continent_code: response.continent_code,
            continent_name: response.continent_name,
            country_code: response.country_code,
            country_name: response.country_name,
            is_eu: response.is_eu,
            city: response.city,
            region: response.region,
            latitude: response.lat,
            longitude: response.lon,
            tz_id: response.tz_id,
            local_time: response.localtime,
        }
    }
}

impl From<SearchResultDto> for LocationMatch {
    fn from(dto: SearchResultDto) -> Self {
        Self {
            id: dto.id,
            name: dto.name,
            region: dto.region,
            country: dto.country,
            latitude: dto.lat,
            longitude: dto.lon,
            url: dto.url,
        }
    }
}
