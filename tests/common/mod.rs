//! Shared provider payloads and mock server helpers for integration tests.

#![allow(dead_code)]

use serde_json::{Value, json};
use weatherwise::config::ProviderConfig;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const API_KEY: &str = "test-key";

pub fn provider_config(server: &MockServer) -> ProviderConfig {
    ProviderConfig {
        api_key: Some(API_KEY.to_string()),
        base_url: server.uri(),
        timeout_seconds: 5,
        max_retries: 0,
    }
}

pub fn location(name: &str) -> Value {
    json!({
        "name": name,
        "region": "City of London, Greater London",
        "country": "United Kingdom",
        "lat": 51.52,
        "lon": -0.11,
        "tz_id": "Europe/London",
        "localtime_epoch": 1717232400,
        "localtime": "2024-06-01 10:00"
    })
}

pub fn air_quality(epa: u8, pm2_5: f64) -> Value {
    json!({
        "co": 230.3,
        "no2": 13.5,
        "o3": 60.1,
        "so2": 2.1,
        "pm2_5": pm2_5,
        "pm10": 7.9,
        "us-epa-index": epa,
        "gb-defra-index": 1
    })
}

pub fn current(name: &str) -> Value {
    json!({
        "location": location(name),
        "current": {
            "last_updated": "2024-06-01 09:45",
            "temp_c": 18.0,
            "temp_f": 64.4,
            "is_day": 1,
            "condition": { "text": "Partly cloudy", "icon": "//cdn.weatherapi.com/116.png", "code": 1003 },
            "wind_mph": 8.1,
            "wind_kph": 13.0,
            "wind_degree": 250,
            "wind_dir": "WSW",
            "pressure_mb": 1016.0,
            "pressure_in": 30.0,
            "precip_mm": 0.0,
            "humidity": 63,
            "cloud": 50,
            "feelslike_c": 18.0,
            "feelslike_f": 64.4,
            "vis_km": 10.0,
            "vis_miles": 6.0,
            "uv": 4.0,
            "gust_mph": 11.0,
            "gust_kph": 17.7,
            "air_quality": air_quality(1, 5.2)
        }
    })
}

pub fn forecast(name: &str, days: usize) -> Value {
    let forecastday: Vec<Value> = (0..days)
        .map(|offset| {
            json!({
                "date": format!("2024-06-{:02}", offset + 1),
                "date_epoch": 1717200000 + offset * 86400,
                "day": {
                    "maxtemp_c": 21.0,
                    "maxtemp_f": 69.8,
                    "mintemp_c": 12.0,
                    "mintemp_f": 53.6,
                    "avgtemp_c": 16.5,
                    "avgtemp_f": 61.7,
                    "maxwind_mph": 10.3,
                    "maxwind_kph": 16.6,
                    "totalprecip_mm": 0.0,
                    "totalprecip_in": 0.0,
                    "avgvis_km": 10.0,
                    "avghumidity": 66.0,
                    "daily_will_it_rain": 0,
                    "daily_chance_of_rain": 20,
                    "daily_will_it_snow": 0,
                    "daily_chance_of_snow": 0,
                    "condition": { "text": "Sunny", "icon": "//cdn.weatherapi.com/113.png", "code": 1000 },
                    "uv": 5.0
                }
            })
        })
        .collect();

    json!({
        "location": location(name),
        "current": current(name)["current"].clone(),
        "forecast": { "forecastday": forecastday }
    })
}

pub fn astronomy(name: &str) -> Value {
    json!({
        "location": location(name),
        "astronomy": {
            "astro": {
                "sunrise": "04:45 AM",
                "sunset": "09:10 PM",
                "moonrise": "02:10 AM",
                "moonset": "04:30 PM",
                "moon_phase": "Waning Crescent",
                "moon_illumination": "23",
                "is_moon_up": 0,
                "is_sun_up": 1
            }
        }
    })
}

pub fn no_location_error() -> Value {
    json!({ "error": { "code": 1006, "message": "No matching location found." } })
}

/// Mount current, 1-day forecast and astronomy answers for `name`
pub async fn mount_today(server: &MockServer, name: &str) {
    Mock::given(method("GET"))
        .and(path("/current.json"))
        .and(query_param("q", name))
        .respond_with(ResponseTemplate::new(200).set_body_json(current(name)))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/forecast.json"))
        .and(query_param("q", name))
        .and(query_param("days", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast(name, 1)))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/astronomy.json"))
        .and(query_param("q", name))
        .respond_with(ResponseTemplate::new(200).set_body_json(astronomy(name)))
        .mount(server)
        .await;
}
