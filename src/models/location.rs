//! Location-centric provider results

use serde::{Deserialize, Serialize};

/// Timezone lookup result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeZoneInfo {
    pub name: String,
    pub region: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
    /// IANA timezone id, e.g. "Europe/London"
    pub tz_id: String,
    pub local_time: String,
}

/// IP geolocation result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IpLocation {
    pub ip: String,
    /// "ipv4" or "ipv6"
    pub ip_type: String,
    pub continent_code: String,
    pub continent_name: String,
    pub country_code: String,
    pub country_name: String,
    pub is_eu: bool,
    pub city: String,
    pub region: String,
    pub latitude: f64,
    pub longitude: f64,
    pub tz_id: String,
    pub local_time: Option<String>,
}

/// One match of a free-text location search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationMatch {
    pub id: i64,
    pub name: String,
    pub region: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Provider slug, usable as a query for the other endpoints
    pub url: String,
}

impl LocationMatch {
    /// Format location as coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}
