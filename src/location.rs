//! Location query parsing and normalization
//!
//! The provider accepts a city name, `City,CountryCode` or `lat,lon` in its
//! `q` parameter. Queries that mean the same place must normalize to the same
//! cache key, so names are case-folded and coordinates are re-rendered with a
//! fixed precision and a `.` decimal separator.

use crate::{Result, WeatherwiseError};
use std::fmt;

/// A parsed location query
#[derive(Debug, Clone, PartialEq)]
pub enum LocationQuery {
    /// Coordinates (latitude, longitude)
    Coordinates(f64, f64),
    /// Location name, optionally with a country code ("Paris,FR")
    Name(String),
}

impl LocationQuery {
    /// Parse user input. Empty input is rejected, anything that is not a valid
    /// coordinate pair is treated as a name.
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        if input.is_empty() {
            return Err(WeatherwiseError::validation("Location cannot be empty"));
        }

        if let Some((lat, lon)) = parse_coordinates(input) {
            return Ok(LocationQuery::Coordinates(lat, lon));
        }

        Ok(LocationQuery::Name(input.to_string()))
    }

    /// Cache key form of this query
    #[must_use]
    pub fn normalized_key(&self) -> String {
        match self {
            LocationQuery::Coordinates(lat, lon) => format!("{lat:.4},{lon:.4}"),
            LocationQuery::Name(name) => name
                .split(',')
                .map(|part| {
                    part.split_whitespace()
                        .collect::<Vec<_>>()
                        .join(" ")
                        .to_lowercase()
                })
                .collect::<Vec<_>>()
                .join(","),
        }
    }

    /// Value for the provider's `q` parameter
    #[must_use]
    pub fn provider_query(&self) -> String {
        match self {
            LocationQuery::Coordinates(lat, lon) => format!("{lat},{lon}"),
            LocationQuery::Name(name) => name.clone(),
        }
    }
}

impl fmt::Display for LocationQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocationQuery::Coordinates(lat, lon) => write!(f, "{lat:.4}, {lon:.4}"),
            LocationQuery::Name(name) => write!(f, "{name}"),
        }
    }
}

/// Normalize a raw location string for use in cache keys.
/// Unparseable input falls back to its trimmed, lower-cased form.
#[must_use]
pub fn normalize_location(input: &str) -> String {
    LocationQuery::parse(input)
        .map(|query| query.normalized_key())
        .unwrap_or_else(|_| input.trim().to_lowercase())
}

/// Parse coordinates from a string like "46.8182,8.2275" or "46.8182 8.2275"
fn parse_coordinates(input: &str) -> Option<(f64, f64)> {
    let parts: Vec<&str> = input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .collect();

    let [lat, lon] = parts.as_slice() else {
        return None;
    };

    let lat = lat.parse::<f64>().ok()?;
    let lon = lon.parse::<f64>().ok()?;

    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
        return None;
    }

    Some((lat, lon))
}
