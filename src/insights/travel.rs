//! Travel / comfort score
//!
//! Four sub-scores in 0..=25 (temperature, rain, UV, air quality) summed
//! into an overall 0..=100 score. Bands are checked top to bottom and the
//! first match wins.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{FactorScore, Findings, clamp_score};
use crate::models::{AirQuality, Conditions, TodaySummary};

/// Sub-score used when no air-quality data or index is available
pub const NEUTRAL_AIR_QUALITY_SCORE: u8 = 20;

/// Overall travel label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TravelLabel {
    Excellent,
    Good,
    #[serde(rename = "OK")]
    Ok,
    Poor,
}

impl TravelLabel {
    #[must_use]
    pub fn from_score(score: u8) -> Self {
        match score {
            80.. => TravelLabel::Excellent,
            60..=79 => TravelLabel::Good,
            40..=59 => TravelLabel::Ok,
            _ => TravelLabel::Poor,
        }
    }

    fn base_sentence(self) -> &'static str {
        match self {
            TravelLabel::Excellent => "Excellent day to be out and about.",
            TravelLabel::Good => "Good conditions for travel overall.",
            TravelLabel::Ok => "Travel is fine, with a few things to watch.",
            TravelLabel::Poor => "Poor conditions; consider postponing outdoor plans.",
        }
    }
}

impl fmt::Display for TravelLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TravelLabel::Excellent => "Excellent",
            TravelLabel::Good => "Good",
            TravelLabel::Ok => "OK",
            TravelLabel::Poor => "Poor",
        };
        f.write_str(label)
    }
}

/// Travel score for one city's day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TravelScore {
    /// Sum of the four sub-scores, 0-100
    pub overall: u8,
    pub label: TravelLabel,
    /// Feels-like temperature sub-score, 0-25
    pub temperature: u8,
    /// Rain chance and precipitation sub-score, 0-25
    pub rain: u8,
    /// UV index sub-score, 0-25
    pub uv: u8,
    /// Air quality sub-score, 0-25
    pub air_quality: u8,
    /// Warnings in factor order: temperature, rain, UV, air quality
    pub warnings: Vec<String>,
    /// Label sentence followed by every warning
    pub summary: String,
}

/// Per-factor justification derived from the stored sub-scores
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TravelExplanation {
    pub temperature: String,
    pub rain: String,
    pub uv: String,
    pub air_quality: String,
}

impl TravelScore {
    #[must_use]
    pub fn from_summary(summary: &TodaySummary) -> Self {
        Self::from_conditions(&summary.conditions())
    }

    #[must_use]
    pub fn from_conditions(conditions: &Conditions) -> Self {
        let temperature = temperature_score(conditions.feels_like_c);
        let rain = rain_score(conditions.rain_chance, conditions.precip_mm);
        let uv = uv_score(conditions.uv);
        let air_quality = air_quality_score(conditions.air_quality.as_ref());

        let overall = clamp_score(
            0,
            [&temperature, &rain, &uv, &air_quality]
                .iter()
                .map(|factor| i32::from(factor.score))
                .sum(),
        );
        let label = TravelLabel::from_score(overall);

        let mut findings = Findings::new();
        let (temperature, rain, uv, air_quality) = (
            take(temperature, &mut findings),
            take(rain, &mut findings),
            take(uv, &mut findings),
            take(air_quality, &mut findings),
        );
        let warnings = findings.into_messages();

        let mut summary = label.base_sentence().to_string();
        for warning in &warnings {
            summary.push(' ');
            summary.push_str(warning);
        }

        Self {
            overall,
            label,
            temperature,
            rain,
            uv,
            air_quality,
            warnings,
            summary,
        }
    }

    /// Textual justification per factor, read from the sub-score alone
    #[must_use]
    pub fn explain(&self) -> TravelExplanation {
        TravelExplanation {
            temperature: explain_band(
                self.temperature,
                "Temperature feels comfortable.",
                "Temperature is acceptable but not ideal.",
                "Temperature is uncomfortable.",
            ),
            rain: explain_band(
                self.rain,
                "Little or no rain expected.",
                "Some rain is possible.",
                "Rain is likely to get in the way.",
            ),
            uv: explain_band(
                self.uv,
                "UV exposure is low to moderate.",
                "UV is high; sun protection advised.",
                "UV is very high or extreme.",
            ),
            air_quality: explain_band(
                self.air_quality,
                "Air quality is good.",
                "Air quality is acceptable.",
                "Air quality is poor.",
            ),
        }
    }
}

fn take(factor: FactorScore, findings: &mut Findings) -> u8 {
    findings.extend(factor.findings);
    factor.score
}

fn explain_band(score: u8, high: &str, mid: &str, low: &str) -> String {
    match score {
        22.. => high,
        15..=21 => mid,
        _ => low,
    }
    .to_string()
}

/// Feels-like temperature band score
#[must_use]
pub fn temperature_score(feels_like_c: f64) -> FactorScore {
    let t = feels_like_c;
    match t {
        t if (22.0..=28.0).contains(&t) => FactorScore::clean(25),
        t if (18.0..22.0).contains(&t) => FactorScore::clean(22),
        t if t > 28.0 && t <= 32.0 => FactorScore::warn(
            20,
            "Warm day; stay hydrated and seek shade.",
        ),
        t if (15.0..18.0).contains(&t) => FactorScore::clean(18),
        t if t > 32.0 => FactorScore::warn(
            10,
            "Very hot; limit time outdoors during the afternoon.",
        ),
        t if t < 10.0 => FactorScore::warn(
            8,
            "Cold; dress in warm layers.",
        ),
        _ => FactorScore::warn(15, "Cool; bring a jacket."),
    }
}

/// Rain chance (%) and total precipitation (mm) band score
#[must_use]
pub fn rain_score(chance: u8, precip_mm: f64) -> FactorScore {
    match (chance, precip_mm) {
        (c, p) if c <= 10 && p < 0.5 => FactorScore::clean(25),
        (c, p) if c <= 30 && p < 2.0 => FactorScore::clean(22),
        (c, p) if c <= 50 && p < 4.0 => {
            FactorScore::warn(18, "Showers possible; pack an umbrella.")
        }
        (c, _) if c <= 70 => {
            FactorScore::warn(12, "Rain likely; plan indoor alternatives.")
        }
        _ => FactorScore::warn(6, "Heavy or persistent rain expected."),
    }
}

/// UV index band score
#[must_use]
pub fn uv_score(uv: f64) -> FactorScore {
    match uv {
        u if u <= 2.0 => FactorScore::clean(25),
        u if u <= 5.0 => FactorScore::clean(22),
        u if u <= 7.0 => FactorScore::warn(16, "High UV; use sunscreen."),
        u if u <= 10.0 => FactorScore::warn(
            10,
            "Very high UV; avoid direct sun around midday.",
        ),
        _ => FactorScore::warn(6, "Extreme UV; minimise sun exposure."),
    }
}

/// Air quality score from the US EPA index, capped by PM2.5
#[must_use]
pub fn air_quality_score(air_quality: Option<&AirQuality>) -> FactorScore {
    let Some(air_quality) = air_quality else {
        return FactorScore::clean(NEUTRAL_AIR_QUALITY_SCORE);
    };

    let mut findings = Findings::new();
    let base = match air_quality.us_epa_index {
        Some(1) => 25,
        Some(2) => 22,
        Some(3) => 18,
        Some(4) => 10,
        Some(5) => 6,
        Some(6) => 2,
        _ => NEUTRAL_AIR_QUALITY_SCORE,
    };
    if air_quality.epa_at_least(4) {
        findings.push(
            "Unhealthy air quality; sensitive groups should stay indoors.",
        );
    } else if air_quality.epa_at_least(3) {
        findings.push(
            "Air quality is moderate; sensitive groups take care.",
        );
    }

    let cap = if air_quality.pm2_5_above(55.0) {
        findings.push(
            "Very high fine particulate levels; wear a mask outdoors.",
        );
        6
    } else if air_quality.pm2_5_above(35.0) {
        findings.push(
            "Elevated fine particulate levels.",
        );
        10
    } else {
        25
    };

    FactorScore {
        score: base.min(cap),
        findings,
    }
}
