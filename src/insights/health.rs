//! Health-condition risk for the day
//!
//! Scored as risk, so higher is worse: a per-condition baseline plus fixed
//! points for every trigger that fires.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{Findings, clamp_score};
use crate::WeatherwiseError;
use crate::models::{Conditions, TodaySummary};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthCondition {
    Asthma,
    Heart,
    Migraine,
    HeatSensitivity,
    ColdSensitivity,
    Elderly,
}

impl HealthCondition {
    pub const ALL: [HealthCondition; 6] = [
        HealthCondition::Asthma,
        HealthCondition::Heart,
        HealthCondition::Migraine,
        HealthCondition::HeatSensitivity,
        HealthCondition::ColdSensitivity,
        HealthCondition::Elderly,
    ];

    #[must_use]
    pub fn baseline(self) -> i32 {
        match self {
            HealthCondition::Asthma => 30,
            HealthCondition::Heart | HealthCondition::Elderly => 35,
            HealthCondition::Migraine => 25,
            HealthCondition::HeatSensitivity => 40,
            HealthCondition::ColdSensitivity => 20,
        }
    }

    /// Fixed part of the day least likely to aggravate the condition
    #[must_use]
    pub fn safe_window(self) -> &'static str {
        match self {
            HealthCondition::Asthma => "Late morning (9:00–11:00), after rush-hour traffic",
            HealthCondition::Heart => "Early morning (6:00–9:00)",
            HealthCondition::Migraine => "Morning (8:00–11:00), away from strong glare",
            HealthCondition::HeatSensitivity => "Early morning (5:00–8:00) or evening after 19:00",
            HealthCondition::ColdSensitivity => "Midday (11:00–15:00)",
            HealthCondition::Elderly => "Mid-morning (8:00–11:00)",
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            HealthCondition::Asthma => "asthma",
            HealthCondition::Heart => "heart",
            HealthCondition::Migraine => "migraine",
            HealthCondition::HeatSensitivity => "heat_sensitivity",
            HealthCondition::ColdSensitivity => "cold_sensitivity",
            HealthCondition::Elderly => "elderly",
        }
    }
}

impl fmt::Display for HealthCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HealthCondition {
    type Err = WeatherwiseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "asthma" => Ok(HealthCondition::Asthma),
            "heart" | "heart_condition" | "cardiac" => Ok(HealthCondition::Heart),
            "migraine" => Ok(HealthCondition::Migraine),
            "heat_sensitivity" | "heat" => Ok(HealthCondition::HeatSensitivity),
            "cold_sensitivity" | "cold" => Ok(HealthCondition::ColdSensitivity),
            "elderly" | "senior" => Ok(HealthCondition::Elderly),
            _ => Err(WeatherwiseError::validation(format!(
                "Unknown health condition '{}'",
                s.trim()
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    #[must_use]
    pub fn from_score(score: u8) -> Self {
        match score {
            75.. => RiskLevel::High,
            50..=74 => RiskLevel::Moderate,
            _ => RiskLevel::Low,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthInsight {
    pub condition: HealthCondition,
    /// Baseline plus triggered penalties, 0-100, higher is worse
    pub risk_score: u8,
    pub risk_level: RiskLevel,
    pub triggers: Vec<String>,
    pub recommendations: Vec<String>,
    pub safe_window: String,
}

impl HealthInsight {
    #[must_use]
    pub fn from_summary(summary: &TodaySummary, condition: HealthCondition) -> Self {
        Self::from_conditions(&summary.conditions(), condition)
    }

    #[must_use]
    pub fn from_conditions(conditions: &Conditions, condition: HealthCondition) -> Self {
        let mut risk = Risk::default();
        match condition {
            HealthCondition::Asthma => asthma(conditions, &mut risk),
            HealthCondition::Heart => heart(conditions, &mut risk),
            HealthCondition::Migraine => migraine(conditions, &mut risk),
            HealthCondition::HeatSensitivity => heat_sensitivity(conditions, &mut risk),
            HealthCondition::ColdSensitivity => cold_sensitivity(conditions, &mut risk),
            HealthCondition::Elderly => elderly(conditions, &mut risk),
        }

        if risk.recommendations.is_empty() {
            risk.recommendations
                .push("No specific precautions needed today.".to_string());
        }

        let risk_score = clamp_score(condition.baseline(), risk.points);
        Self {
            condition,
            risk_score,
            risk_level: RiskLevel::from_score(risk_score),
            triggers: risk.triggers.into_messages(),
            recommendations: risk.recommendations,
            safe_window: condition.safe_window().to_string(),
        }
    }
}

#[derive(Default)]
struct Risk {
    triggers: Findings,
    recommendations: Vec<String>,
    points: i32,
}

impl Risk {
    fn add(&mut self, points: i32, trigger: &str, recommendation: &str) {
        self.points += points;
        self.triggers.push(trigger);
        self.recommendations.push(recommendation.to_string());
    }
}

fn asthma(c: &Conditions, risk: &mut Risk) {
    let air_quality = c.air_quality.as_ref();
    if air_quality.is_some_and(|aq| aq.epa_at_least(3)) {
        risk.add(
            30,
            "Poor air quality index",
            "Carry your reliever inhaler and limit outdoor exertion.",
        );
    }
    if air_quality.is_some_and(|aq| aq.pm2_5_above(35.0)) {
        risk.add(
            20,
            "High fine particulate (PM2.5) levels",
            "Wear a well-fitting mask outdoors and keep windows closed.",
        );
    }
}

fn heart(c: &Conditions, risk: &mut Risk) {
    if c.feels_like_c > 35.0 {
        risk.add(
            30,
            "Extreme heat strains the cardiovascular system",
            "Avoid exertion in the heat and stay in cooled spaces.",
        );
    }
    if c.uv > 7.0 {
        risk.add(
            10,
            "Very high UV",
            "Limit direct sun exposure around midday.",
        );
    }
}

fn migraine(c: &Conditions, risk: &mut Risk) {
    if c.pressure_mb < 1000.0 {
        risk.add(
            20,
            "Low barometric pressure",
            "Keep medication at hand, stay hydrated and rest in a dark room if needed.",
        );
    }
}

fn heat_sensitivity(c: &Conditions, risk: &mut Risk) {
    if c.feels_like_c > 38.0 {
        risk.add(
            40,
            "Dangerous heat",
            "Stay indoors during the hottest hours and drink water regularly.",
        );
    }
}

fn cold_sensitivity(c: &Conditions, risk: &mut Risk) {
    if c.temp_c < 8.0 {
        risk.add(
            30,
            "Cold air temperature",
            "Wear thermal layers, gloves and cover your face outdoors.",
        );
    }
}

fn elderly(c: &Conditions, risk: &mut Risk) {
    if c.feels_like_c > 35.0 || c.temp_c < 10.0 {
        risk.add(
            25,
            "Temperature extremes",
            "Check in on elderly relatives and keep indoor temperatures moderate.",
        );
    }
}
