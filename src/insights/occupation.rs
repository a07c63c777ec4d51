//! Occupation-specific daily insights
//!
//! Each occupation starts from its own baseline suitability and loses fixed
//! points per triggered rule. Penalties are additive, so rule order only
//! decides the order in which risks and actions are listed.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::time_window::TimeWindows;
use super::{Findings, clamp_score};
use crate::models::{Conditions, TodaySummary};

const OFFICE_COMMUTE: &str = "Commute (7:00–9:00 and 17:00–19:00)";
const SCHOOL_RUN: &str = "School run (7:00–8:30 and 15:00–16:30)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Occupation {
    Farmer,
    OfficeWorker,
    Delivery,
    Construction,
    Tourist,
    OutdoorVendor,
    Athlete,
    Student,
    /// Anything not covered by a dedicated rule set
    General,
}

impl Occupation {
    pub const ALL: [Occupation; 9] = [
        Occupation::Farmer,
        Occupation::OfficeWorker,
        Occupation::Delivery,
        Occupation::Construction,
        Occupation::Tourist,
        Occupation::OutdoorVendor,
        Occupation::Athlete,
        Occupation::Student,
        Occupation::General,
    ];

    #[must_use]
    pub fn baseline(self) -> i32 {
        match self {
            Occupation::Farmer | Occupation::OfficeWorker | Occupation::Student => 85,
            Occupation::Delivery | Occupation::Athlete => 80,
            Occupation::Construction => 70,
            Occupation::Tourist => 90,
            Occupation::OutdoorVendor | Occupation::General => 75,
        }
    }

    /// Whether the working day is spent mostly outside
    #[must_use]
    pub fn is_outdoor(self) -> bool {
        !matches!(self, Occupation::OfficeWorker | Occupation::Student)
    }

    fn as_str(self) -> &'static str {
        match self {
            Occupation::Farmer => "farmer",
            Occupation::OfficeWorker => "office_worker",
            Occupation::Delivery => "delivery",
            Occupation::Construction => "construction",
            Occupation::Tourist => "tourist",
            Occupation::OutdoorVendor => "outdoor_vendor",
            Occupation::Athlete => "athlete",
            Occupation::Student => "student",
            Occupation::General => "general",
        }
    }
}

impl fmt::Display for Occupation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Never fails: unknown names map to [`Occupation::General`]
impl FromStr for Occupation {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', ' '], "_");
        let occupation = match normalized.as_str() {
            "farmer" | "farming" | "agriculture" => Occupation::Farmer,
            "office" | "office_worker" | "officeworker" => Occupation::OfficeWorker,
            "delivery" | "courier" | "driver" | "delivery_driver" => Occupation::Delivery,
            "construction" | "construction_worker" | "builder" => Occupation::Construction,
            "tourist" | "traveler" | "traveller" => Occupation::Tourist,
            "vendor" | "outdoor_vendor" | "street_vendor" => Occupation::OutdoorVendor,
            "athlete" | "runner" | "sports" => Occupation::Athlete,
            "student" | "school" => Occupation::Student,
            _ => Occupation::General,
        };
        Ok(occupation)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SuitabilityLabel {
    Excellent,
    Good,
    Moderate,
    Poor,
}

impl SuitabilityLabel {
    #[must_use]
    pub fn from_score(score: u8) -> Self {
        match score {
            80.. => SuitabilityLabel::Excellent,
            60..=79 => SuitabilityLabel::Good,
            40..=59 => SuitabilityLabel::Moderate,
            _ => SuitabilityLabel::Poor,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OccupationInsight {
    pub occupation: Occupation,
    pub opportunities: Vec<String>,
    pub risks: Vec<String>,
    pub actions: Vec<String>,
    pub best_time: String,
    /// Baseline minus penalties, 0-100
    pub suitability_score: u8,
    pub suitability_label: SuitabilityLabel,
}

impl OccupationInsight {
    #[must_use]
    pub fn from_summary(summary: &TodaySummary, occupation: Occupation) -> Self {
        let best_time = if occupation.is_outdoor() {
            TimeWindows::from_summary(summary).best
        } else if occupation == Occupation::Student {
            SCHOOL_RUN.to_string()
        } else {
            OFFICE_COMMUTE.to_string()
        };
        Self::from_conditions(&summary.conditions(), occupation, best_time)
    }

    #[must_use]
    pub fn from_conditions(
        conditions: &Conditions,
        occupation: Occupation,
        best_time: String,
    ) -> Self {
        let mut rules = Rules::default();
        match occupation {
            Occupation::Farmer => farmer(conditions, &mut rules),
            Occupation::OfficeWorker => office_worker(conditions, &mut rules),
            Occupation::Delivery => delivery(conditions, &mut rules),
            Occupation::Construction => construction(conditions, &mut rules),
            Occupation::Tourist => tourist(conditions, &mut rules),
            Occupation::OutdoorVendor => outdoor_vendor(conditions, &mut rules),
            Occupation::Athlete => athlete(conditions, &mut rules),
            Occupation::Student => student(conditions, &mut rules),
            Occupation::General => {}
        }

        if rules.opportunities.is_empty() && rules.risks.is_empty() {
            rules
                .opportunities
                .push("Conditions are favourable for a normal working day.".to_string());
        }

        let suitability_score = clamp_score(occupation.baseline(), -rules.penalty);
        Self {
            occupation,
            opportunities: rules.opportunities,
            risks: rules.risks.into_messages(),
            actions: rules.actions,
            best_time,
            suitability_score,
            suitability_label: SuitabilityLabel::from_score(suitability_score),
        }
    }
}

#[derive(Default)]
struct Rules {
    opportunities: Vec<String>,
    risks: Findings,
    actions: Vec<String>,
    penalty: i32,
}

impl Rules {
    fn penalize(&mut self, points: i32, risk: &str, action: &str) {
        self.penalty += points;
        self.risks.push(risk);
        self.actions.push(action.to_string());
    }

    fn opportunity(&mut self, text: &str) {
        self.opportunities.push(text.to_string());
    }
}

fn epa_at_least(c: &Conditions, index: u8) -> bool {
    c.air_quality.as_ref().is_some_and(|aq| aq.epa_at_least(index))
}

fn farmer(c: &Conditions, rules: &mut Rules) {
    if c.precip_mm >= 5.0 {
        rules.opportunity("Good natural irrigation today; skip watering.");
    }
    if c.rain_chance > 70 {
        rules.penalize(
            15,
            "High chance of rain may disrupt field work.",
            "Schedule harvesting and spraying for a drier day.",
        );
    }
    if c.feels_like_c > 38.0 {
        rules.penalize(
            20,
            "Extreme heat stress for workers and livestock.",
            "Work early, take shaded breaks and keep animals watered.",
        );
    }
    if c.max_wind_kph > 18.0 {
        rules.penalize(
            10,
            "Wind may cause spray drift.",
            "Avoid pesticide spraying in strong wind.",
        );
    }
}

fn office_worker(c: &Conditions, rules: &mut Rules) {
    if c.rain_chance > 40 {
        rules.penalize(
            5,
            "Wet commute likely.",
            "Take an umbrella or consider working from home.",
        );
    }
    if epa_at_least(c, 3) {
        rules.penalize(
            5,
            "Reduced air quality during the commute.",
            "Keep windows closed and prefer public transport.",
        );
    }
    if c.rain_chance <= 20 && c.feels_like_c >= 15.0 && c.feels_like_c <= 28.0 {
        rules.opportunity("Pleasant weather for walking or cycling to work.");
    }
}

fn delivery(c: &Conditions, rules: &mut Rules) {
    if c.visibility_km < 4.0 {
        rules.penalize(
            20,
            "Poor visibility on the roads.",
            "Drive slowly and use headlights.",
        );
    }
    if c.rain_chance > 50 {
        rules.penalize(
            15,
            "Slippery roads and wet parcels.",
            "Use waterproof bags and allow extra time per drop.",
        );
    }
    if c.rain_chance <= 20 && c.visibility_km >= 10.0 {
        rules.opportunity("Clear, dry roads for efficient routes.");
    }
}

fn construction(c: &Conditions, rules: &mut Rules) {
    if c.feels_like_c > 36.0 {
        rules.penalize(
            20,
            "Heat exhaustion risk on site.",
            "Shift heavy work to early morning and enforce water breaks.",
        );
    }
    if c.rain_chance > 50 {
        rules.penalize(
            15,
            "Rain may halt concrete pours and make scaffolding slippery.",
            "Cover materials and postpone exterior finishing.",
        );
    }
    if c.uv >= 8.0 {
        rules.penalize(
            10,
            "Very high UV exposure for outdoor crews.",
            "Provide sunscreen and long-sleeve protective clothing.",
        );
    }
    if c.rain_chance <= 20 && c.max_wind_kph < 30.0 {
        rules.opportunity("Dry, calm conditions suit exterior work.");
    }
}

fn tourist(c: &Conditions, rules: &mut Rules) {
    if c.uv > 7.0 {
        rules.penalize(
            5,
            "Strong sun while sightseeing.",
            "Wear a hat and reapply sunscreen every two hours.",
        );
    }
    if c.rain_chance > 40 {
        rules.penalize(
            10,
            "Rain may spoil outdoor sightseeing.",
            "Plan museums or indoor attractions as a backup.",
        );
    }
    if c.rain_chance <= 20 && c.feels_like_c >= 18.0 && c.feels_like_c <= 30.0 {
        rules.opportunity("Great day for walking tours and outdoor sights.");
    }
}

fn outdoor_vendor(c: &Conditions, rules: &mut Rules) {
    if c.feels_like_c > 35.0 {
        rules.penalize(
            15,
            "Heat will keep customers away in the afternoon.",
            "Set up shade and stock cold drinks.",
        );
    }
    if c.rain_chance > 40 {
        rules.penalize(
            10,
            "Rain may reduce foot traffic.",
            "Bring a canopy and waterproof covers for goods.",
        );
    }
    if c.rain_chance <= 20 {
        rules.opportunity("Dry weather should bring steady foot traffic.");
    }
}

fn athlete(c: &Conditions, rules: &mut Rules) {
    if c.uv > 7.0 {
        rules.penalize(
            10,
            "High UV during outdoor training.",
            "Train early or late and wear sunscreen.",
        );
    }
    if c.feels_like_c > 34.0 {
        rules.penalize(
            15,
            "Heat illness risk during exertion.",
            "Shorten sessions, lower intensity and hydrate often.",
        );
    }
    if c.feels_like_c >= 10.0 && c.feels_like_c <= 22.0 && c.rain_chance <= 30 {
        rules.opportunity("Ideal temperatures for endurance training.");
    }
}

fn student(c: &Conditions, rules: &mut Rules) {
    if c.rain_chance > 50 {
        rules.penalize(
            10,
            "Wet journey to school or campus.",
            "Pack a raincoat and a change of socks.",
        );
    }
    if epa_at_least(c, 3) {
        rules.penalize(
            10,
            "Air quality may affect outdoor breaks.",
            "Limit outdoor sports during breaks.",
        );
    }
    if c.rain_chance <= 20 {
        rules.opportunity("Good day for outdoor study or campus activities.");
    }
}
