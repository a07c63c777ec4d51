//! Everyday advisories: umbrella, heat, UV and air quality

use serde::{Deserialize, Serialize};

use crate::models::{Conditions, TodaySummary};

const HEAT_NOTE: &str =
    "Heat warning: avoid strenuous activity in the afternoon and drink plenty of water.";
const UV_NOTE: &str = "UV is very high; wear sunscreen and a hat, and seek shade around midday.";
const AIR_UNHEALTHY_NOTE: &str = "Air quality is unhealthy; limit time outdoors.";
const AIR_MODERATE_NOTE: &str =
    "Air quality is moderate; sensitive people should reduce prolonged exertion outdoors.";
const AIR_PARTICULATE_NOTE: &str =
    "Fine particulate levels are high; wear a mask outdoors and keep windows closed.";
const ONLY_UMBRELLA_NOTE: &str = "Take an umbrella; otherwise conditions are comfortable.";
const COMFORTABLE_NOTE: &str = "Conditions look comfortable today.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Advice {
    pub umbrella: bool,
    /// Why the umbrella advisory fired, absent when it did not
    pub umbrella_reason: Option<String>,
    pub heat_warning: bool,
    pub uv_warning: bool,
    pub air_quality_warning: bool,
    /// Triggered advisories in the order heat, UV, air quality
    pub notes: String,
}

impl Advice {
    #[must_use]
    pub fn from_summary(summary: &TodaySummary) -> Self {
        Self::from_conditions(&summary.conditions())
    }

    #[must_use]
    pub fn from_conditions(c: &Conditions) -> Self {
        let umbrella_reason = if c.rain_chance >= 60 || c.precip_mm >= 2.0 {
            Some(format!(
                "Rain expected: {}% chance with about {:.1} mm of precipitation.",
                c.rain_chance, c.precip_mm
            ))
        } else if c.rain_chance >= 30 {
            Some(format!(
                "Possible showers ({}% chance); a compact umbrella is worth carrying.",
                c.rain_chance
            ))
        } else {
            None
        };
        let umbrella = umbrella_reason.is_some();

        let heat_warning = c.temp_c >= 35.0 || c.feels_like_c >= 37.0;
        let uv_warning = c.uv >= 8.0;

        let air_quality = c.air_quality.as_ref();
        let particulate = air_quality.is_some_and(|aq| aq.pm2_5_above(35.0));
        let unhealthy = air_quality.is_some_and(|aq| aq.epa_at_least(4));
        let moderate = air_quality.is_some_and(|aq| aq.epa_at_least(3));
        let air_quality_warning = unhealthy || particulate;
        let air_note = if particulate {
            Some(AIR_PARTICULATE_NOTE)
        } else if unhealthy {
            Some(AIR_UNHEALTHY_NOTE)
        } else if moderate {
            Some(AIR_MODERATE_NOTE)
        } else {
            None
        };

        let mut notes: Vec<&str> = Vec::new();
        if heat_warning {
            notes.push(HEAT_NOTE);
        }
        if uv_warning {
            notes.push(UV_NOTE);
        }
        if let Some(note) = air_note {
            notes.push(note);
        }
        if notes.is_empty() {
            notes.push(if umbrella {
                ONLY_UMBRELLA_NOTE
            } else {
                COMFORTABLE_NOTE
            });
        }

        Self {
            umbrella,
            umbrella_reason,
            heat_warning,
            uv_warning,
            air_quality_warning,
            notes: notes.join(" "),
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::models::AirQuality;

    #[test]
    fn test_hot_wet_bright_day() {
        let conditions = Conditions {
            rain_chance: 65,
            precip_mm: 3.0,
            feels_like_c: 38.0,
            uv: 9.0,
            ..Conditions::default()
        };
        let advice = Advice::from_conditions(&conditions);

        assert!(advice.umbrella);
        assert_eq!(
            advice.umbrella_reason.as_deref(),
            Some("Rain expected: 65% chance with about 3.0 mm of precipitation.")
        );
        assert!(advice.heat_warning);
        assert!(advice.uv_warning);
        assert!(!advice.air_quality_warning);
        assert_eq!(advice.notes, format!("{HEAT_NOTE} {UV_NOTE}"));
    }

    #[rstest]
    #[case::dry(10, 0.0, false)]
    #[case::light_chance(30, 0.0, true)]
    #[case::heavy_precip_low_chance(5, 2.0, true)]
    #[case::likely(60, 0.5, true)]
    fn test_umbrella(#[case] chance: u8, #[case] precip: f64, #[case] expected: bool) {
        let conditions = Conditions {
            rain_chance: chance,
            precip_mm: precip,
            ..Conditions::default()
        };
        assert_eq!(Advice::from_conditions(&conditions).umbrella, expected);
    }

    #[test]
    fn test_softer_umbrella_reason() {
        let conditions = Conditions {
            rain_chance: 40,
            ..Conditions::default()
        };
        let advice = Advice::from_conditions(&conditions);
        assert!(
            advice
                .umbrella_reason
                .is_some_and(|reason| reason.starts_with("Possible showers"))
        );
        assert_eq!(advice.notes, ONLY_UMBRELLA_NOTE);
    }

    #[test]
    fn test_nothing_fired_is_comfortable() {
        let advice = Advice::from_conditions(&Conditions::default());
        assert!(!advice.umbrella);
        assert!(advice.umbrella_reason.is_none());
        assert_eq!(advice.notes, COMFORTABLE_NOTE);
    }

    #[rstest]
    #[case::hot_now(36.0, 34.0, 34.0, true)]
    #[case::hot_later_cool_now(20.0, 35.0, 20.0, false)]
    #[case::at_threshold(35.0, 35.0, 30.0, true)]
    #[case::feels_like(30.0, 32.0, 37.0, true)]
    #[case::neither(34.9, 36.0, 36.9, false)]
    fn test_heat_warning(
        #[case] temp: f64,
        #[case] max_temp: f64,
        #[case] feels: f64,
        #[case] expected: bool,
    ) {
        let conditions = Conditions {
            temp_c: temp,
            max_temp_c: max_temp,
            feels_like_c: feels,
            ..Conditions::default()
        };
        assert_eq!(Advice::from_conditions(&conditions).heat_warning, expected);
    }

    #[rstest]
    #[case::moderate_index(Some(3), None, false, Some(AIR_MODERATE_NOTE))]
    #[case::unhealthy_index(Some(4), None, true, Some(AIR_UNHEALTHY_NOTE))]
    #[case::particulate_good_index(Some(1), Some(40.0), true, Some(AIR_PARTICULATE_NOTE))]
    #[case::particulate_no_index(None, Some(36.0), true, Some(AIR_PARTICULATE_NOTE))]
    #[case::clean(Some(2), Some(10.0), false, None)]
    fn test_air_quality(
        #[case] epa: Option<u8>,
        #[case] pm2_5: Option<f64>,
        #[case] warning: bool,
        #[case] note: Option<&str>,
    ) {
        let conditions = Conditions {
            air_quality: Some(AirQuality {
                us_epa_index: epa,
                pm2_5,
                ..AirQuality::default()
            }),
            ..Conditions::default()
        };
        let advice = Advice::from_conditions(&conditions);
        assert_eq!(advice.air_quality_warning, warning);
        assert_eq!(advice.notes, note.unwrap_or(COMFORTABLE_NOTE));
    }

    #[test]
    fn test_umbrella_does_not_add_residual_note_when_others_fire() {
        let conditions = Conditions {
            rain_chance: 80,
            uv: 8.0,
            ..Conditions::default()
        };
        assert_eq!(Advice::from_conditions(&conditions).notes, UV_NOTE);
    }
}
