//! Rule-based lifestyle advice.
//!
//! A small fixed rule set evaluated over the raw patient profile, not the
//! encoded vector. Total function: always returns at least one entry.

use serde::{Deserialize, Serialize};

use super::patient::{AirPollutionExposure, PatientProfile, Region, SmokingStatus};

/// One lifestyle recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Advice {
    QuitSmoking,
    ImproveDiet,
    SleepMore,
    LimitPollution,
    /// Fallback when no rule fires
    MaintainLifestyle,
}

impl Advice {
    /// Human-readable recommendation text.
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::QuitSmoking => {
                "Quit smoking: it is the largest risk factor you can change right now."
            }
            Self::ImproveDiet => {
                "Improve your diet: cut back on fried and fatty food, your cholesterol is above the normal limit."
            }
            Self::SleepMore => {
                "Sleep more: short sleep stresses the heart, aim for 7-8 hours."
            }
            Self::LimitPollution => {
                "Wear a mask outdoors: air pollution triggers inflammation of the blood vessels."
            }
            Self::MaintainLifestyle => {
                "Your lifestyle looks good. Keep up your current diet and regular exercise."
            }
        }
    }
}

/// Evaluate the advice rules in fixed priority order:
/// smoking, then diet/cholesterol, then sleep, then pollution.
///
/// Thresholds are strict: cholesterol must exceed 200 (or LDL exceed 130)
/// and sleep must be below 6 hours for the respective rules to fire.
#[must_use]
pub fn lifestyle_advice(profile: &PatientProfile) -> Vec<Advice> {
    let mut advice = Vec::new();

    if profile.smoking_status == SmokingStatus::Current {
        advice.push(Advice::QuitSmoking);
    }
    if profile.cholesterol_level > 200 || profile.cholesterol_ldl > 130 {
        advice.push(Advice::ImproveDiet);
    }
    if profile.sleep_hours < 6 {
        advice.push(Advice::SleepMore);
    }
    if profile.region == Region::Urban
        && profile.air_pollution_exposure == AirPollutionExposure::High
    {
        advice.push(Advice::LimitPollution);
    }

    if advice.is_empty() {
        advice.push(Advice::MaintainLifestyle);
    }

    advice
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::baseline_profile;
    use super::*;

    #[test]
    fn test_all_rules_fire_in_priority_order() {
        let mut profile = baseline_profile();
        profile.smoking_status = SmokingStatus::Current;
        profile.cholesterol_level = 220;
        profile.cholesterol_ldl = 140;
        profile.sleep_hours = 5;
        profile.region = Region::Urban;
        profile.air_pollution_exposure = AirPollutionExposure::High;

        assert_eq!(
            lifestyle_advice(&profile),
            vec![
                Advice::QuitSmoking,
                Advice::ImproveDiet,
                Advice::SleepMore,
                Advice::LimitPollution,
            ]
        );
    }

    #[test]
    fn test_fallback_when_no_rule_fires() {
        let advice = lifestyle_advice(&baseline_profile());
        assert_eq!(advice, vec![Advice::MaintainLifestyle]);
    }

    #[test]
    fn test_thresholds_are_strict() {
        // Exactly 6 hours of sleep does not trigger the sleep rule.
        let mut profile = baseline_profile();
        profile.sleep_hours = 6;
        assert_eq!(lifestyle_advice(&profile), vec![Advice::MaintainLifestyle]);

        // Cholesterol of exactly 200 alone does not trigger the diet rule.
        let mut profile = baseline_profile();
        profile.cholesterol_level = 200;
        profile.cholesterol_ldl = 130;
        assert_eq!(lifestyle_advice(&profile), vec![Advice::MaintainLifestyle]);

        // LDL above 130 triggers it even with cholesterol at the limit.
        profile.cholesterol_ldl = 131;
        assert_eq!(lifestyle_advice(&profile), vec![Advice::ImproveDiet]);
    }

    #[test]
    fn test_pollution_requires_urban_region() {
        let mut profile = baseline_profile();
        profile.region = Region::Rural;
        profile.air_pollution_exposure = AirPollutionExposure::High;
        assert_eq!(lifestyle_advice(&profile), vec![Advice::MaintainLifestyle]);

        profile.region = Region::Urban;
        assert_eq!(lifestyle_advice(&profile), vec![Advice::LimitPollution]);
    }
}
