//! Rule-based lifestyle advisories.
//!
//! Advisories come straight from the entered metrics through fixed threshold
//! rules. They never look at the classifier's prediction, so a "Low Risk"
//! verdict can still come with several warnings.

use serde::ser::{Serialize, SerializeStruct, Serializer};

use super::metrics::{ActivityLevel, HealthMetrics};

/// BMI above this (exclusive) is Overweight.
pub const BMI_OVERWEIGHT: f64 = 25.0;

/// BMI above this (exclusive) is Obese.
pub const BMI_OBESE: f64 = 30.0;

/// Cholesterol above this (exclusive, mg/dL) is high.
pub const CHOLESTEROL_HIGH: u32 = 240;

/// Glucose above this (exclusive, mg/dL) warrants diabetes screening.
pub const GLUCOSE_HIGH: u32 = 126;

/// Closing line shown under the advisory list.
pub const CLOSING_REMARK: &str = "Stay consistent with healthy habits for long-term fitness!";

/// A single lifestyle advisory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Advisory {
    Obese,
    Overweight,
    HealthyWeight,
    HighCholesterol,
    HighGlucose,
    Smoking,
    Alcohol,
    LowActivity,
}

/// Advisories in rule order.
pub type AdvisoryList = Vec<Advisory>;

impl Advisory {
    /// Text shown to the user.
    #[must_use]
    pub fn message(&self) -> &'static str {
        match self {
            Self::Obese => "You are in the Obese category. Consider weight management strategies like daily walking and a balanced diet.",
            Self::Overweight => "You are Overweight. Regular exercise and reducing processed food can help lower risk.",
            Self::HealthyWeight => "Your BMI is in the healthy range. Maintain your lifestyle with regular activity.",
            Self::HighCholesterol => "Your cholesterol is high. Reduce saturated fats and increase fiber intake.",
            Self::HighGlucose => "Your glucose level is high. Monitor sugar intake and consult a doctor for diabetes screening.",
            Self::Smoking => "Quitting smoking will significantly reduce chronic disease risks.",
            Self::Alcohol => "Reduce alcohol intake to improve heart and liver health.",
            Self::LowActivity => "Increase your physical activity (at least 30 min of brisk walking daily).",
        }
    }

    /// Short topic tag for list display.
    #[must_use]
    pub fn topic(&self) -> &'static str {
        match self {
            Self::Obese | Self::Overweight | Self::HealthyWeight => "Weight",
            Self::HighCholesterol => "Cholesterol",
            Self::HighGlucose => "Glucose",
            Self::Smoking => "Smoking",
            Self::Alcohol => "Alcohol",
            Self::LowActivity => "Activity",
        }
    }

    /// Stable machine-readable identifier.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Obese => "obese",
            Self::Overweight => "overweight",
            Self::HealthyWeight => "healthy_weight",
            Self::HighCholesterol => "high_cholesterol",
            Self::HighGlucose => "high_glucose",
            Self::Smoking => "smoking",
            Self::Alcohol => "alcohol",
            Self::LowActivity => "low_activity",
        }
    }

    /// Everything except the healthy-weight note calls for a change.
    #[must_use]
    pub fn is_warning(&self) -> bool {
        !matches!(self, Self::HealthyWeight)
    }
}

impl Serialize for Advisory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Advisory", 2)?;
        s.serialize_field("kind", self.kind())?;
        s.serialize_field("message", self.message())?;
        s.end()
    }
}

/// BMI tier, first match wins.
#[must_use]
pub fn weight_tier(bmi: f64) -> Advisory {
    if bmi > BMI_OBESE {
        Advisory::Obese
    } else if bmi > BMI_OVERWEIGHT {
        Advisory::Overweight
    } else {
        Advisory::HealthyWeight
    }
}

/// Derive the advisory list for one set of metrics.
///
/// Rules are independent and run in a fixed order; each adds at most one
/// entry. The weight tier always fires, so the list is never empty.
#[must_use]
pub fn advise(metrics: &HealthMetrics) -> AdvisoryList {
    let mut advisories = Vec::with_capacity(6);

    advisories.push(weight_tier(metrics.bmi));

    if metrics.cholesterol > CHOLESTEROL_HIGH {
        advisories.push(Advisory::HighCholesterol);
    }
    if metrics.glucose > GLUCOSE_HIGH {
        advisories.push(Advisory::HighGlucose);
    }
    if metrics.smoking.is_yes() {
        advisories.push(Advisory::Smoking);
    }
    if metrics.alcohol.is_yes() {
        advisories.push(Advisory::Alcohol);
    }
    if metrics.activity == ActivityLevel::Low {
        advisories.push(Advisory::LowActivity);
    }

    advisories
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::metrics::{Gender, YesNo};

    fn base() -> HealthMetrics {
        HealthMetrics {
            age: 30,
            gender: Gender::Female,
            bmi: 22.0,
            blood_pressure: 120,
            cholesterol: 200,
            glucose: 100,
            activity: ActivityLevel::Moderate,
            smoking: YesNo::No,
            alcohol: YesNo::No,
            family_history: YesNo::No,
        }
    }

    #[test]
    fn test_bmi_boundaries() {
        assert_eq!(weight_tier(25.0), Advisory::HealthyWeight);
        assert_eq!(weight_tier(25.1), Advisory::Overweight);
        assert_eq!(weight_tier(30.0), Advisory::Overweight);
        assert_eq!(weight_tier(30.1), Advisory::Obese);
    }

    #[test]
    fn test_cholesterol_boundary() {
        let at = HealthMetrics {
            cholesterol: 240,
            ..base()
        };
        let above = HealthMetrics {
            cholesterol: 241,
            ..base()
        };
        assert!(!advise(&at).contains(&Advisory::HighCholesterol));
        assert!(advise(&above).contains(&Advisory::HighCholesterol));
    }

    #[test]
    fn test_glucose_boundary() {
        let at = HealthMetrics {
            glucose: 126,
            ..base()
        };
        let above = HealthMetrics {
            glucose: 127,
            ..base()
        };
        assert!(!advise(&at).contains(&Advisory::HighGlucose));
        assert!(advise(&above).contains(&Advisory::HighGlucose));
    }

    #[test]
    fn test_healthy_profile_gets_single_note() {
        assert_eq!(advise(&base()), vec![Advisory::HealthyWeight]);
    }

    #[test]
    fn test_overweight_low_activity_scenario() {
        let metrics = HealthMetrics {
            bmi: 27.0,
            activity: ActivityLevel::Low,
            ..base()
        };
        assert_eq!(
            advise(&metrics),
            vec![Advisory::Overweight, Advisory::LowActivity]
        );
    }

    #[test]
    fn test_all_rules_fire_in_order() {
        let metrics = HealthMetrics {
            bmi: 35.0,
            cholesterol: 300,
            glucose: 200,
            smoking: YesNo::Yes,
            alcohol: YesNo::Yes,
            activity: ActivityLevel::Low,
            ..base()
        };
        assert_eq!(
            advise(&metrics),
            vec![
                Advisory::Obese,
                Advisory::HighCholesterol,
                Advisory::HighGlucose,
                Advisory::Smoking,
                Advisory::Alcohol,
                Advisory::LowActivity,
            ]
        );
    }

    #[test]
    fn test_advise_is_deterministic() {
        let metrics = HealthMetrics {
            bmi: 31.0,
            smoking: YesNo::Yes,
            ..base()
        };
        assert_eq!(advise(&metrics), advise(&metrics));
    }

    #[test]
    fn test_family_history_has_no_rule() {
        let with_history = HealthMetrics {
            family_history: YesNo::Yes,
            ..base()
        };
        assert_eq!(advise(&with_history), advise(&base()));
    }

    #[test]
    fn test_messages_are_distinct() {
        let all = [
            Advisory::Obese,
            Advisory::Overweight,
            Advisory::HealthyWeight,
            Advisory::HighCholesterol,
            Advisory::HighGlucose,
            Advisory::Smoking,
            Advisory::Alcohol,
            Advisory::LowActivity,
        ];
        let unique: std::collections::HashSet<&str> = all.iter().map(Advisory::message).collect();
        assert_eq!(unique.len(), all.len());
        assert!(!Advisory::HealthyWeight.is_warning());
        assert!(Advisory::Smoking.is_warning());
    }

    #[test]
    fn test_serializes_kind_and_message() {
        let json = serde_json::to_value(Advisory::Smoking).expect("Should serialize");
        assert_eq!(json["kind"], "smoking");
        assert_eq!(json["message"], Advisory::Smoking.message());
    }
}
