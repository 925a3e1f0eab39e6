//! Feature encoding for the risk classifier.
//!
//! The classifier was trained on a single-row table with the columns in
//! [`FEATURE_NAMES`], in that order. Categorical answers become small integer
//! codes; numeric measurements pass through with their numeric kind intact.

use std::fmt;

use serde::Serialize;

use super::metrics::{ActivityLevel, Gender, HealthMetrics, YesNo};
use crate::VitalisError;

/// Number of model input columns.
pub const FEATURE_COUNT: usize = 10;

/// Column names in training order.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "age",
    "gender",
    "bmi",
    "blood_pressure",
    "cholesterol_level",
    "glucose_level",
    "physical_activity",
    "smoking_status",
    "alcohol_intake",
    "family_history",
];

impl Gender {
    /// Male = 0, Female = 1
    #[must_use]
    pub fn code(self) -> i64 {
        match self {
            Self::Male => 0,
            Self::Female => 1,
        }
    }
}

impl ActivityLevel {
    /// Low = 0, Moderate = 1, High = 2
    #[must_use]
    pub fn code(self) -> i64 {
        match self {
            Self::Low => 0,
            Self::Moderate => 1,
            Self::High => 2,
        }
    }
}

impl YesNo {
    /// No = 0, Yes = 1
    #[must_use]
    pub fn code(self) -> i64 {
        match self {
            Self::No => 0,
            Self::Yes => 1,
        }
    }
}

/// A single cell of the feature row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FeatureValue {
    Int(i64),
    Float(f64),
}

impl FeatureValue {
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        match *self {
            Self::Int(v) => v as f64,
            Self::Float(v) => v,
        }
    }
}

impl fmt::Display for FeatureValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v:.1}"),
        }
    }
}

/// Model-ready encoding of one [`HealthMetrics`] record.
///
/// Field declaration order is the column order, so the serialized form is a
/// single-row record with keys in [`FEATURE_NAMES`] order. Built only by
/// [`encode`] and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureVector {
    age: i64,
    gender: i64,
    bmi: f64,
    blood_pressure: i64,
    cholesterol_level: i64,
    glucose_level: i64,
    physical_activity: i64,
    smoking_status: i64,
    alcohol_intake: i64,
    family_history: i64,
}

impl FeatureVector {
    /// Cells in column order.
    #[must_use]
    pub fn values(&self) -> [FeatureValue; FEATURE_COUNT] {
        [
            FeatureValue::Int(self.age),
            FeatureValue::Int(self.gender),
            FeatureValue::Float(self.bmi),
            FeatureValue::Int(self.blood_pressure),
            FeatureValue::Int(self.cholesterol_level),
            FeatureValue::Int(self.glucose_level),
            FeatureValue::Int(self.physical_activity),
            FeatureValue::Int(self.smoking_status),
            FeatureValue::Int(self.alcohol_intake),
            FeatureValue::Int(self.family_history),
        ]
    }

    /// Convert features to a vector for numeric inference.
    #[must_use]
    pub fn to_f64_vec(&self) -> Vec<f64> {
        self.values().iter().map(FeatureValue::as_f64).collect()
    }
}

/// Encode raw metrics into the classifier's feature row.
///
/// Domain ranges are checked by [`HealthMetrics::validate`]; the encoder only
/// refuses values it cannot represent faithfully and never clamps.
///
/// # Errors
/// Returns `InvalidInput` if `bmi` is NaN or infinite.
pub fn encode(metrics: &HealthMetrics) -> Result<FeatureVector, VitalisError> {
    if !metrics.bmi.is_finite() {
        return Err(VitalisError::InvalidInput(format!(
            "bmi must be a finite number, got {}",
            metrics.bmi
        )));
    }

    Ok(FeatureVector {
        age: i64::from(metrics.age),
        gender: metrics.gender.code(),
        bmi: metrics.bmi,
        blood_pressure: i64::from(metrics.blood_pressure),
        cholesterol_level: i64::from(metrics.cholesterol),
        glucose_level: i64::from(metrics.glucose),
        physical_activity: metrics.activity.code(),
        smoking_status: metrics.smoking.code(),
        alcohol_intake: metrics.alcohol.code(),
        family_history: metrics.family_history.code(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_metrics() -> HealthMetrics {
        HealthMetrics {
            age: 30,
            gender: Gender::Female,
            bmi: 27.0,
            blood_pressure: 120,
            cholesterol: 200,
            glucose: 100,
            activity: ActivityLevel::Low,
            smoking: YesNo::No,
            alcohol: YesNo::No,
            family_history: YesNo::No,
        }
    }

    #[test]
    fn test_scenario_encoding() {
        let features = encode(&scenario_metrics()).expect("Should encode");
        assert_eq!(
            features.values(),
            [
                FeatureValue::Int(30),
                FeatureValue::Int(1),
                FeatureValue::Float(27.0),
                FeatureValue::Int(120),
                FeatureValue::Int(200),
                FeatureValue::Int(100),
                FeatureValue::Int(0),
                FeatureValue::Int(0),
                FeatureValue::Int(0),
                FeatureValue::Int(0),
            ]
        );
    }

    #[test]
    fn test_all_enum_combinations() {
        let mut seen = 0;
        for (g, gender) in Gender::ALL.into_iter().enumerate() {
            for (a, activity) in ActivityLevel::ALL.into_iter().enumerate() {
                for (s, smoking) in YesNo::ALL.into_iter().enumerate() {
                    for (l, alcohol) in YesNo::ALL.into_iter().enumerate() {
                        for (h, family_history) in YesNo::ALL.into_iter().enumerate() {
                            let metrics = HealthMetrics {
                                gender,
                                activity,
                                smoking,
                                alcohol,
                                family_history,
                                ..scenario_metrics()
                            };
                            let expected = [
                                FeatureValue::Int(30),
                                FeatureValue::Int(g as i64),
                                FeatureValue::Float(27.0),
                                FeatureValue::Int(120),
                                FeatureValue::Int(200),
                                FeatureValue::Int(100),
                                FeatureValue::Int(a as i64),
                                FeatureValue::Int(s as i64),
                                FeatureValue::Int(l as i64),
                                FeatureValue::Int(h as i64),
                            ];
                            let features = encode(&metrics).expect("Should encode");
                            assert_eq!(features.values(), expected, "{metrics:?}");
                            seen += 1;
                        }
                    }
                }
            }
        }
        assert_eq!(seen, 48);
    }

    #[test]
    fn test_enum_codes_match_mapping_table() {
        assert_eq!(Gender::Male.code(), 0);
        assert_eq!(Gender::Female.code(), 1);
        assert_eq!(ActivityLevel::Low.code(), 0);
        assert_eq!(ActivityLevel::Moderate.code(), 1);
        assert_eq!(ActivityLevel::High.code(), 2);
        assert_eq!(YesNo::No.code(), 0);
        assert_eq!(YesNo::Yes.code(), 1);
    }

    #[test]
    fn test_serialized_row_keeps_column_order_and_numeric_kind() {
        let features = encode(&scenario_metrics()).expect("Should encode");
        let json = serde_json::to_string(&features).expect("Should serialize");
        assert_eq!(
            json,
            r#"{"age":30,"gender":1,"bmi":27.0,"blood_pressure":120,"cholesterol_level":200,"glucose_level":100,"physical_activity":0,"smoking_status":0,"alcohol_intake":0,"family_history":0}"#
        );
    }

    #[test]
    fn test_non_finite_bmi_is_rejected() {
        for bmi in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let metrics = HealthMetrics {
                bmi,
                ..scenario_metrics()
            };
            assert!(matches!(
                encode(&metrics),
                Err(VitalisError::InvalidInput(_))
            ));
        }
    }

    #[test]
    fn test_encoder_does_not_clamp() {
        let metrics = HealthMetrics {
            age: 150,
            cholesterol: 999,
            ..scenario_metrics()
        };
        let features = encode(&metrics).expect("Should encode");
        let v = features.to_f64_vec();
        assert!((v[0] - 150.0).abs() < f64::EPSILON);
        assert!((v[4] - 999.0).abs() < f64::EPSILON);
    }
}
