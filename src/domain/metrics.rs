//! Health metrics entered by the user.
//!
//! Every field is required. Categorical fields are closed enums, so an
//! unrecognized spelling fails at parse time instead of landing in a
//! fallback bucket.

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::VitalisError;

/// Accepted age in years.
pub const AGE_RANGE: RangeInclusive<u32> = 18..=100;

/// Accepted body mass index.
pub const BMI_RANGE: RangeInclusive<f64> = 10.0..=50.0;

/// Accepted blood pressure in mmHg.
pub const BLOOD_PRESSURE_RANGE: RangeInclusive<u32> = 80..=200;

/// Accepted total cholesterol in mg/dL.
pub const CHOLESTEROL_RANGE: RangeInclusive<u32> = 100..=400;

/// Accepted fasting glucose in mg/dL.
pub const GLUCOSE_RANGE: RangeInclusive<u32> = 70..=300;

/// Biological sex as entered on the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Self::Male, Self::Female];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
        }
    }
}

/// Self-reported physical activity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActivityLevel {
    Low,
    Moderate,
    High,
}

impl ActivityLevel {
    pub const ALL: [ActivityLevel; 3] = [Self::Low, Self::Moderate, Self::High];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::High => "High",
        }
    }
}

/// Answer to a yes/no question (smoking, alcohol, family history).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum YesNo {
    No,
    Yes,
}

impl YesNo {
    pub const ALL: [YesNo; 2] = [Self::No, Self::Yes];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::No => "No",
            Self::Yes => "Yes",
        }
    }

    #[must_use]
    pub fn is_yes(&self) -> bool {
        matches!(self, Self::Yes)
    }
}

impl FromStr for Gender {
    type Err = VitalisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Male" => Ok(Self::Male),
            "Female" => Ok(Self::Female),
            other => Err(VitalisError::InvalidInput(format!(
                "unknown gender {other:?} (expected Male or Female)"
            ))),
        }
    }
}

impl FromStr for ActivityLevel {
    type Err = VitalisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Low" => Ok(Self::Low),
            "Moderate" => Ok(Self::Moderate),
            "High" => Ok(Self::High),
            other => Err(VitalisError::InvalidInput(format!(
                "unknown activity level {other:?} (expected Low, Moderate or High)"
            ))),
        }
    }
}

impl FromStr for YesNo {
    type Err = VitalisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "No" => Ok(Self::No),
            "Yes" => Ok(Self::Yes),
            other => Err(VitalisError::InvalidInput(format!(
                "unknown answer {other:?} (expected No or Yes)"
            ))),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for YesNo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One person's health metrics for a single risk check.
///
/// No field has a default: deserializing a record with a missing field fails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HealthMetrics {
    /// Age in years (18-100)
    pub age: u32,

    pub gender: Gender,

    /// Body mass index (10.0-50.0)
    pub bmi: f64,

    /// Blood pressure in mmHg (80-200)
    pub blood_pressure: u32,

    /// Total cholesterol in mg/dL (100-400)
    pub cholesterol: u32,

    /// Glucose in mg/dL (70-300)
    pub glucose: u32,

    pub activity: ActivityLevel,

    pub smoking: YesNo,

    pub alcohol: YesNo,

    /// Family history of chronic disease
    pub family_history: YesNo,
}

impl HealthMetrics {
    /// The form's starting values.
    #[must_use]
    pub fn sample() -> Self {
        Self {
            age: 30,
            gender: Gender::Male,
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

    /// Validate that all numeric fields are finite and within their domains.
    ///
    /// # Errors
    /// Returns every violation found, not just the first.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if !AGE_RANGE.contains(&self.age) {
            errors.push(format!(
                "Age {} out of range [{}, {}]",
                self.age,
                AGE_RANGE.start(),
                AGE_RANGE.end()
            ));
        }
        if !self.bmi.is_finite() {
            errors.push(format!("BMI {} is not a finite number", self.bmi));
        } else if !BMI_RANGE.contains(&self.bmi) {
            errors.push(format!(
                "BMI {} out of range [{}, {}]",
                self.bmi,
                BMI_RANGE.start(),
                BMI_RANGE.end()
            ));
        }
        if !BLOOD_PRESSURE_RANGE.contains(&self.blood_pressure) {
            errors.push(format!(
                "Blood pressure {} out of range [{}, {}]",
                self.blood_pressure,
                BLOOD_PRESSURE_RANGE.start(),
                BLOOD_PRESSURE_RANGE.end()
            ));
        }
        if !CHOLESTEROL_RANGE.contains(&self.cholesterol) {
            errors.push(format!(
                "Cholesterol {} out of range [{}, {}]",
                self.cholesterol,
                CHOLESTEROL_RANGE.start(),
                CHOLESTEROL_RANGE.end()
            ));
        }
        if !GLUCOSE_RANGE.contains(&self.glucose) {
            errors.push(format!(
                "Glucose {} out of range [{}, {}]",
                self.glucose,
                GLUCOSE_RANGE.start(),
                GLUCOSE_RANGE.end()
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_is_valid() {
        assert!(HealthMetrics::sample().validate().is_ok());
    }

    #[test]
    fn test_validation_collects_all_errors() {
        let invalid = HealthMetrics {
            age: 12,
            bmi: 55.0,
            glucose: 20,
            ..HealthMetrics::sample()
        };
        let errors = invalid.validate().expect_err("Should be invalid");
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_validation_rejects_non_finite_bmi() {
        let nan = HealthMetrics {
            bmi: f64::NAN,
            ..HealthMetrics::sample()
        };
        assert!(nan.validate().is_err());
    }

    #[test]
    fn test_domain_edges_are_inclusive() {
        let low = HealthMetrics {
            age: 18,
            bmi: 10.0,
            blood_pressure: 80,
            cholesterol: 100,
            glucose: 70,
            ..HealthMetrics::sample()
        };
        let high = HealthMetrics {
            age: 100,
            bmi: 50.0,
            blood_pressure: 200,
            cholesterol: 400,
            glucose: 300,
            ..HealthMetrics::sample()
        };
        assert!(low.validate().is_ok());
        assert!(high.validate().is_ok());
    }

    #[test]
    fn test_enum_parsing_rejects_unknown_values() {
        assert_eq!("Female".parse::<Gender>().ok(), Some(Gender::Female));
        assert_eq!("Moderate".parse::<ActivityLevel>().ok(), Some(ActivityLevel::Moderate));
        assert!(matches!(
            "Other".parse::<Gender>(),
            Err(VitalisError::InvalidInput(_))
        ));
        assert!(matches!(
            "Extreme".parse::<ActivityLevel>(),
            Err(VitalisError::InvalidInput(_))
        ));
        assert!(matches!(
            "yes".parse::<YesNo>(),
            Err(VitalisError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_deserialize_requires_every_field() {
        let missing = r#"{
            "age": 30, "gender": "Male", "bmi": 27.0, "blood_pressure": 120,
            "cholesterol": 200, "glucose": 100, "activity": "Low",
            "smoking": "No", "alcohol": "No"
        }"#;
        assert!(serde_json::from_str::<HealthMetrics>(missing).is_err());

        let unknown_enum = r#"{
            "age": 30, "gender": "Male", "bmi": 27.0, "blood_pressure": 120,
            "cholesterol": 200, "glucose": 100, "activity": "Sedentary",
            "smoking": "No", "alcohol": "No", "family_history": "No"
        }"#;
        assert!(serde_json::from_str::<HealthMetrics>(unknown_enum).is_err());
    }
}
