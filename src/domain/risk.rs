//! Risk labels and assessment records.
//!
//! Represents the output of one risk check.

use serde::Serialize;

use super::advisory::AdvisoryList;
use super::features::FeatureVector;
use super::metrics::HealthMetrics;
use crate::VitalisError;

/// Binary risk verdict from the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RiskLabel {
    /// Prediction 0
    Low,
    /// Prediction 1
    High,
}

impl RiskLabel {
    /// Map a raw classifier label. Only 0 and 1 are meaningful.
    #[must_use]
    pub fn from_prediction(prediction: i64) -> Option<Self> {
        match prediction {
            0 => Some(Self::Low),
            1 => Some(Self::High),
            _ => None,
        }
    }

    #[must_use]
    pub fn prediction(&self) -> i64 {
        match self {
            Self::Low => 0,
            Self::High => 1,
        }
    }

    /// Display label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low Risk",
            Self::High => "High Risk",
        }
    }

    /// Get a human-readable description.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::Low => "No elevated chronic disease risk predicted",
            Self::High => "Elevated chronic disease risk predicted - consider a check-up",
        }
    }

    /// Get the associated color for TUI display (RGB).
    #[must_use]
    pub fn color(&self) -> (u8, u8, u8) {
        match self {
            Self::Low => (16, 185, 129), // Emerald (#10B981)
            Self::High => (244, 63, 94), // Rose (#F43F5E)
        }
    }
}

impl std::fmt::Display for RiskLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Format a raw classifier label for display.
///
/// # Errors
/// Returns `InvalidInput` for anything other than 0 or 1.
pub fn format_risk(prediction: i64) -> Result<&'static str, VitalisError> {
    RiskLabel::from_prediction(prediction)
        .map(|label| label.label())
        .ok_or_else(|| {
            VitalisError::InvalidInput(format!("prediction must be 0 or 1, got {prediction}"))
        })
}

/// Outputs of a single risk check, kept in memory for display only.
#[derive(Debug, Clone, Serialize)]
pub struct Assessment {
    /// Unique identifier
    pub id: String,

    /// Metrics the check was run on
    pub metrics: HealthMetrics,

    /// Encoded model input
    pub features: FeatureVector,

    /// Raw classifier label
    pub prediction: i64,

    pub risk: RiskLabel,

    /// Rule-based advisories, independent of `risk`
    pub advisories: AdvisoryList,

    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Assessment {
    #[must_use]
    pub fn new(
        metrics: HealthMetrics,
        features: FeatureVector,
        risk: RiskLabel,
        advisories: AdvisoryList,
    ) -> Self {
        Self {
            id: uuid_v4(),
            metrics,
            features,
            prediction: risk.prediction(),
            risk,
            advisories,
            created_at: chrono::Utc::now(),
        }
    }

    /// Number of advisories that call for a change.
    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.advisories.iter().filter(|a| a.is_warning()).count()
    }
}

/// Generate a random UUID v4 string.
fn uuid_v4() -> String {
    use rand::Rng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    let mut rng = ChaCha20Rng::from_entropy();
    let bytes: [u8; 16] = rng.gen();

    format!(
        "{:02x}{:02x}{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}{:02x}{:02x}{:02x}{:02x}",
        bytes[0], bytes[1], bytes[2], bytes[3],
        bytes[4], bytes[5],
        (bytes[6] & 0x0f) | 0x40, bytes[7],
        (bytes[8] & 0x3f) | 0x80, bytes[9],
        bytes[10], bytes[11], bytes[12], bytes[13], bytes[14], bytes[15]
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{advise, encode};

    #[test]
    fn test_format_risk_labels() {
        assert_eq!(format_risk(1).expect("1 is valid"), "High Risk");
        assert_eq!(format_risk(0).expect("0 is valid"), "Low Risk");
        assert_ne!(format_risk(0).ok(), format_risk(1).ok());
    }

    #[test]
    fn test_format_risk_rejects_other_values() {
        for bad in [-1, 2, 7, i64::MAX] {
            assert!(matches!(
                format_risk(bad),
                Err(VitalisError::InvalidInput(_))
            ));
        }
    }

    #[test]
    fn test_prediction_roundtrip() {
        for label in [RiskLabel::Low, RiskLabel::High] {
            assert_eq!(RiskLabel::from_prediction(label.prediction()), Some(label));
        }
    }

    #[test]
    fn test_assessment_creation() {
        let metrics = HealthMetrics {
            bmi: 33.0,
            ..HealthMetrics::sample()
        };
        let features = encode(&metrics).expect("Should encode");
        let advisories = advise(&metrics);
        let assessment = Assessment::new(metrics, features, RiskLabel::Low, advisories);

        assert_eq!(assessment.prediction, 0);
        assert_eq!(assessment.risk, RiskLabel::Low);
        // Obese + low activity, regardless of the Low verdict
        assert_eq!(assessment.warning_count(), 2);
    }

    #[test]
    fn test_uuid_generation() {
        let id1 = uuid_v4();
        let id2 = uuid_v4();
        assert_ne!(id1, id2);
        assert_eq!(id1.len(), 36);
        assert_eq!(&id1[14..15], "4");
    }
}
