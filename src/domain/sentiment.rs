//! Sentiment results for free-text feedback.

use serde::Serialize;

use crate::VitalisError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Positive => write!(f, "POSITIVE"),
            Self::Negative => write!(f, "NEGATIVE"),
            Self::Neutral => write!(f, "NEUTRAL"),
        }
    }
}

/// Label plus a confidence in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SentimentResult {
    label: SentimentLabel,
    confidence: f64,
}

impl SentimentResult {
    /// # Errors
    /// Returns `InvalidInput` if `confidence` is non-finite or outside [0, 1].
    pub fn new(label: SentimentLabel, confidence: f64) -> Result<Self, VitalisError> {
        if !confidence.is_finite() || !(0.0..=1.0).contains(&confidence) {
            return Err(VitalisError::InvalidInput(format!(
                "confidence must be within [0, 1], got {confidence}"
            )));
        }
        Ok(Self { label, confidence })
    }

    #[must_use]
    pub fn label(&self) -> SentimentLabel {
        self.label
    }

    #[must_use]
    pub fn confidence(&self) -> f64 {
        self.confidence
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_bounds() {
        assert!(SentimentResult::new(SentimentLabel::Positive, 0.0).is_ok());
        assert!(SentimentResult::new(SentimentLabel::Positive, 1.0).is_ok());
        assert!(SentimentResult::new(SentimentLabel::Negative, 1.01).is_err());
        assert!(SentimentResult::new(SentimentLabel::Negative, -0.1).is_err());
        assert!(SentimentResult::new(SentimentLabel::Neutral, f64::NAN).is_err());
    }
}
