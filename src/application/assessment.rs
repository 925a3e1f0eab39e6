//! Assessment service: Orchestrates one risk check.
//!
//! This service coordinates:
//! - Input validation
//! - Feature encoding
//! - Classifier call
//! - Advisory rules
//!
//! Errors are surfaced to the caller as-is. There are no retries and no
//! partial results.

use std::sync::Arc;

use crate::adapters::redact::Redacted;
use crate::domain::{advise, encode, Assessment, FeatureVector, HealthMetrics, RiskLabel};
use crate::ports::RiskClassifier;
use crate::VitalisError;

/// Pipeline stage, reported as a check progresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssessmentStage {
    Encoding,
    Predicting,
    Advising,
}

/// Service for running risk checks against a shared classifier.
///
/// The classifier is held behind an `Arc` and only read, so one service can be
/// shared across threads without locking.
pub struct AssessmentService<C>
where
    C: RiskClassifier,
{
    classifier: Arc<C>,
}

impl<C> AssessmentService<C>
where
    C: RiskClassifier,
{
    /// Create a new assessment service.
    pub fn new(classifier: Arc<C>) -> Self {
        Self { classifier }
    }

    /// Validate metrics and encode them into the model's feature row.
    ///
    /// # Errors
    /// Returns `InvalidInput` listing every domain violation.
    pub fn prepare(&self, metrics: &HealthMetrics) -> Result<FeatureVector, VitalisError> {
        metrics
            .validate()
            .map_err(|errors| VitalisError::InvalidInput(errors.join(", ")))?;
        encode(metrics)
    }

    /// Run the classifier on an encoded row and map its label.
    ///
    /// # Errors
    /// Returns `PredictionFailure` if the classifier fails and
    /// `ClassifierLabelOutOfRange` if it answers outside {0, 1}.
    pub fn classify(&self, features: &FeatureVector) -> Result<RiskLabel, VitalisError> {
        let prediction = self.classifier.predict(features)?;
        RiskLabel::from_prediction(prediction).ok_or_else(|| {
            tracing::error!("Classifier returned out-of-range label {prediction}");
            VitalisError::ClassifierLabelOutOfRange(prediction)
        })
    }

    /// Run a complete risk check.
    ///
    /// Performs the full pipeline:
    /// 1. Validate and encode metrics
    /// 2. Classify
    /// 3. Derive advisories (independent of the classifier)
    ///
    /// # Errors
    /// Returns error if any step fails.
    pub fn assess(&self, metrics: HealthMetrics) -> Result<Assessment, VitalisError> {
        self.assess_with_progress(metrics, |_| {})
    }

    /// Same as [`assess`](Self::assess), calling `on_stage` as each stage starts.
    ///
    /// # Errors
    /// Returns error if any step fails.
    pub fn assess_with_progress<P>(
        &self,
        metrics: HealthMetrics,
        mut on_stage: P,
    ) -> Result<Assessment, VitalisError>
    where
        P: FnMut(AssessmentStage),
    {
        tracing::debug!(metrics = ?Redacted::new(&metrics), "Starting risk check");

        on_stage(AssessmentStage::Encoding);
        let features = self.prepare(&metrics)?;

        on_stage(AssessmentStage::Predicting);
        let risk = self.classify(&features)?;

        on_stage(AssessmentStage::Advising);
        let advisories = advise(&metrics);

        let assessment = Assessment::new(metrics, features, risk, advisories);

        tracing::info!(
            "Risk check complete: risk={}, advisories={}, warnings={}",
            assessment.risk,
            assessment.advisories.len(),
            assessment.warning_count()
        );

        Ok(assessment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ActivityLevel, Advisory, YesNo};
    use crate::ports::ClassifierError;

    /// Stub classifier returning a fixed answer.
    struct FixedClassifier(Result<i64, ClassifierError>);

    impl RiskClassifier for FixedClassifier {
        fn predict(&self, _features: &FeatureVector) -> Result<i64, ClassifierError> {
            self.0.clone()
        }
    }

    fn service(answer: Result<i64, ClassifierError>) -> AssessmentService<FixedClassifier> {
        AssessmentService::new(Arc::new(FixedClassifier(answer)))
    }

    #[test]
    fn test_assess_pipeline() {
        let assessment = service(Ok(1))
            .assess(HealthMetrics::sample())
            .expect("Should assess");

        assert_eq!(assessment.risk, RiskLabel::High);
        assert_eq!(assessment.prediction, 1);
        assert_eq!(
            assessment.advisories,
            vec![Advisory::Overweight, Advisory::LowActivity]
        );
    }

    #[test]
    fn test_advisories_ignore_prediction() {
        let metrics = HealthMetrics {
            bmi: 35.0,
            cholesterol: 300,
            glucose: 200,
            smoking: YesNo::Yes,
            alcohol: YesNo::Yes,
            activity: ActivityLevel::Low,
            ..HealthMetrics::sample()
        };
        let low = service(Ok(0)).assess(metrics.clone()).expect("Should assess");
        let high = service(Ok(1)).assess(metrics).expect("Should assess");

        assert_eq!(low.risk, RiskLabel::Low);
        assert_eq!(low.advisories, high.advisories);
        assert_eq!(low.warning_count(), 6);
    }

    #[test]
    fn test_invalid_metrics_never_reach_classifier() {
        let metrics = HealthMetrics {
            age: 5,
            ..HealthMetrics::sample()
        };
        // The classifier would fail; validation must fail first.
        let err = service(Err(ClassifierError::Unavailable("down".into())))
            .assess(metrics)
            .expect_err("Should reject");
        assert!(matches!(err, VitalisError::InvalidInput(_)));
    }

    #[test]
    fn test_classifier_failure_is_prediction_failure() {
        let err = service(Err(ClassifierError::Unavailable("model file missing".into())))
            .assess(HealthMetrics::sample())
            .expect_err("Should fail");
        assert!(matches!(err, VitalisError::PredictionFailure(_)));
    }

    #[test]
    fn test_stages_reported_in_order() {
        let mut stages = Vec::new();
        service(Ok(0))
            .assess_with_progress(HealthMetrics::sample(), |stage| stages.push(stage))
            .expect("Should assess");
        assert_eq!(
            stages,
            vec![
                AssessmentStage::Encoding,
                AssessmentStage::Predicting,
                AssessmentStage::Advising
            ]
        );
    }

    #[test]
    fn test_failure_stops_at_stage() {
        let mut stages = Vec::new();
        let _ = service(Ok(9))
            .assess_with_progress(HealthMetrics::sample(), |stage| stages.push(stage));
        assert_eq!(stages.last(), Some(&AssessmentStage::Predicting));
    }

    #[test]
    fn test_out_of_range_label() {
        let err = service(Ok(3))
            .assess(HealthMetrics::sample())
            .expect_err("Should fail");
        assert!(matches!(err, VitalisError::ClassifierLabelOutOfRange(3)));
    }
}
