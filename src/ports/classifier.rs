//! Risk classifier port: Trait for the pre-trained binary risk model.
//!
//! This trait abstracts the model runtime from the application logic.

use crate::domain::FeatureVector;

/// Errors raised by an external classifier.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ClassifierError {
    #[error("Model unavailable: {0}")]
    Unavailable(String),

    #[error("Malformed model input: {0}")]
    MalformedInput(String),

    #[error("Inference failed: {0}")]
    Inference(String),
}

/// Trait for binary risk classification.
///
/// Implementations are loaded once and shared read-only, so `predict` takes
/// `&self` and must not mutate model state.
pub trait RiskClassifier: Send + Sync {
    /// Predict the risk label for one feature row.
    ///
    /// The contract is a label in {0, 1}. Callers check the range and treat
    /// anything else as a classifier fault.
    ///
    /// # Errors
    /// Returns `ClassifierError` if the model cannot score the row.
    fn predict(&self, features: &FeatureVector) -> Result<i64, ClassifierError>;
}
