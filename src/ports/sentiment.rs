//! Sentiment port: Trait for the free-text sentiment classifier.

use super::ClassifierError;
use crate::domain::SentimentResult;

pub trait SentimentClassifier: Send + Sync {
    /// Classify a piece of text.
    ///
    /// # Errors
    /// Returns `ClassifierError` if the collaborator fails.
    fn classify(&self, text: &str) -> Result<SentimentResult, ClassifierError>;
}
