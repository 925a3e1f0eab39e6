//! Feedback service: sentiment analysis of free-text comments.

use std::sync::Arc;

use crate::adapters::redact::Redacted;
use crate::domain::SentimentResult;
use crate::ports::SentimentClassifier;
use crate::VitalisError;

/// Longest accepted feedback, in characters.
pub const MAX_FEEDBACK_CHARS: usize = 2000;

pub struct FeedbackService<S>
where
    S: SentimentClassifier,
{
    classifier: Arc<S>,
}

impl<S> FeedbackService<S>
where
    S: SentimentClassifier,
{
    pub fn new(classifier: Arc<S>) -> Self {
        Self { classifier }
    }

    /// Classify the sentiment of `text`.
    ///
    /// # Errors
    /// Returns `InvalidInput` for blank or overlong text and
    /// `PredictionFailure` if the classifier fails.
    pub fn analyze(&self, text: &str) -> Result<SentimentResult, VitalisError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(VitalisError::InvalidInput("feedback text is empty".into()));
        }
        let chars = text.chars().count();
        if chars > MAX_FEEDBACK_CHARS {
            return Err(VitalisError::InvalidInput(format!(
                "feedback is {chars} characters, limit is {MAX_FEEDBACK_CHARS}"
            )));
        }

        tracing::debug!(text = %Redacted::new(text), "Classifying feedback");
        let result = self.classifier.classify(text)?;
        tracing::info!(
            "Feedback sentiment: {} ({:.0}%)",
            result.label(),
            result.confidence() * 100.0
        );

        Ok(result)
    }
}
