//! Lexicon adapter: word-list implementation of SentimentClassifier.
//!
//! Counts positive and negative words. The confidence is the dominant
//! polarity's share of all matched words; with no matches or a tie the text
//! is Neutral at 0.5.

use crate::domain::{SentimentLabel, SentimentResult};
use crate::ports::{ClassifierError, SentimentClassifier};

const POSITIVE_WORDS: &[&str] = &[
    "good", "great", "excellent", "helpful", "useful", "clear", "easy", "love", "like", "nice",
    "happy", "thanks", "thank", "better", "amazing", "motivated", "motivating", "encouraging",
    "simple", "fast", "accurate", "healthy", "awesome", "fantastic", "glad",
];

const NEGATIVE_WORDS: &[&str] = &[
    "bad", "poor", "terrible", "useless", "confusing", "unclear", "hard", "hate", "dislike",
    "slow", "wrong", "worse", "worst", "awful", "inaccurate", "annoying", "scary", "worried",
    "sad", "broken", "frustrating", "difficult", "disappointing", "unhelpful", "boring",
];

/// Sentiment classifier backed by fixed word lists.
#[derive(Debug, Default, Clone, Copy)]
pub struct LexiconSentiment;

impl LexiconSentiment {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn score(text: &str) -> (usize, usize) {
        let mut positive = 0;
        let mut negative = 0;
        for word in text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
        {
            let word = word.to_lowercase();
            if POSITIVE_WORDS.contains(&word.as_str()) {
                positive += 1;
            } else if NEGATIVE_WORDS.contains(&word.as_str()) {
                negative += 1;
            }
        }
        (positive, negative)
    }
}

impl SentimentClassifier for LexiconSentiment {
    fn classify(&self, text: &str) -> Result<SentimentResult, ClassifierError> {
        if text.trim().is_empty() {
            return Err(ClassifierError::MalformedInput("empty text".into()));
        }

        let (positive, negative) = Self::score(text);
        let matched = positive + negative;

        let (label, confidence) = if matched == 0 || positive == negative {
            (SentimentLabel::Neutral, 0.5)
        } else if positive > negative {
            (SentimentLabel::Positive, positive as f64 / matched as f64)
        } else {
            (SentimentLabel::Negative, negative as f64 / matched as f64)
        };

        tracing::trace!("Lexicon matched {positive} positive / {negative} negative words");

        SentimentResult::new(label, confidence)
            .map_err(|e| ClassifierError::Inference(e.to_string()))
    }
}
