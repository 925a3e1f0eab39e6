//! Ports layer: Trait definitions for external operations.
//!
//! Following Hexagonal Architecture, these traits define the boundaries
//! between the application and the pre-trained models it consumes.

mod classifier;
mod sentiment;

pub use classifier::{ClassifierError, RiskClassifier};
pub use sentiment::SentimentClassifier;
