//! # Vitalis
//!
//! Local chronic disease risk check.
//!
//! This crate provides:
//! - Encoding of user-entered health metrics into the risk model's feature row
//! - Rule-based lifestyle advisories derived from the same metrics
//! - A terminal UI with an Age vs BMI population comparison chart
//! - Optional sentiment analysis of free-text feedback
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Core types and pure functions (metrics, encoder, advisories, risk labels)
//! - `ports`: Trait definitions for the external classifiers
//! - `adapters`: Concrete implementations (JSON logistic model, lexicon sentiment)
//! - `application`: Use cases orchestrating domain and ports
//! - `config`: Environment-driven runtime settings
//! - `tui`: Terminal user interface

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod tui;

pub use domain::{
    advise, encode, format_risk, Advisory, Assessment, FeatureVector, HealthMetrics, RiskLabel,
};

/// Result type for Vitalis operations
pub type Result<T> = std::result::Result<T, VitalisError>;

/// Main error type for Vitalis
#[derive(Debug, thiserror::Error)]
pub enum VitalisError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Prediction failed: {0}")]
    PredictionFailure(#[from] ports::ClassifierError),

    #[error("Classifier returned label {0}, expected 0 or 1")]
    ClassifierLabelOutOfRange(i64),

    #[error("Model not loaded: {0}")]
    ModelNotLoaded(String),

    #[error("Model already loaded; runtime reload is not supported")]
    ModelAlreadyLoaded,

    #[error("Model integrity check failed: {0}")]
    ModelIntegrity(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
