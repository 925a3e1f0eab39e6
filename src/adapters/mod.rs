//! Adapters layer: Concrete implementations of ports.
//!
//! These modules contain the actual collaborators:
//! - `model`: JSON logistic-regression risk classifier and its startup handle
//! - `lexicon`: word-list sentiment classifier
//! - `redact`: redaction wrapper for sensitive values in logs

pub mod lexicon;
pub mod model;
pub mod redact;
