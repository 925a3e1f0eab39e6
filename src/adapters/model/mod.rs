//! Logistic model adapter: Implementation of RiskClassifier.
//!
//! Loads a logistic-regression export (`model.json`) and scores feature rows
//! in plain floating point.
//!
//! # Integrity
//!
//! - The export must list exactly the encoder's column names, in order
//! - If `model.sha256` sits next to the model, the model bytes must hash to it
//! - With `require_digest`, a missing digest file refuses the load
//!
//! # Lifetime
//!
//! The model is loaded once at startup and installed in the process-wide
//! handle (see [`init_global`]). It is immutable afterwards and there is no
//! runtime reload.

mod handle;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::domain::{FeatureVector, FEATURE_COUNT, FEATURE_NAMES};
use crate::ports::{ClassifierError, RiskClassifier};
use crate::VitalisError;

pub use handle::{global, init_global};

/// Model file looked up when the configured path is a directory.
pub const MODEL_FILE: &str = "model.json";

/// Optional digest file next to the model (`sha256sum` output format).
pub const DIGEST_FILE: &str = "model.sha256";

/// Model parameters as exported by the training pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExportedLogisticModel {
    pub feature_names: Vec<String>,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    /// Probability at or above which the label is 1.
    pub threshold: f64,
}

fn sha256_hex_bytes(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    digest.iter().map(|b| format!("{b:02x}")).collect()
}

// Constant-time compare for ASCII strings (used for SHA-256 hex digests).
fn constant_time_eq_str(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff: u8 = 0;
    for (x, y) in a.as_bytes().iter().zip(b.as_bytes().iter()) {
        diff |= x ^ y;
    }
    diff == 0
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Binary risk classifier backed by a logistic-regression export.
#[derive(Debug, Clone)]
pub struct LogisticModel {
    params: ExportedLogisticModel,
    /// SHA-256 of the loaded model bytes (empty when built in memory)
    digest: String,
}

impl LogisticModel {
    /// Load the model from a file or from a directory containing `model.json`.
    ///
    /// # Errors
    /// Returns `ModelNotLoaded` if no model file exists, `ModelIntegrity` if the
    /// digest check or the schema check fails, and `Io`/`Serialization` for
    /// unreadable or malformed files.
    pub fn load(model_path: &Path, require_digest: bool) -> Result<Self, VitalisError> {
        let model_file = if model_path.is_dir() {
            model_path.join(MODEL_FILE)
        } else {
            model_path.to_path_buf()
        };

        if !model_file.is_file() {
            return Err(VitalisError::ModelNotLoaded(format!(
                "No model file at {:?} (expected {MODEL_FILE})",
                model_file
            )));
        }

        let bytes = std::fs::read(&model_file)?;
        let digest = sha256_hex_bytes(&bytes);

        let digest_path = model_file
            .parent()
            .map(|dir| dir.join(DIGEST_FILE))
            .unwrap_or_else(|| PathBuf::from(DIGEST_FILE));
        Self::verify_digest(&digest_path, &digest, require_digest)?;

        let params: ExportedLogisticModel = serde_json::from_slice(&bytes)?;
        let mut model = Self::from_params(params)?;
        model.digest = digest;

        tracing::info!(
            "Loaded risk model from {:?} (sha256 {})",
            model_file,
            &model.digest[..12]
        );

        Ok(model)
    }

    /// Build a model from in-memory parameters.
    ///
    /// # Errors
    /// Returns `ModelIntegrity` if the columns differ from the encoder's, the
    /// coefficient count is wrong, a parameter is non-finite, or the threshold
    /// is not strictly inside (0, 1).
    pub fn from_params(params: ExportedLogisticModel) -> Result<Self, VitalisError> {
        if params.feature_names.len() != FEATURE_COUNT
            || params
                .feature_names
                .iter()
                .zip(FEATURE_NAMES)
                .any(|(got, want)| got != want)
        {
            return Err(VitalisError::ModelIntegrity(format!(
                "model columns {:?} do not match encoder columns {:?}",
                params.feature_names, FEATURE_NAMES
            )));
        }
        if params.coefficients.len() != FEATURE_COUNT {
            return Err(VitalisError::ModelIntegrity(format!(
                "expected {FEATURE_COUNT} coefficients, got {}",
                params.coefficients.len()
            )));
        }
        if !params.intercept.is_finite() || params.coefficients.iter().any(|c| !c.is_finite()) {
            return Err(VitalisError::ModelIntegrity(
                "model parameters must be finite".into(),
            ));
        }
        if !(params.threshold > 0.0 && params.threshold < 1.0) {
            return Err(VitalisError::ModelIntegrity(format!(
                "threshold must be inside (0, 1), got {}",
                params.threshold
            )));
        }

        Ok(Self {
            params,
            digest: String::new(),
        })
    }

    fn verify_digest(path: &Path, actual: &str, require: bool) -> Result<(), VitalisError> {
        if !path.exists() {
            if require {
                return Err(VitalisError::ModelIntegrity(format!(
                    "digest file {:?} is required but missing",
                    path
                )));
            }
            tracing::warn!("No {DIGEST_FILE} next to model; skipping integrity check");
            return Ok(());
        }

        let content = std::fs::read_to_string(path)?;
        let expected = content
            .split_whitespace()
            .next()
            .ok_or_else(|| VitalisError::ModelIntegrity(format!("digest file {:?} is empty", path)))?
            .to_ascii_lowercase();

        if !constant_time_eq_str(&expected, actual) {
            return Err(VitalisError::ModelIntegrity(format!(
                "SHA-256 mismatch (expected {expected}, got {actual})"
            )));
        }

        tracing::debug!("Model digest verified");
        Ok(())
    }

    /// SHA-256 of the model file, hex encoded.
    #[must_use]
    pub fn digest(&self) -> &str {
        &self.digest
    }

    #[must_use]
    pub fn threshold(&self) -> f64 {
        self.params.threshold
    }

    /// Probability of the positive (high risk) class.
    #[must_use]
    pub fn probability(&self, features: &FeatureVector) -> f64 {
        let z = features
            .to_f64_vec()
            .iter()
            .zip(&self.params.coefficients)
            .fold(self.params.intercept, |acc, (x, w)| acc + x * w);
        sigmoid(z)
    }
}

impl RiskClassifier for LogisticModel {
    fn predict(&self, features: &FeatureVector) -> Result<i64, ClassifierError> {
        let probability = self.probability(features);
        if !probability.is_finite() {
            return Err(ClassifierError::Inference(format!(
                "non-finite probability {probability}"
            )));
        }

        let threshold = self.threshold();
        tracing::debug!("Model probability {:.4} (threshold {:.2})", probability, threshold);

        Ok(if probability >= threshold { 1 } else { 0 })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::domain::{encode, ActivityLevel, HealthMetrics, YesNo};
    use tempfile::tempdir;

    pub(crate) fn test_params() -> ExportedLogisticModel {
        ExportedLogisticModel {
            feature_names: FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
            coefficients: vec![0.05, -0.2, 0.1, 0.02, 0.008, 0.015, -0.4, 0.8, 0.3, 0.7],
            intercept: -12.0,
            threshold: 0.5,
        }
    }

    fn write_model(dir: &Path, params: &ExportedLogisticModel) -> Vec<u8> {
        let bytes = serde_json::to_vec(params).expect("serialize model");
        std::fs::write(dir.join(MODEL_FILE), &bytes).expect("write model");
        bytes
    }

    #[test]
    fn test_load_from_directory_without_digest() {
        let dir = tempdir().expect("tempdir");
        let bytes = write_model(dir.path(), &test_params());

        let model = LogisticModel::load(dir.path(), false).expect("Should load");
        assert_eq!(model.digest(), sha256_hex_bytes(&bytes));
    }

    #[test]
    fn test_load_requires_digest_when_configured() {
        let dir = tempdir().expect("tempdir");
        write_model(dir.path(), &test_params());

        let err = LogisticModel::load(dir.path(), true).expect_err("Should refuse");
        assert!(matches!(err, VitalisError::ModelIntegrity(_)));
    }

    #[test]
    fn test_load_verifies_digest() {
        let dir = tempdir().expect("tempdir");
        let bytes = write_model(dir.path(), &test_params());
        std::fs::write(
            dir.path().join(DIGEST_FILE),
            format!("{}  {MODEL_FILE}\n", sha256_hex_bytes(&bytes)),
        )
        .expect("write digest");

        assert!(LogisticModel::load(dir.path(), true).is_ok());
    }

    #[test]
    fn test_load_rejects_tampered_model() {
        let dir = tempdir().expect("tempdir");
        write_model(dir.path(), &test_params());
        std::fs::write(dir.path().join(DIGEST_FILE), "0".repeat(64)).expect("write digest");

        let err = LogisticModel::load(dir.path(), false).expect_err("Should refuse");
        assert!(matches!(err, VitalisError::ModelIntegrity(_)));
    }

    #[test]
    fn test_load_missing_model() {
        let dir = tempdir().expect("tempdir");
        let err = LogisticModel::load(dir.path(), false).expect_err("Should fail");
        assert!(matches!(err, VitalisError::ModelNotLoaded(_)));
    }

    #[test]
    fn test_rejects_reordered_columns() {
        let mut params = test_params();
        params.feature_names.swap(4, 5);
        let err = LogisticModel::from_params(params).expect_err("Should refuse");
        assert!(matches!(err, VitalisError::ModelIntegrity(_)));
    }

    #[test]
    fn test_rejects_bad_parameters() {
        let mut short = test_params();
        short.coefficients.pop();
        assert!(LogisticModel::from_params(short).is_err());

        let mut nan = test_params();
        nan.intercept = f64::NAN;
        assert!(LogisticModel::from_params(nan).is_err());

        let mut threshold = test_params();
        threshold.threshold = 1.0;
        assert!(LogisticModel::from_params(threshold).is_err());
    }

    #[test]
    fn test_predict_labels() {
        let model = LogisticModel::from_params(test_params()).expect("Should build");

        let healthy = encode(&HealthMetrics::sample()).expect("Should encode");
        assert_eq!(model.predict(&healthy).expect("Should predict"), 0);

        let risky = encode(&HealthMetrics {
            age: 60,
            bmi: 35.0,
            blood_pressure: 160,
            cholesterol: 300,
            glucose: 200,
            activity: ActivityLevel::Low,
            smoking: YesNo::Yes,
            alcohol: YesNo::Yes,
            family_history: YesNo::Yes,
            ..HealthMetrics::sample()
        })
        .expect("Should encode");
        assert_eq!(model.predict(&risky).expect("Should predict"), 1);
        assert!(model.probability(&risky) > model.probability(&healthy));
    }
}
