//! Process-wide model handle.
//!
//! Initialized explicitly once at startup; read-only afterwards.

use std::sync::{Arc, OnceLock};

use super::LogisticModel;
use crate::VitalisError;

static MODEL: OnceLock<Arc<LogisticModel>> = OnceLock::new();

/// Install the loaded model as the process-wide handle.
///
/// # Errors
/// Returns `ModelAlreadyLoaded` on any call after the first.
pub fn init_global(model: LogisticModel) -> Result<Arc<LogisticModel>, VitalisError> {
    let model = Arc::new(model);
    MODEL
        .set(Arc::clone(&model))
        .map_err(|_| VitalisError::ModelAlreadyLoaded)?;
    tracing::info!("Risk model installed");
    Ok(model)
}

/// Shared handle to the startup model.
///
/// # Errors
/// Returns `ModelNotLoaded` if [`init_global`] has not run.
pub fn global() -> Result<Arc<LogisticModel>, VitalisError> {
    MODEL
        .get()
        .cloned()
        .ok_or_else(|| VitalisError::ModelNotLoaded("model handle not initialized".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::model::tests::test_params;

    // The handle is process-wide, so this is the only test that touches it.
    #[test]
    fn test_init_once_then_shared() {
        let model = LogisticModel::from_params(test_params()).expect("Should build");
        let installed = init_global(model.clone()).expect("First init succeeds");

        let again = init_global(model);
        assert!(matches!(again, Err(VitalisError::ModelAlreadyLoaded)));

        let shared = global().expect("Handle is set");
        assert!(Arc::ptr_eq(&installed, &shared));
    }
}
