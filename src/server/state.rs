//! Server application state
//!
//! Holds the model loaded at startup. It is never replaced afterwards, so
//! handlers share it through an `Arc` without locking.

use crate::model::linear_regression::{ArtifactError, LinearRegression};
use crate::model::Model;
use std::path::Path;
use std::sync::Arc;

#[derive(Clone, Default)]
pub struct AppState {
    model: Option<Arc<dyn Model>>,
}

impl AppState {
    /// State with no model, i.e. not trained yet
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_model(model: impl Model + 'static) -> Self {
        Self {
            model: Some(Arc::new(model)),
        }
    }

    /// Load the model artifact at `path`.
    ///
    /// A missing artifact is not an error: the server starts without a model.
    /// An artifact that exists but can't be loaded is.
    pub fn from_artifact(path: impl AsRef<Path>) -> Result<Self, ArtifactError> {
        let path = path.as_ref();

        match LinearRegression::load(path) {
            Ok(model) => {
                tracing::info!(
                    slope = model.slope(),
                    intercept = model.intercept(),
                    "Loaded model from '{}'",
                    path.display()
                );
                Ok(Self::with_model(model))
            }
            Err(ArtifactError::NotFound(_)) => {
                tracing::warn!(
                    "No model at '{}', starting without one. Run `train` first",
                    path.display()
                );
                Ok(Self::empty())
            }
            Err(e) => Err(e),
        }
    }

    pub fn model(&self) -> Option<&dyn Model> {
        self.model.as_deref()
    }

    pub fn model_loaded(&self) -> bool {
        self.model.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_empty_state() {
        let state = AppState::empty();

        assert!(!state.model_loaded());
        assert!(state.model().is_none());
    }

    #[test]
    fn test_with_model() {
        let state = AppState::with_model(LinearRegression::new(2.0, 1.0));

        assert!(state.model_loaded());
        assert_eq!(state.model().map(|m| m.predict(3.0)), Some(7.0));
    }

    #[test]
    fn test_from_artifact_missing_file_starts_empty() {
        let dir = TempDir::new().unwrap();

        let state = AppState::from_artifact(dir.path().join("salary_model.json")).unwrap();

        assert!(!state.model_loaded());
    }

    #[test]
    fn test_from_artifact_loads_model() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("salary_model.json");
        LinearRegression::new(5000.0, 30000.0).save(&path).unwrap();

        let state = AppState::from_artifact(&path).unwrap();

        assert_eq!(state.model().map(|m| m.predict(4.0)), Some(50000.0));
    }

    #[test]
    fn test_from_artifact_corrupt_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("salary_model.json");
        std::fs::write(&path, "{\"slope\": ").unwrap();

        let result = AppState::from_artifact(&path);

        assert!(matches!(result, Err(ArtifactError::Corrupt { .. })));
    }
}
