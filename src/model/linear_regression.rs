use crate::parsing::salaries::{FEATURE_COLUMN, TARGET_COLUMN};
use crate::parsing::Dataset;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::Model;

/// A straight line `salary = slope * experience + intercept`, fitted by ordinary least squares.
/// This is also the on-disk artifact format
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LinearRegression {
    feature: String,
    target: String,
    slope: f64,
    intercept: f64,
    n_samples: usize,
}

#[derive(Error, Debug, PartialEq)]
pub enum FitError {
    #[error("Need at least 2 samples to fit a line, got {0}")]
    NotEnoughSamples(usize),

    #[error("Feature and target columns differ in length ({features} vs {targets})")]
    LengthMismatch { features: usize, targets: usize },

    #[error("Every sample has the same experience value, the slope is undefined")]
    ConstantFeature,

    #[error("Values are too large to fit, the coefficients overflow")]
    NonFinite,
}

#[derive(Error, Debug)]
pub enum ArtifactError {
    #[error("Model artifact not found at {}", .0.display())]
    NotFound(PathBuf),

    #[error("Model artifact at {} is corrupt: {source}", .path.display())]
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Model artifact was fitted on {found:?}, expected {expected:?}")]
    FeatureMismatch { expected: String, found: String },

    #[error("Refusing to save a model with a non-finite coefficient")]
    NonFinite,

    #[error("Failed to serialize model: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl LinearRegression {
    /// Build a model from known coefficients
    pub fn new(slope: f64, intercept: f64) -> LinearRegression {
        LinearRegression {
            feature: FEATURE_COLUMN.to_string(),
            target: TARGET_COLUMN.to_string(),
            slope,
            intercept,
            n_samples: 0,
        }
    }

    /// Fit the line minimizing the squared residuals of salary against experience.
    /// Uses the closed form: slope = Sxy / Sxx, intercept = mean(y) - slope * mean(x)
    pub fn fit(dataset: &Dataset) -> Result<LinearRegression, FitError> {
        let n = dataset.experience.len();

        if dataset.salary.len() != n {
            return Err(FitError::LengthMismatch {
                features: n,
                targets: dataset.salary.len(),
            });
        }
        if n < 2 {
            return Err(FitError::NotEnoughSamples(n));
        }

        // Both means exist since n >= 2
        let x_mean = dataset.experience.mean().unwrap_or_default();
        let y_mean = dataset.salary.mean().unwrap_or_default();

        let dx = &dataset.experience - x_mean;
        let dy = &dataset.salary - y_mean;
        let sxx = dx.dot(&dx);

        if sxx == 0f64 {
            return Err(FitError::ConstantFeature);
        }

        let slope = dx.dot(&dy) / sxx;
        let intercept = y_mean - slope * x_mean;

        if !slope.is_finite() || !intercept.is_finite() {
            return Err(FitError::NonFinite);
        }

        Ok(LinearRegression {
            feature: FEATURE_COLUMN.to_string(),
            target: TARGET_COLUMN.to_string(),
            slope,
            intercept,
            n_samples: n,
        })
    }

    pub fn slope(&self) -> f64 {
        self.slope
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    pub fn n_samples(&self) -> usize {
        self.n_samples
    }

    /// Coefficient of determination of the model on a dataset
    pub fn r_squared(&self, dataset: &Dataset) -> f64 {
        let predictions = dataset.experience.mapv(|x| self.predict(x));
        let residuals = &dataset.salary - &predictions;
        let ss_res = residuals.dot(&residuals);

        let y_mean = dataset.salary.mean().unwrap_or_default();
        let dy = &dataset.salary - y_mean;
        let ss_tot = dy.dot(&dy);

        if ss_tot == 0f64 {
            // Constant target: perfect iff every residual is zero
            return if ss_res == 0f64 { 1f64 } else { 0f64 };
        }

        1f64 - ss_res / ss_tot
    }

    /// Write the model as JSON, creating the parent directory if needed.
    /// JSON has no NaN or infinity, so a non-finite model is refused before anything is written
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ArtifactError> {
        let path = path.as_ref();

        if !self.slope.is_finite() || !self.intercept.is_finite() {
            return Err(ArtifactError::NonFinite);
        }

        if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }

        let data = serde_json::to_string_pretty(self).map_err(ArtifactError::Serialize)?;
        fs::write(path, data)?;

        Ok(())
    }

    /// Read a model written by `save`.
    /// A missing file is reported separately from one that exists but can't be used
    pub fn load(path: impl AsRef<Path>) -> Result<LinearRegression, ArtifactError> {
        let path = path.as_ref();

        let data = match fs::read(path) {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(ArtifactError::NotFound(path.to_path_buf()))
            }
            Err(e) => return Err(e.into()),
        };

        let model: LinearRegression =
            serde_json::from_slice(&data).map_err(|source| ArtifactError::Corrupt {
                path: path.to_path_buf(),
                source,
            })?;

        model.validate()?;

        Ok(model)
    }

    fn validate(&self) -> Result<(), ArtifactError> {
        for (expected, found) in [(FEATURE_COLUMN, &self.feature), (TARGET_COLUMN, &self.target)] {
            if found != expected {
                return Err(ArtifactError::FeatureMismatch {
                    expected: expected.to_string(),
                    found: found.clone(),
                });
            }
        }

        Ok(())
    }
}

impl Model for LinearRegression {
    fn predict(&self, experience: f64) -> f64 {
        self.slope * experience + self.intercept
    }
}
