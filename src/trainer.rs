use crate::model::linear_regression::{ArtifactError, FitError, LinearRegression};
use crate::parsing::{salaries, DatasetError};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrainError {
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error(transparent)]
    Fit(#[from] FitError),

    #[error(transparent)]
    Artifact(#[from] ArtifactError),
}

/// Outcome of a training run
#[derive(Debug)]
pub struct TrainReport {
    pub model: LinearRegression,
    pub r_squared: f64,
}

/// Load the dataset, fit the regression and save it to `model_path`.
/// A missing dataset aborts before anything is fitted or written
pub fn train(
    dataset_path: impl AsRef<Path>,
    model_path: impl AsRef<Path>,
) -> Result<TrainReport, TrainError> {
    let dataset_path = dataset_path.as_ref();
    let model_path = model_path.as_ref();

    tracing::info!("Starting training pipeline...");

    let dataset = salaries::parse_dataset(dataset_path)?;
    tracing::info!(
        "Loaded {} rows from '{}'",
        dataset.len(),
        dataset_path.display()
    );

    let model = LinearRegression::fit(&dataset)?;
    let r_squared = model.r_squared(&dataset);
    tracing::info!(
        slope = model.slope(),
        intercept = model.intercept(),
        r_squared,
        "Model trained"
    );

    model.save(model_path)?;
    tracing::info!("Model saved to '{}'", model_path.display());

    Ok(TrainReport { model, r_squared })
}
