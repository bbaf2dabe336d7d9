//! HTTP prediction server
//!
//! Serves a home page, a health check and `/predict` on top of an [`AppState`]
//! built once at startup.

pub mod api;
pub mod handlers;
pub mod state;

pub use api::{router, PredictionServer};
pub use state::AppState;

use crate::model::linear_regression::ArtifactError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Server lifecycle errors
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Failed to bind: {0}")]
    Bind(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to load model: {0}")]
    Model(#[from] ArtifactError),
}

pub type Result<T> = std::result::Result<T, ServerError>;

/// Why a `/predict` body was rejected
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PredictInputError {
    #[error("Request body is empty, expected a JSON object")]
    MissingBody,

    #[error("Request body could not be read: {0}")]
    UnreadableBody(String),

    #[error("Request body is not valid JSON: {0}")]
    InvalidJson(String),

    #[error("Missing field 'experience'")]
    MissingField,

    #[error("Field 'experience' must not be null")]
    NullField,

    #[error("Field 'experience' must be a number")]
    NotNumeric,

    #[error("Field 'experience' must be a finite number")]
    NotFinite,
}

/// Errors returned to API clients
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Model not loaded. Train first.")]
    ModelNotLoaded,

    #[error(transparent)]
    BadInput(#[from] PredictInputError),

    #[error("Prediction failed")]
    PredictionFailed,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadInput(_) => StatusCode::BAD_REQUEST,
            ApiError::ModelNotLoaded | ApiError::PredictionFailed => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}
