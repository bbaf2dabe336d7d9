//! Request handlers

use crate::parsing::salaries::FEATURE_COLUMN;
use crate::server::{ApiError, AppState, PredictInputError};
use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::State;
use axum::response::Html;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;

const INDEX_HTML: &str = include_str!("../../templates/index.html");

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub model_loaded: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PredictResponse {
    pub status: String,
    pub experience_years: f64,
    pub predicted_salary: f64,
}

pub async fn home() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        model_loaded: state.model_loaded(),
    })
}

/// Predict the salary for `{"experience": <years>}`.
///
/// The body is taken as raw bytes so that every malformed request, whatever its
/// content type, gets the same 400 JSON error instead of an extractor rejection.
/// A body that can't be read at all (e.g. over the size limit) is a 400 as well.
pub async fn predict(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<PredictResponse>, ApiError> {
    let model = state.model().ok_or(ApiError::ModelNotLoaded)?;
    let body = body.map_err(|e| PredictInputError::UnreadableBody(e.body_text()))?;
    let experience = parse_experience(&body)?;

    let prediction = model.predict(experience);
    if !prediction.is_finite() {
        tracing::error!(experience, prediction, "Model returned a non-finite prediction");
        return Err(ApiError::PredictionFailed);
    }

    Ok(Json(PredictResponse {
        status: "success".to_string(),
        experience_years: experience,
        predicted_salary: round_cents(prediction),
    }))
}

/// Extract the experience value from a request body.
/// Numbers are taken as is, numeric strings are converted
pub fn parse_experience(body: &[u8]) -> Result<f64, PredictInputError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(PredictInputError::MissingBody);
    }

    let value: Value = serde_json::from_slice(body)
        .map_err(|e| PredictInputError::InvalidJson(e.to_string()))?;

    let experience = match value.get(FEATURE_COLUMN) {
        None => return Err(PredictInputError::MissingField),
        Some(Value::Null) => return Err(PredictInputError::NullField),
        Some(Value::Number(n)) => n.as_f64().ok_or(PredictInputError::NotNumeric)?,
        Some(Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| PredictInputError::NotNumeric)?,
        Some(_) => return Err(PredictInputError::NotNumeric),
    };

    if !experience.is_finite() {
        return Err(PredictInputError::NotFinite);
    }

    Ok(experience)
}

/// Round half away from zero to 2 decimal places.
/// Values too large to scale by 100 have no fractional part and are returned as is
pub fn round_cents(value: f64) -> f64 {
    let cents = value * 100f64;
    if !cents.is_finite() {
        return value;
    }
    cents.round() / 100f64
}
