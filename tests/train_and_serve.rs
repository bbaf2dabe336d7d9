use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use salary_predictor::config::ServerConfig;
use salary_predictor::parsing::DatasetError;
use salary_predictor::server::PredictionServer;
use salary_predictor::trainer::{self, TrainError};
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tower::ServiceExt;

const TOLERANCE: f64 = 1.0;

fn write_dataset(dir: &TempDir, contents: &str) -> PathBuf {
    let path = dir.path().join("data").join("salaries.csv");
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, contents).unwrap();
    path
}

fn serve(model_path: &Path) -> Router {
    PredictionServer::new(ServerConfig::default().with_model_path(model_path))
        .unwrap()
        .router()
}

async fn predict(app: Router, experience: f64) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/predict")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({ "experience": experience }).to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();

    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_three_points_predict_next() {
    let dir = TempDir::new().unwrap();
    let data = write_dataset(&dir, "experience,salary\n1,35000\n2,40000\n3,45000\n");
    let model_path = dir.path().join("model").join("salary_model.json");

    trainer::train(&data, &model_path).unwrap();
    let (status, body) = predict(serve(&model_path), 4.0).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["experience_years"].as_f64(), Some(4.0));
    let salary = body["predicted_salary"].as_f64().unwrap();
    assert!((salary - 50000.0).abs() <= TOLERANCE, "got {salary}");
}

#[tokio::test]
async fn test_round_trip_on_known_line_with_held_out_values() {
    let dir = TempDir::new().unwrap();
    let rows: String = [0.5, 1.0, 2.5, 4.0, 6.5, 8.0, 11.0]
        .iter()
        .map(|x| format!("{},{}\n", x, 5000.0 * x + 30000.0))
        .collect();
    let data = write_dataset(&dir, &format!("YearsExperience,Salary\n{rows}"));
    let model_path = dir.path().join("model").join("salary_model.json");

    trainer::train(&data, &model_path).unwrap();

    for experience in [0.0, 3.3, 7.25, 15.0, -2.0] {
        let (status, body) = predict(serve(&model_path), experience).await;

        assert_eq!(status, StatusCode::OK);
        let salary = body["predicted_salary"].as_f64().unwrap();
        let expected = 5000.0 * experience + 30000.0;
        assert!(
            (salary - expected).abs() <= TOLERANCE,
            "experience {experience}: got {salary}, expected {expected}"
        );
    }
}

#[tokio::test]
async fn test_health_flips_after_training() {
    let dir = TempDir::new().unwrap();
    let data = write_dataset(&dir, "experience,salary\n1,10\n2,20\n");
    let model_path = dir.path().join("model").join("salary_model.json");

    let health = |app: Router| async move {
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice::<Value>(&bytes).unwrap()
    };

    let before = health(serve(&model_path)).await;
    assert_eq!(before["model_loaded"], false);

    trainer::train(&data, &model_path).unwrap();

    let after = health(serve(&model_path)).await;
    assert_eq!(after["model_loaded"], true);
}

#[tokio::test]
async fn test_missing_dataset_leaves_server_untrained() {
    let dir = TempDir::new().unwrap();
    let model_path = dir.path().join("model").join("salary_model.json");

    let err = trainer::train(dir.path().join("absent.csv"), &model_path).unwrap_err();
    assert!(matches!(err, TrainError::Dataset(DatasetError::NotFound(_))));

    let (status, body) = predict(serve(&model_path), 1.0).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!body["error"].as_str().unwrap().is_empty());
}
