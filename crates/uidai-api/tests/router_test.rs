use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use chrono::NaiveDate;
use serde_json::Value;
use tower::ServiceExt;

use uidai_analytics::AnalyticsEngine;
use uidai_api::{create_router, AppState};
use uidai_core::config::AnalyticsConfig;
use uidai_core::models::{AgeCounts, DatasetKind, IndianState, Record};
use uidai_store::{load_context, MemoryDatasetSource};

fn record(d: u32, state: IndianState, district: &str, pincode: &str, counts: AgeCounts) -> Record {
    let on = NaiveDate::from_ymd_opt(2025, 9, d).unwrap();
    Record::new(on, state, district, pincode.parse().unwrap(), counts)
}

fn test_router() -> Router {
    let source = MemoryDatasetSource::new()
        .with_records(
            DatasetKind::Enrollment,
            vec![
                record(1, IndianState::Bihar, "Patna", "800001", AgeCounts::new(300, 100, 20)),
                record(2, IndianState::Bihar, "Gaya", "823001", AgeCounts::new(200, 50, 10)),
                record(3, IndianState::Goa, "North Goa", "403001", AgeCounts::new(100, 20, 0)),
            ],
        )
        .with_records(
            DatasetKind::Demographic,
            vec![record(2, IndianState::Goa, "North Goa", "403001", AgeCounts::updates(40, 60))],
        );
    let context = load_context(&source).unwrap();
    let engine = AnalyticsEngine::new(Arc::new(context), AnalyticsConfig::default());
    create_router(Arc::new(AppState::new(Arc::new(engine))))
}

async fn get(router: Router, uri: &str) -> (StatusCode, Value) {
    let response = router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_root_and_health() {
    let (status, body) = get(test_router(), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "running");
    assert!(body["endpoints"].as_array().unwrap().len() >= 7);

    let (status, body) = get(test_router(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_metrics_shape() {
    let (status, body) = get(test_router(), "/metrics").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_enrollments"], 800);
    assert_eq!(body["total_demographic_updates"], 100);
    assert_eq!(body["total_biometric_updates"], 0);
    assert_eq!(body["records_count"]["enrollment"], 3);
    assert!(body["total_enrollments_formatted"].is_string());
}

#[tokio::test]
async fn test_trends_default_and_explicit_window() {
    let (status, body) = get(test_router(), "/trends").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["dates"].as_array().unwrap().len(), 3);
    assert_eq!(body["dates"][0], "2025-09-01");

    let (status, body) = get(test_router(), "/trends?days=2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["enrollment"], serde_json::json!([260, 120]));
    assert_eq!(body["demographic"], serde_json::json!([100, 0]));
}

#[tokio::test]
async fn test_invalid_parameters_are_bad_requests() {
    let (status, body) = get(test_router(), "/trends?days=0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid parameter");
    assert!(body["details"].as_str().unwrap().contains("days"));

    let (status, body) = get(test_router(), "/states?top_n=0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_states_endpoints() {
    let (status, body) = get(test_router(), "/states?top_n=1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["top_states"][0]["state"], "Bihar");
    assert_eq!(body["top_states"][0]["enrollments"], 680);
    assert_eq!(body["top_states"][0]["districts"], 2);
    assert_eq!(body["total_states"], 2);

    let (status, body) = get(test_router(), "/states/all").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_enrollments"], 800);
    assert_eq!(body["states"][0]["code"], "IN-BR");
    assert_eq!(body["states"][1]["code"], "IN-GA");
}

#[tokio::test]
async fn test_demographics_anomalies_and_insights() {
    let (status, body) = get(test_router(), "/demographics").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 800);
    assert_eq!(body["age_distribution"].as_array().unwrap().len(), 3);

    let (status, body) = get(test_router(), "/anomalies").await;
    assert_eq!(status, StatusCode::OK);
    let count = body["count"].as_u64().unwrap();
    assert_eq!(body["anomalies"].as_array().unwrap().len() as u64, count);
    assert!(body["last_checked"].is_string());

    let (status, body) = get(test_router(), "/insights").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["insights"].is_array());
    assert!(body["generated_at"].is_string());
}
