use axum::{response::IntoResponse, Json};

use crate::dto::{HealthResponse, RootResponse};

pub async fn root() -> impl IntoResponse {
    Json(RootResponse::default())
}

pub async fn health_check() -> impl IntoResponse {
    Json(HealthResponse::default())
}
