use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;
use uidai_analytics::{
    AgeDistribution, AllStates, AnomalyReport, InsightReport, MetricsSnapshot, TopStates,
    TrendSeries,
};

use crate::dto::{StatesQuery, TrendsQuery};
use crate::error::ApiError;
use crate::state::AppState;

pub async fn get_metrics(State(state): State<Arc<AppState>>) -> Json<MetricsSnapshot> {
    Json(state.engine.metrics())
}

pub async fn get_trends(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TrendsQuery>,
) -> Result<Json<TrendSeries>, ApiError> {
    tracing::info!(days = query.days, "Processing trends request");

    let series = state.engine.trends(query.days)?;
    Ok(Json(series))
}

pub async fn get_top_states(
    State(state): State<Arc<AppState>>,
    Query(query): Query<StatesQuery>,
) -> Result<Json<TopStates>, ApiError> {
    tracing::info!(top_n = query.top_n, "Processing states request");

    let states = state.engine.top_states(query.top_n)?;
    Ok(Json(states))
}

pub async fn get_all_states(State(state): State<Arc<AppState>>) -> Json<AllStates> {
    Json(state.engine.all_states())
}

pub async fn get_demographics(State(state): State<Arc<AppState>>) -> Json<AgeDistribution> {
    Json(state.engine.demographics())
}

pub async fn get_anomalies(State(state): State<Arc<AppState>>) -> Json<AnomalyReport> {
    Json(state.engine.anomalies(Utc::now()))
}

pub async fn get_insights(State(state): State<Arc<AppState>>) -> Json<InsightReport> {
    Json(state.engine.insights(Utc::now()))
}
