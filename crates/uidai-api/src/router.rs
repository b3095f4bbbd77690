use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Create the API router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))

        // Analytics
        .route("/metrics", get(handlers::get_metrics))
        .route("/trends", get(handlers::get_trends))
        .route("/states", get(handlers::get_top_states))
        .route("/states/all", get(handlers::get_all_states))
        .route("/demographics", get(handlers::get_demographics))
        .route("/anomalies", get(handlers::get_anomalies))
        .route("/insights", get(handlers::get_insights))

        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
