use std::sync::Arc;

use uidai_analytics::AnalyticsEngine;

/// Shared handler state
#[derive(Debug, Clone)]
pub struct AppState {
    pub engine: Arc<AnalyticsEngine>,
}

impl AppState {
    pub fn new(engine: Arc<AnalyticsEngine>) -> Self {
        Self { engine }
    }
}
