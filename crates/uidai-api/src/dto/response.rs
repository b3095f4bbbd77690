use serde::Serialize;

/// Service banner for `GET /`
#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub version: &'static str,
    pub endpoints: Vec<&'static str>,
}

impl Default for RootResponse {
    fn default() -> Self {
        Self {
            status: "running",
            message: "UIDAI Data API",
            version: env!("CARGO_PKG_VERSION"),
            endpoints: vec![
                "/metrics",
                "/trends",
                "/states",
                "/states/all",
                "/demographics",
                "/anomalies",
                "/insights",
            ],
        }
    }
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self { status: "ok", service: "uidai-api" }
    }
}
