use serde::Serialize;
use std::collections::BTreeMap;

use uidai_analytics::{Anomaly, MetricsSnapshot, StateSummary};
use uidai_core::config::ConfigSource;

/// Output for the summary command
#[derive(Debug, Serialize)]
pub struct SummaryOutput {
    pub source: String,
    pub metrics: MetricsSnapshot,
    pub period: Option<PeriodOutput>,
    pub top_states: Vec<StateSummary>,
    pub anomalies: Vec<Anomaly>,
}

/// First and last enrollment date
#[derive(Debug, Serialize)]
pub struct PeriodOutput {
    pub start: String,
    pub end: String,
    pub days: i64,
}

/// Output for the config command, keyed by setting name
#[derive(Debug, Serialize)]
pub struct ConfigOutput {
    pub values: BTreeMap<String, ConfigEntry>,
}

#[derive(Debug, Serialize)]
pub struct ConfigEntry {
    pub value: String,
    pub source: ConfigSource,
}
