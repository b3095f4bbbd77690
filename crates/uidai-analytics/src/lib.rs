//! UIDAI Analytics - Aggregation and anomaly engine
//!
//! This crate turns the loaded datasets into the figures the dashboard consumes:
//! headline metrics, daily trend series, state rankings, age breakdowns, anomaly
//! flags and templated insights.

pub mod anomalies;
pub mod cache;
pub mod demographics;
pub mod engine;
pub mod format;
pub mod insights;
pub mod metrics;
pub mod models;
pub mod snapshot;
pub mod states;
pub mod trends;

pub use anomalies::{AnomalyRule, AnomalyRules};
pub use engine::AnalyticsEngine;
pub use insights::{InsightRule, InsightRules};
pub use models::{
    AgeDistribution, AgeGroupShare, AllStates, Anomaly, AnomalyReport, Insight, InsightReport,
    MetricsSnapshot, RecordsCount, RegionalState, Severity, StateSummary, TopStates, TrendSeries,
};
pub use snapshot::AggregateSnapshot;
