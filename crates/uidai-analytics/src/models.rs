use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uidai_core::models::IndianState;

/// Record counts per dataset kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordsCount {
    pub enrollment: usize,
    pub demographic: usize,
    pub biometric: usize,
}

/// Headline figures for the dashboard overview
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub total_enrollments: u64,
    pub total_enrollments_formatted: String,
    pub total_demographic_updates: u64,
    pub total_demographic_updates_formatted: String,
    pub total_biometric_updates: u64,
    pub total_biometric_updates_formatted: String,

    /// Share of biometric rows kept by the cleaning stage, in percent.
    /// The source data carries no failure flag, so this stands in for a success rate.
    pub biometric_success_rate: f64,

    /// Weighted cleaning quality, 0 to 100
    pub data_quality_score: f64,

    pub records_count: RecordsCount,
}

/// Daily totals per kind over a date window
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendSeries {
    pub dates: Vec<NaiveDate>,
    pub enrollment: Vec<u64>,
    pub demographic: Vec<u64>,
    pub biometric: Vec<u64>,
    pub period: String,
}

impl TrendSeries {
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

/// Enrollment rollup for one state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSummary {
    pub state: IndianState,
    pub enrollments: u64,
    pub enrollments_formatted: String,
    pub districts: usize,
    pub pincodes: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopStates {
    pub top_states: Vec<StateSummary>,
    pub total_states: usize,
}

/// State summary annotated with its map region code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionalState {
    #[serde(flatten)]
    pub summary: StateSummary,

    /// ISO 3166-2:IN subdivision code
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllStates {
    pub states: Vec<RegionalState>,
    pub total_states: usize,
    pub total_enrollments: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgeGroupShare {
    pub group: String,
    pub count: u64,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgeDistribution {
    pub age_distribution: Vec<AgeGroupShare>,
    pub total: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
        }
    }
}

/// A rule-triggered flag over the aggregates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Anomaly {
    /// Rule category, e.g. `temporal` or `regional_spike`
    #[serde(rename = "type")]
    pub kind: String,
    pub severity: Severity,
    pub message: String,
    pub detail: String,
}

impl Anomaly {
    pub fn new(
        kind: impl Into<String>,
        severity: Severity,
        message: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            kind: kind.into(),
            severity,
            message: message.into(),
            detail: detail.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnomalyReport {
    pub anomalies: Vec<Anomaly>,
    pub count: usize,
    pub last_checked: DateTime<Utc>,
}

/// A templated narrative statement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insight {
    pub title: String,
    pub detail: String,
    pub action: String,
}

impl Insight {
    pub fn new(
        title: impl Into<String>,
        detail: impl Into<String>,
        action: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            detail: detail.into(),
            action: action.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsightReport {
    pub insights: Vec<Insight>,
    pub generated_at: DateTime<Utc>,
}
