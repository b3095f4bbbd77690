use uidai_core::config::QualityWeights;
use uidai_core::models::CleaningStats;

use crate::format::{format_millions, round_to};
use crate::models::MetricsSnapshot;
use crate::snapshot::AggregateSnapshot;

/// Compute the headline metrics from a snapshot
pub fn compute_metrics(snapshot: &AggregateSnapshot, weights: &QualityWeights) -> MetricsSnapshot {
    let totals = snapshot.totals;

    MetricsSnapshot {
        total_enrollments: totals.enrollment,
        total_enrollments_formatted: format_millions(totals.enrollment),
        total_demographic_updates: totals.demographic,
        total_demographic_updates_formatted: format_millions(totals.demographic),
        total_biometric_updates: totals.biometric,
        total_biometric_updates_formatted: format_millions(totals.biometric),
        biometric_success_rate: biometric_success_rate(&snapshot.cleaning.biometric),
        data_quality_score: data_quality_score(&snapshot.cleaning.pooled(), weights),
        records_count: snapshot.records,
    }
}

/// Percentage of biometric rows that survived cleaning, one decimal
pub fn biometric_success_rate(stats: &CleaningStats) -> f64 {
    round_to(stats.retention_rate() * 100.0, 1)
}

/// Weighted score over duplicate and invalid-state removal rates, two decimals.
///
/// `0.0` when the cleaning stage saw no rows.
pub fn data_quality_score(stats: &CleaningStats, weights: &QualityWeights) -> f64 {
    if stats.total_rows == 0 {
        return 0.0;
    }

    let rows = stats.total_rows as f64;
    let duplicate_rate = stats.duplicates_removed as f64 / rows;
    let invalid_state_rate = stats.invalid_states as f64 / rows;

    let score = weights.duplicate * (1.0 - duplicate_rate)
        + weights.invalid_state * (1.0 - invalid_state_rate);

    round_to((score * 100.0).clamp(0.0, 100.0), 2)
}
