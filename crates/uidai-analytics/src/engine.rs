use chrono::{DateTime, Utc};
use std::sync::Arc;

use uidai_core::config::AnalyticsConfig;
use uidai_core::error::Result;
use uidai_core::models::DataContext;

use crate::anomalies::AnomalyRules;
use crate::cache::{QueryCache, QueryKey, QueryKind};
use crate::demographics::age_distribution;
use crate::insights::InsightRules;
use crate::metrics::compute_metrics;
use crate::models::{
    AgeDistribution, AllStates, AnomalyReport, InsightReport, MetricsSnapshot, TopStates,
    TrendSeries,
};
use crate::snapshot::AggregateSnapshot;
use crate::states::{all_states, covered_top_n, top_states};
use crate::trends::{covered_window, period_label, trend_series};

/// Aggregation engine over an immutable data context.
///
/// All queries are synchronous reads of a snapshot built at construction. The
/// engine is `Send + Sync` and meant to be shared behind an `Arc`.
#[derive(Debug)]
pub struct AnalyticsEngine {
    context: Arc<DataContext>,
    snapshot: AggregateSnapshot,
    config: AnalyticsConfig,
    anomaly_rules: AnomalyRules,
    insight_rules: InsightRules,
    cache: QueryCache,
}

impl AnalyticsEngine {
    pub fn new(context: Arc<DataContext>, config: AnalyticsConfig) -> Self {
        let snapshot = AggregateSnapshot::from_context(&context);

        tracing::info!(
            enrollment_records = snapshot.records.enrollment,
            demographic_records = snapshot.records.demographic,
            biometric_records = snapshot.records.biometric,
            states = snapshot.states.len(),
            cache_enabled = config.cache_enabled,
            "Analytics engine ready"
        );

        Self {
            anomaly_rules: AnomalyRules::with_thresholds(&config.anomalies),
            insight_rules: InsightRules::with_thresholds(&config.insights),
            cache: QueryCache::new(config.cache_enabled),
            context,
            snapshot,
            config,
        }
    }

    /// Replace the anomaly rule registry
    pub fn with_anomaly_rules(mut self, rules: AnomalyRules) -> Self {
        self.anomaly_rules = rules;
        self
    }

    /// Replace the insight rule registry
    pub fn with_insight_rules(mut self, rules: InsightRules) -> Self {
        self.insight_rules = rules;
        self
    }

    pub fn context(&self) -> &DataContext {
        &self.context
    }

    pub fn snapshot(&self) -> &AggregateSnapshot {
        &self.snapshot
    }

    pub fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.cache.get_or_insert(QueryKey::new(QueryKind::Metrics), || {
            compute_metrics(&self.snapshot, &self.config.quality)
        })
    }

    /// Daily totals over the last `days` days; fails with `InvalidParameter` when `days < 1`.
    ///
    /// Entries are keyed on the covered window, so requests past the data span share one.
    pub fn trends(&self, days: i64) -> Result<TrendSeries> {
        let covered = covered_window(&self.snapshot, days)?;
        tracing::debug!(days, covered, "Computing trend series");

        let key = QueryKey::with_param(QueryKind::Trends, covered);
        let mut series = self
            .cache
            .get_or_try_insert(key, || trend_series(&self.snapshot, covered))?;
        series.period = period_label(series.len(), days);
        Ok(series)
    }

    /// The `top_n` states by enrollments; fails with `InvalidParameter` when `top_n < 1`
    pub fn top_states(&self, top_n: i64) -> Result<TopStates> {
        let covered = covered_top_n(&self.snapshot, top_n)?;
        tracing::debug!(top_n, covered, "Ranking states");

        let key = QueryKey::with_param(QueryKind::TopStates, covered);
        self.cache
            .get_or_try_insert(key, || top_states(&self.snapshot, covered))
    }

    pub fn all_states(&self) -> AllStates {
        self.cache
            .get_or_insert(QueryKey::new(QueryKind::AllStates), || all_states(&self.snapshot))
    }

    pub fn demographics(&self) -> AgeDistribution {
        self.cache.get_or_insert(QueryKey::new(QueryKind::Demographics), || {
            age_distribution(&self.snapshot.age_totals)
        })
    }

    /// Run every anomaly rule; never cached
    pub fn anomalies(&self, last_checked: DateTime<Utc>) -> AnomalyReport {
        let anomalies = self.anomaly_rules.evaluate(&self.snapshot);
        tracing::info!(count = anomalies.len(), "Anomaly check complete");

        AnomalyReport {
            count: anomalies.len(),
            anomalies,
            last_checked,
        }
    }

    /// Run every insight rule; never cached
    pub fn insights(&self, generated_at: DateTime<Utc>) -> InsightReport {
        let metrics = self.metrics();
        let insights = self.insight_rules.evaluate(&self.snapshot, &metrics);
        tracing::info!(count = insights.len(), "Generated insights");

        InsightReport {
            insights,
            generated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};
    use uidai_core::models::{AgeCounts, Dataset, DatasetKind, IndianState, Record};

    fn engine(config: AnalyticsConfig) -> AnalyticsEngine {
        let day = |d| NaiveDate::from_ymd_opt(2025, 9, d).unwrap();
        let record = |d, state, total| {
            Record::new(day(d), state, "District", "110001".parse().unwrap(), AgeCounts::new(total, 0, 0))
        };

        let context = DataContext::new(
            Dataset::new(
                DatasetKind::Enrollment,
                vec![
                    record(1, IndianState::Bihar, 100),
                    record(2, IndianState::Goa, 200),
                    record(3, IndianState::Bihar, 50),
                ],
            ),
            Dataset::new(DatasetKind::Demographic, vec![record(2, IndianState::Goa, 10)]),
            Dataset::new(DatasetKind::Biometric, vec![record(2, IndianState::Goa, 40)]),
        );
        AnalyticsEngine::new(Arc::new(context), config)
    }

    #[test]
    fn test_queries_populate_cache() {
        let engine = engine(AnalyticsConfig::default());

        engine.metrics();
        engine.trends(2).unwrap();
        engine.trends(30).unwrap();
        engine.top_states(1).unwrap();
        engine.all_states();
        engine.demographics();
        assert_eq!(engine.cache().len(), 6);

        // Same parameters reuse the entry
        assert_eq!(engine.trends(2).unwrap(), engine.trends(2).unwrap());
        assert_eq!(engine.cache().len(), 6);
    }

    #[test]
    fn test_oversized_parameters_share_cache_entries() {
        let engine = engine(AnalyticsConfig::default());

        for n in 1..=2000 {
            engine.trends(1000 + n).unwrap();
            engine.top_states(1000 + n).unwrap();
        }
        // One clamped 3-day window and one full two-state ranking
        assert_eq!(engine.cache().len(), 2);

        let series = engine.trends(90).unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series.period, "Last 3 days (requested 90)");
        assert_eq!(engine.trends(3).unwrap().period, "Last 3 days");
        assert_eq!(engine.top_states(5000).unwrap().top_states.len(), 2);
        assert_eq!(engine.cache().len(), 2);
    }

    #[test]
    fn test_invalid_parameters_are_not_cached() {
        let engine = engine(AnalyticsConfig::default());
        assert!(engine.trends(0).is_err());
        assert!(engine.top_states(-1).is_err());
        assert!(engine.cache().is_empty());
    }

    #[test]
    fn test_cache_can_be_disabled() {
        let config = AnalyticsConfig {
            cache_enabled: false,
            ..AnalyticsConfig::default()
        };
        let engine = engine(config);
        engine.metrics();
        engine.demographics();
        assert!(engine.cache().is_empty());
    }

    #[test]
    fn test_reports_carry_caller_timestamps() {
        let engine = engine(AnalyticsConfig::default());
        let at = Utc.with_ymd_and_hms(2025, 10, 1, 12, 0, 0).unwrap();

        let anomalies = engine.anomalies(at);
        assert_eq!(anomalies.last_checked, at);
        assert_eq!(anomalies.count, anomalies.anomalies.len());
        // bio/demo = 4.0 trips the operational rule
        assert!(anomalies.anomalies.iter().any(|a| a.kind == "operational"));

        let insights = engine.insights(at);
        assert_eq!(insights.generated_at, at);
        assert!(insights
            .insights
            .iter()
            .any(|i| i.title == "Goa leads in enrollments"));
    }

    #[test]
    fn test_custom_rule_registries() {
        let engine = engine(AnalyticsConfig::default())
            .with_anomaly_rules(AnomalyRules::empty())
            .with_insight_rules(InsightRules::empty());
        let at = Utc.with_ymd_and_hms(2025, 10, 1, 0, 0, 0).unwrap();

        assert_eq!(engine.anomalies(at).count, 0);
        assert!(engine.insights(at).insights.is_empty());
    }
}
