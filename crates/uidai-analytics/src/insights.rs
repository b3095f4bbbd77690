use uidai_core::config::InsightThresholds;
use uidai_core::models::AgeBucket;

use crate::format::format_with_commas;
use crate::models::{Insight, MetricsSnapshot};
use crate::snapshot::AggregateSnapshot;

/// A templated statement backed by one computed fact
pub trait InsightRule: Send + Sync {
    fn name(&self) -> &'static str;

    fn evaluate(&self, snapshot: &AggregateSnapshot, metrics: &MetricsSnapshot) -> Option<Insight>;
}

/// Ordered registry of insight rules
pub struct InsightRules {
    rules: Vec<Box<dyn InsightRule>>,
}

impl InsightRules {
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn with_thresholds(thresholds: &InsightThresholds) -> Self {
        Self::empty()
            .push(YoungShareRule {
                threshold: thresholds.young_share_threshold,
            })
            .push(WeekendUpliftRule {
                threshold: thresholds.weekend_uplift_threshold,
            })
            .push(TopStateRule)
            .push(QualityReviewRule {
                threshold: thresholds.quality_review_threshold,
            })
    }

    pub fn push(mut self, rule: impl InsightRule + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|rule| rule.name()).collect()
    }

    pub fn evaluate(&self, snapshot: &AggregateSnapshot, metrics: &MetricsSnapshot) -> Vec<Insight> {
        self.rules
            .iter()
            .filter_map(|rule| rule.evaluate(snapshot, metrics))
            .collect()
    }
}

impl std::fmt::Debug for InsightRules {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InsightRules")
            .field("rules", &self.names())
            .finish()
    }
}

/// Children aged 0-5 make up most enrollments
#[derive(Debug, Clone, Copy)]
pub struct YoungShareRule {
    /// Percentage, 0 to 100
    pub threshold: f64,
}

impl InsightRule for YoungShareRule {
    fn name(&self) -> &'static str {
        "young_share"
    }

    fn evaluate(&self, snapshot: &AggregateSnapshot, _: &MetricsSnapshot) -> Option<Insight> {
        let total = snapshot.age_totals.total();
        if total == 0 {
            return None;
        }

        let share = snapshot.age_totals.get(AgeBucket::Age0To5) as f64 / total as f64 * 100.0;
        if share <= self.threshold {
            return None;
        }

        Some(Insight::new(
            "Young population enrollment drive",
            format!(
                "{:.1}% of enrollments are children aged 0-5, indicating focus on early registration",
                share
            ),
            "Continue emphasis on birth registration linkage programs",
        ))
    }
}

/// Weekend days average noticeably more enrollments than weekdays
#[derive(Debug, Clone, Copy)]
pub struct WeekendUpliftRule {
    /// Fractional uplift, e.g. 0.10 for 10%
    pub threshold: f64,
}

impl InsightRule for WeekendUpliftRule {
    fn name(&self) -> &'static str {
        "weekend_uplift"
    }

    fn evaluate(&self, snapshot: &AggregateSnapshot, _: &MetricsSnapshot) -> Option<Insight> {
        let (weekend, weekday) = snapshot.weekend_weekday_means()?;
        if weekday <= 0.0 || weekend <= weekday * (1.0 + self.threshold) {
            return None;
        }

        Some(Insight::new(
            "Weekend enrollment surge",
            format!(
                "Weekend enrollments are {:.1}% higher than weekdays",
                (weekend / weekday - 1.0) * 100.0
            ),
            "Ensure adequate staffing on Saturdays and Sundays",
        ))
    }
}

/// The highest-ranked state
#[derive(Debug, Clone, Copy)]
pub struct TopStateRule;

impl InsightRule for TopStateRule {
    fn name(&self) -> &'static str {
        "top_state"
    }

    fn evaluate(&self, snapshot: &AggregateSnapshot, _: &MetricsSnapshot) -> Option<Insight> {
        let top = snapshot.states.first()?;
        Some(Insight::new(
            format!("{} leads in enrollments", top.state),
            format!(
                "{} total enrollments - highest among all states",
                format_with_commas(top.total)
            ),
            format!("Study {}'s best practices for replication", top.state),
        ))
    }
}

/// Data quality score under the review target
#[derive(Debug, Clone, Copy)]
pub struct QualityReviewRule {
    pub threshold: f64,
}

impl InsightRule for QualityReviewRule {
    fn name(&self) -> &'static str {
        "quality_review"
    }

    fn evaluate(&self, snapshot: &AggregateSnapshot, metrics: &MetricsSnapshot) -> Option<Insight> {
        // A score of zero with no rows means nothing was measured
        if snapshot.cleaning.pooled().total_rows == 0 || metrics.data_quality_score >= self.threshold {
            return None;
        }

        Some(Insight::new(
            "Data quality review recommended",
            format!(
                "Data quality score is {:.2}, below the {:.1} target",
                metrics.data_quality_score, self.threshold
            ),
            "Review duplicate and invalid-state removals in the cleaning report",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::compute_metrics;
    use crate::snapshot::StateRollup;
    use chrono::NaiveDate;
    use uidai_core::config::QualityWeights;
    use uidai_core::models::{AgeCounts, CleaningStats, IndianState};

    fn metrics(snapshot: &AggregateSnapshot) -> MetricsSnapshot {
        compute_metrics(snapshot, &QualityWeights::default())
    }

    #[test]
    fn test_young_share_fires_above_threshold() {
        let snapshot = AggregateSnapshot {
            age_totals: AgeCounts::new(650, 317, 33),
            ..AggregateSnapshot::default()
        };
        let rule = YoungShareRule { threshold: 60.0 };

        let insight = rule.evaluate(&snapshot, &metrics(&snapshot)).unwrap();
        assert_eq!(insight.title, "Young population enrollment drive");
        assert!(insight.detail.starts_with("65.0% of enrollments"));

        let rule = YoungShareRule { threshold: 70.0 };
        assert!(rule.evaluate(&snapshot, &metrics(&snapshot)).is_none());
    }

    #[test]
    fn test_weekend_uplift() {
        // 2025-09-06 and 2025-09-07 are a weekend; 09-08 and 09-09 weekdays
        let day = |d| NaiveDate::from_ymd_opt(2025, 9, d).unwrap();
        let snapshot = AggregateSnapshot {
            enrollment_daily: [(day(6), 130), (day(7), 110), (day(8), 100), (day(9), 100)]
                .into_iter()
                .collect(),
            ..AggregateSnapshot::default()
        };
        let rule = WeekendUpliftRule { threshold: 0.10 };

        let insight = rule.evaluate(&snapshot, &metrics(&snapshot)).unwrap();
        assert_eq!(insight.detail, "Weekend enrollments are 20.0% higher than weekdays");

        let rule = WeekendUpliftRule { threshold: 0.25 };
        assert!(rule.evaluate(&snapshot, &metrics(&snapshot)).is_none());
    }

    #[test]
    fn test_top_state() {
        let snapshot = AggregateSnapshot {
            states: vec![StateRollup {
                state: IndianState::UttarPradesh,
                total: 1_018_629,
                districts: 75,
                pincodes: 1700,
            }],
            ..AggregateSnapshot::default()
        };

        let insight = TopStateRule.evaluate(&snapshot, &metrics(&snapshot)).unwrap();
        assert_eq!(insight.title, "Uttar Pradesh leads in enrollments");
        assert_eq!(insight.detail, "1,018,629 total enrollments - highest among all states");
        assert_eq!(insight.action, "Study Uttar Pradesh's best practices for replication");

        assert!(TopStateRule
            .evaluate(&AggregateSnapshot::default(), &metrics(&snapshot))
            .is_none());
    }

    #[test]
    fn test_quality_review_only_with_measured_rows() {
        let rule = QualityReviewRule { threshold: 90.0 };

        let empty = AggregateSnapshot::default();
        assert!(rule.evaluate(&empty, &metrics(&empty)).is_none());

        let mut snapshot = AggregateSnapshot::default();
        snapshot.cleaning.demographic = CleaningStats {
            total_rows: 100,
            rows_cleaned: 70,
            duplicates_removed: 30,
            ..CleaningStats::default()
        };
        let insight = rule.evaluate(&snapshot, &metrics(&snapshot)).unwrap();
        assert_eq!(insight.detail, "Data quality score is 82.00, below the 90.0 target");
    }

    #[test]
    fn test_default_registry_order() {
        let rules = InsightRules::with_thresholds(&InsightThresholds::default());
        assert_eq!(
            rules.names(),
            vec!["young_share", "weekend_uplift", "top_state", "quality_review"]
        );
    }
}
