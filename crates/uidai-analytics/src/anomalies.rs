//! Anomaly rules over the aggregate snapshot.
//!
//! Each rule is an independent pure check returning at most one [`Anomaly`]. The
//! registry runs them in insertion order; new rules are added with
//! [`AnomalyRules::push`] without touching existing ones.

use chrono::Weekday;
use std::cmp::Ordering;

use uidai_core::config::AnomalyThresholds;
use uidai_core::models::IndianState;

use crate::format::format_with_commas;
use crate::models::{Anomaly, Severity};
use crate::snapshot::AggregateSnapshot;

/// A single anomaly check
pub trait AnomalyRule: Send + Sync {
    /// Stable identifier used in logs
    fn name(&self) -> &'static str;

    /// Inspect the snapshot and report at most one anomaly
    fn evaluate(&self, snapshot: &AggregateSnapshot) -> Option<Anomaly>;
}

/// Ordered registry of anomaly rules
pub struct AnomalyRules {
    rules: Vec<Box<dyn AnomalyRule>>,
}

impl AnomalyRules {
    /// A registry with no rules
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// The default rule set, in reporting order
    pub fn with_thresholds(thresholds: &AnomalyThresholds) -> Self {
        Self::empty()
            .push(PeakWeekdayRule)
            .push(PeakMonthRule)
            .push(UpdateRatioRule {
                threshold: thresholds.update_ratio_threshold,
            })
            .push(DuplicateRateRule {
                threshold: thresholds.duplicate_rate_warn_threshold,
            })
            .push(RegionalSpikeRule {
                multiple: thresholds.spike_multiple_threshold,
                trailing_weeks: thresholds.trailing_weeks,
            })
    }

    pub fn push(mut self, rule: impl AnomalyRule + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|rule| rule.name()).collect()
    }

    /// Run every rule in order and collect what fired
    pub fn evaluate(&self, snapshot: &AggregateSnapshot) -> Vec<Anomaly> {
        self.rules
            .iter()
            .filter_map(|rule| {
                let anomaly = rule.evaluate(snapshot);
                if let Some(found) = &anomaly {
                    tracing::debug!(rule = rule.name(), severity = %found.severity, "Anomaly rule fired");
                }
                anomaly
            })
            .collect()
    }
}

impl std::fmt::Debug for AnomalyRules {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnomalyRules")
            .field("rules", &self.names())
            .finish()
    }
}

/// Names the weekday with the most enrollments, against the quietest one
#[derive(Debug, Clone, Copy)]
pub struct PeakWeekdayRule;

impl AnomalyRule for PeakWeekdayRule {
    fn name(&self) -> &'static str {
        "temporal"
    }

    fn evaluate(&self, snapshot: &AggregateSnapshot) -> Option<Anomaly> {
        let days = &snapshot.weekday_totals;
        // Earliest weekday wins ties in both directions
        let (peak_day, peak) = days.iter().fold(*days.first()?, |best, &day| {
            if day.1 > best.1 {
                day
            } else {
                best
            }
        });
        let (low_day, low) = days.iter().fold(days[0], |best, &day| {
            if day.1 < best.1 {
                day
            } else {
                best
            }
        });

        Some(Anomaly::new(
            "temporal",
            Severity::Info,
            format!("{} shows highest enrollment activity", weekday_name(peak_day)),
            format!(
                "{} enrollments vs {} on {}",
                format_with_commas(peak),
                format_with_commas(low),
                weekday_name(low_day)
            ),
        ))
    }
}

/// Names the calendar month with the most enrollments
#[derive(Debug, Clone, Copy)]
pub struct PeakMonthRule;

impl AnomalyRule for PeakMonthRule {
    fn name(&self) -> &'static str {
        "seasonal"
    }

    fn evaluate(&self, snapshot: &AggregateSnapshot) -> Option<Anomaly> {
        let mut months = snapshot.month_totals.iter();
        let first = months.next()?;
        let (month, total) = months.fold(first, |best, entry| if entry.1 > best.1 { entry } else { best });

        Some(Anomaly::new(
            "seasonal",
            Severity::Info,
            format!("{} shows peak enrollment", month_abbrev(*month)),
            format!("{} total enrollments", format_with_commas(*total)),
        ))
    }
}

/// Biometric updates outpacing demographic updates
#[derive(Debug, Clone, Copy)]
pub struct UpdateRatioRule {
    pub threshold: f64,
}

impl AnomalyRule for UpdateRatioRule {
    fn name(&self) -> &'static str {
        "operational"
    }

    fn evaluate(&self, snapshot: &AggregateSnapshot) -> Option<Anomaly> {
        let demographic = snapshot.totals.demographic;
        if demographic == 0 {
            return None;
        }

        let ratio = snapshot.totals.biometric as f64 / demographic as f64;
        if ratio <= self.threshold {
            return None;
        }

        Some(Anomaly::new(
            "operational",
            Severity::Warning,
            "Biometric updates significantly higher than demographic",
            format!(
                "Ratio: {:.2}x - May indicate frequent biometric re-authentication",
                ratio
            ),
        ))
    }
}

/// Too many demographic rows removed as duplicates during cleaning
#[derive(Debug, Clone, Copy)]
pub struct DuplicateRateRule {
    pub threshold: f64,
}

impl AnomalyRule for DuplicateRateRule {
    fn name(&self) -> &'static str {
        "data_quality"
    }

    fn evaluate(&self, snapshot: &AggregateSnapshot) -> Option<Anomaly> {
        let stats = &snapshot.cleaning.demographic;
        let rate = stats.duplicate_rate();
        if rate <= self.threshold {
            return None;
        }

        Some(Anomaly::new(
            "data_quality",
            Severity::Warning,
            "High duplicate rate in demographic data",
            format!(
                "{:.1}% of demographic rows were removed as duplicates ({} of {})",
                rate * 100.0,
                format_with_commas(stats.duplicates_removed),
                format_with_commas(stats.total_rows)
            ),
        ))
    }
}

/// A state's latest week of updates far above its trailing weekly average.
///
/// Only the state with the largest multiple is reported. States with no updates in
/// the trailing weeks have no baseline and are skipped.
#[derive(Debug, Clone, Copy)]
pub struct RegionalSpikeRule {
    pub multiple: f64,
    pub trailing_weeks: usize,
}

impl AnomalyRule for RegionalSpikeRule {
    fn name(&self) -> &'static str {
        "regional_spike"
    }

    fn evaluate(&self, snapshot: &AggregateSnapshot) -> Option<Anomaly> {
        let weekly = &snapshot.weekly_updates;
        let anchor = weekly.anchor?;
        if self.trailing_weeks == 0 || weekly.complete_weeks <= self.trailing_weeks {
            return None;
        }

        let mut worst: Option<(IndianState, u64, f64, f64)> = None;
        for (state, weeks) in &weekly.by_state {
            let latest = weeks[0];
            let trailing: u64 = weeks[1..=self.trailing_weeks].iter().sum();
            let baseline = trailing as f64 / self.trailing_weeks as f64;
            if baseline <= 0.0 {
                continue;
            }

            let multiple = latest as f64 / baseline;
            if multiple <= self.multiple {
                continue;
            }

            let replace = match &worst {
                None => true,
                Some((best_state, _, _, best_multiple)) => {
                    match multiple.partial_cmp(best_multiple) {
                        Some(Ordering::Greater) => true,
                        Some(Ordering::Equal) => state.name() < best_state.name(),
                        _ => false,
                    }
                }
            };
            if replace {
                worst = Some((*state, latest, baseline, multiple));
            }
        }

        let (state, latest, baseline, multiple) = worst?;
        Some(Anomaly::new(
            "regional_spike",
            Severity::Warning,
            format!("{} shows a spike in update volume", state),
            format!(
                "{} updates in the week ending {} vs a {}-week average of {:.1} ({:.2}x)",
                format_with_commas(latest),
                anchor,
                self.trailing_weeks,
                baseline,
                multiple
            ),
        ))
    }
}

fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

fn month_abbrev(month: u32) -> &'static str {
    const MONTHS: [&str; 12] = [
        "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ];
    month
        .checked_sub(1)
        .and_then(|index| MONTHS.get(index as usize))
        .copied()
        .unwrap_or("Unknown")
}
