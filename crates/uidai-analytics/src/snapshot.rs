//! Precomputed aggregates shared by every query.
//!
//! The snapshot is built in one pass per dataset when the engine starts. Queries,
//! anomaly rules and insight rules read from it and never touch raw records.

use chrono::{Datelike, NaiveDate, Weekday};
use std::collections::{BTreeMap, HashMap, HashSet};

use uidai_core::models::{
    AgeCounts, CleaningStats, DataContext, Dataset, DatasetKind, IndianState, Pincode,
};

use crate::models::RecordsCount;

/// Enrollment rollup for one state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateRollup {
    pub state: IndianState,
    pub total: u64,
    pub districts: usize,
    pub pincodes: usize,
}

/// Sum of record totals per dataset kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KindTotals {
    pub enrollment: u64,
    pub demographic: u64,
    pub biometric: u64,
}

/// Cleaning stats per dataset kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleaningSet {
    pub enrollment: CleaningStats,
    pub demographic: CleaningStats,
    pub biometric: CleaningStats,
}

impl CleaningSet {
    /// Stats of all three kinds added together
    pub fn pooled(&self) -> CleaningStats {
        self.enrollment.combine(&self.demographic).combine(&self.biometric)
    }
}

/// Update totals (demographic plus biometric) per state in 7-day weeks.
///
/// Weeks end at `anchor`, the latest update date. Index 0 is the week ending at the
/// anchor, index 1 the week before it, and so on. Only weeks fully covered by the
/// update data are kept, so every state vector has `complete_weeks` entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeeklyUpdates {
    pub anchor: Option<NaiveDate>,
    pub complete_weeks: usize,
    pub by_state: BTreeMap<IndianState, Vec<u64>>,
}

impl WeeklyUpdates {
    fn build(demographic: &Dataset, biometric: &Dataset) -> Self {
        let records = || demographic.records().iter().chain(biometric.records());

        let span = records().fold(None, |span: Option<(NaiveDate, NaiveDate)>, r| match span {
            None => Some((r.date, r.date)),
            Some((lo, hi)) => Some((lo.min(r.date), hi.max(r.date))),
        });
        let Some((earliest, anchor)) = span else {
            return Self::default();
        };

        let span_days = (anchor - earliest).num_days() + 1;
        let complete_weeks = (span_days / 7) as usize;
        let mut by_state: BTreeMap<IndianState, Vec<u64>> = BTreeMap::new();

        if complete_weeks > 0 {
            for record in records() {
                let week = ((anchor - record.date).num_days() / 7) as usize;
                if week >= complete_weeks {
                    continue;
                }
                by_state
                    .entry(record.state)
                    .or_insert_with(|| vec![0; complete_weeks])[week] += record.total();
            }
        }

        Self {
            anchor: Some(anchor),
            complete_weeks,
            by_state,
        }
    }
}

/// Aggregates derived once from a [`DataContext`]
#[derive(Debug, Clone, Default)]
pub struct AggregateSnapshot {
    pub totals: KindTotals,
    pub records: RecordsCount,

    pub enrollment_daily: BTreeMap<NaiveDate, u64>,
    pub demographic_daily: BTreeMap<NaiveDate, u64>,
    pub biometric_daily: BTreeMap<NaiveDate, u64>,

    /// States ranked by enrollments descending, ties by name ascending
    pub states: Vec<StateRollup>,

    /// Enrollment counts per age bucket
    pub age_totals: AgeCounts,

    /// Enrollment totals per weekday present in the data, Monday first
    pub weekday_totals: Vec<(Weekday, u64)>,

    /// Enrollment totals per calendar month number present in the data
    pub month_totals: BTreeMap<u32, u64>,

    pub cleaning: CleaningSet,
    pub weekly_updates: WeeklyUpdates,
}

impl AggregateSnapshot {
    pub fn from_context(context: &DataContext) -> Self {
        let enrollment = &context.enrollment;

        let mut age_totals = AgeCounts::default();
        let mut weekday_totals = [0u64; 7];
        let mut weekday_seen = [false; 7];
        let mut month_totals = BTreeMap::new();

        for record in enrollment.records() {
            age_totals += record.counts;

            let weekday = record.date.weekday().num_days_from_monday() as usize;
            weekday_totals[weekday] += record.total();
            weekday_seen[weekday] = true;

            *month_totals.entry(record.date.month()).or_insert(0) += record.total();
        }

        let weekday_totals = WEEK
            .iter()
            .zip(weekday_totals)
            .zip(weekday_seen)
            .filter(|(_, seen)| *seen)
            .map(|((day, total), _)| (*day, total))
            .collect();

        let snapshot = Self {
            totals: KindTotals {
                enrollment: enrollment.total(),
                demographic: context.demographic.total(),
                biometric: context.biometric.total(),
            },
            records: RecordsCount {
                enrollment: enrollment.len(),
                demographic: context.demographic.len(),
                biometric: context.biometric.len(),
            },
            enrollment_daily: daily_totals(enrollment),
            demographic_daily: daily_totals(&context.demographic),
            biometric_daily: daily_totals(&context.biometric),
            states: rank_states(enrollment),
            age_totals,
            weekday_totals,
            month_totals,
            cleaning: CleaningSet {
                enrollment: context.cleaning_stats(DatasetKind::Enrollment),
                demographic: context.cleaning_stats(DatasetKind::Demographic),
                biometric: context.cleaning_stats(DatasetKind::Biometric),
            },
            weekly_updates: WeeklyUpdates::build(&context.demographic, &context.biometric),
        };

        tracing::debug!(
            states = snapshot.states.len(),
            enrollment_days = snapshot.enrollment_daily.len(),
            complete_weeks = snapshot.weekly_updates.complete_weeks,
            "Built aggregate snapshot"
        );

        snapshot
    }

    /// Earliest and latest enrollment dates
    pub fn enrollment_span(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.enrollment_daily.keys().next()?;
        let last = self.enrollment_daily.keys().next_back()?;
        Some((*first, *last))
    }

    /// Mean daily enrollment total on weekend and on weekday dates.
    ///
    /// Only dates that have enrollment records count. `None` when either side has no dates.
    pub fn weekend_weekday_means(&self) -> Option<(f64, f64)> {
        let (mut weekend_sum, mut weekend_days) = (0u64, 0u64);
        let (mut weekday_sum, mut weekday_days) = (0u64, 0u64);

        for (date, total) in &self.enrollment_daily {
            if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
                weekend_sum += total;
                weekend_days += 1;
            } else {
                weekday_sum += total;
                weekday_days += 1;
            }
        }

        if weekend_days == 0 || weekday_days == 0 {
            return None;
        }

        Some((
            weekend_sum as f64 / weekend_days as f64,
            weekday_sum as f64 / weekday_days as f64,
        ))
    }
}

const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

fn daily_totals(dataset: &Dataset) -> BTreeMap<NaiveDate, u64> {
    let mut daily = BTreeMap::new();
    for record in dataset.records() {
        *daily.entry(record.date).or_insert(0) += record.total();
    }
    daily
}

#[derive(Default)]
struct StateAccumulator<'a> {
    total: u64,
    districts: HashSet<&'a str>,
    pincodes: HashSet<&'a Pincode>,
}

fn rank_states(enrollment: &Dataset) -> Vec<StateRollup> {
    let mut groups: HashMap<IndianState, StateAccumulator<'_>> = HashMap::new();

    for record in enrollment.records() {
        let group = groups.entry(record.state).or_default();
        group.total += record.total();
        group.districts.insert(record.district.as_str());
        group.pincodes.insert(&record.pincode);
    }

    let mut states: Vec<StateRollup> = groups
        .into_iter()
        .map(|(state, group)| StateRollup {
            state,
            total: group.total,
            districts: group.districts.len(),
            pincodes: group.pincodes.len(),
        })
        .collect();

    states.sort_by(|a, b| {
        b.total
            .cmp(&a.total)
            .then_with(|| a.state.name().cmp(b.state.name()))
    });
    states
}
