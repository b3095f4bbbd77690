use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use super::cleaning::{CleaningReport, CleaningStats};
use super::record::Record;

/// Kind of cleaned dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasetKind {
    Enrollment,
    Demographic,
    Biometric,
}

impl DatasetKind {
    pub const ALL: [DatasetKind; 3] = [Self::Enrollment, Self::Demographic, Self::Biometric];

    /// File name written by the cleaning stage
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Enrollment => "enrolment_clean.csv",
            Self::Demographic => "demographic_clean.csv",
            Self::Biometric => "biometric_clean.csv",
        }
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Enrollment => write!(f, "enrollment"),
            Self::Demographic => write!(f, "demographic"),
            Self::Biometric => write!(f, "biometric"),
        }
    }
}

/// Immutable collection of records of one kind
#[derive(Debug, Clone)]
pub struct Dataset {
    kind: DatasetKind,
    records: Arc<[Record]>,
}

impl Dataset {
    pub fn new(kind: DatasetKind, records: Vec<Record>) -> Self {
        Self {
            kind,
            records: records.into(),
        }
    }

    pub fn empty(kind: DatasetKind) -> Self {
        Self::new(kind, Vec::new())
    }

    pub fn kind(&self) -> DatasetKind {
        self.kind
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sum of record totals
    pub fn total(&self) -> u64 {
        self.records.iter().map(Record::total).sum()
    }

    /// Earliest and latest record dates, if any
    pub fn date_span(&self) -> Option<(NaiveDate, NaiveDate)> {
        let mut dates = self.records.iter().map(|r| r.date);
        let first = dates.next()?;
        Some(dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d))))
    }
}

/// The three datasets plus cleaning stats, loaded once and shared read-only
#[derive(Debug, Clone)]
pub struct DataContext {
    pub enrollment: Dataset,
    pub demographic: Dataset,
    pub biometric: Dataset,
    pub cleaning: Option<CleaningReport>,
}

impl DataContext {
    pub fn new(enrollment: Dataset, demographic: Dataset, biometric: Dataset) -> Self {
        Self {
            enrollment,
            demographic,
            biometric,
            cleaning: None,
        }
    }

    /// Attach the cleaning stage report
    pub fn with_cleaning_report(mut self, report: CleaningReport) -> Self {
        self.cleaning = Some(report);
        self
    }

    /// A context with three empty datasets
    pub fn empty() -> Self {
        Self::new(
            Dataset::empty(DatasetKind::Enrollment),
            Dataset::empty(DatasetKind::Demographic),
            Dataset::empty(DatasetKind::Biometric),
        )
    }

    pub fn dataset(&self, kind: DatasetKind) -> &Dataset {
        match kind {
            DatasetKind::Enrollment => &self.enrollment,
            DatasetKind::Demographic => &self.demographic,
            DatasetKind::Biometric => &self.biometric,
        }
    }

    /// Cleaning stats for a dataset; synthesized from the record count without a report
    pub fn cleaning_stats(&self, kind: DatasetKind) -> CleaningStats {
        match &self.cleaning {
            Some(report) => match kind {
                DatasetKind::Enrollment => report.datasets.enrollment,
                DatasetKind::Demographic => report.datasets.demographic,
                DatasetKind::Biometric => report.datasets.biometric,
            },
            None => CleaningStats::untouched(self.dataset(kind).len() as u64),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AgeCounts, IndianState, Pincode};

    fn record(day: u32, total: u64) -> Record {
        Record::new(
            NaiveDate::from_ymd_opt(2025, 9, day).unwrap(),
            IndianState::Goa,
            "North Goa",
            "403001".parse::<Pincode>().unwrap(),
            AgeCounts::new(total, 0, 0),
        )
    }

    #[test]
    fn test_dataset_totals_and_span() {
        let dataset = Dataset::new(DatasetKind::Enrollment, vec![record(3, 50), record(1, 100)]);
        assert_eq!(dataset.total(), 150);
        let (lo, hi) = dataset.date_span().unwrap();
        assert_eq!(lo.to_string(), "2025-09-01");
        assert_eq!(hi.to_string(), "2025-09-03");
    }

    #[test]
    fn test_empty_dataset_has_no_span() {
        assert!(Dataset::empty(DatasetKind::Biometric).date_span().is_none());
    }

    #[test]
    fn test_cleaning_stats_fall_back_to_record_count() {
        let context = DataContext::new(
            Dataset::new(DatasetKind::Enrollment, vec![record(1, 1), record(2, 2)]),
            Dataset::empty(DatasetKind::Demographic),
            Dataset::empty(DatasetKind::Biometric),
        );
        let stats = context.cleaning_stats(DatasetKind::Enrollment);
        assert_eq!(stats.total_rows, 2);
        assert_eq!(stats.rows_cleaned, 2);
        assert_eq!(context.cleaning_stats(DatasetKind::Biometric).total_rows, 0);
    }
}
