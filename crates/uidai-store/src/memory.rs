//! In-memory dataset source for development and testing.

use std::collections::HashMap;

use uidai_core::error::Result;
use uidai_core::models::{CleaningReport, Dataset, DatasetKind, Record};

use crate::ports::DatasetSource;

/// Dataset source backed by records held in memory.
///
/// Kinds that were never supplied load as empty datasets.
#[derive(Debug, Clone, Default)]
pub struct MemoryDatasetSource {
    datasets: HashMap<DatasetKind, Dataset>,
    report: Option<CleaningReport>,
}

impl MemoryDatasetSource {
    /// Create an empty in-memory source
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the records for one dataset kind
    pub fn with_records(mut self, kind: DatasetKind, records: Vec<Record>) -> Self {
        self.datasets.insert(kind, Dataset::new(kind, records));
        self
    }

    pub fn with_report(mut self, report: CleaningReport) -> Self {
        self.report = Some(report);
        self
    }
}

impl DatasetSource for MemoryDatasetSource {
    fn describe(&self) -> String {
        let records: usize = self.datasets.values().map(Dataset::len).sum();
        format!("memory ({} records)", records)
    }

    fn load_dataset(&self, kind: DatasetKind) -> Result<Dataset> {
        Ok(self
            .datasets
            .get(&kind)
            .cloned()
            .unwrap_or_else(|| Dataset::empty(kind)))
    }

    fn load_cleaning_report(&self) -> Result<Option<CleaningReport>> {
        Ok(self.report.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::load_context;
    use chrono::NaiveDate;
    use uidai_core::error::UidaiError;
    use uidai_core::models::{AgeCounts, IndianState, Pincode};

    fn record(state: IndianState, total: u64) -> Record {
        Record::new(
            NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
            state,
            "District",
            "110001".parse::<Pincode>().unwrap(),
            AgeCounts::new(total, 0, 0),
        )
    }

    #[test]
    fn test_missing_kinds_load_empty() {
        let source = MemoryDatasetSource::new()
            .with_records(DatasetKind::Enrollment, vec![record(IndianState::Delhi, 7)]);

        let context = load_context(&source).unwrap();
        assert_eq!(context.enrollment.total(), 7);
        assert!(context.demographic.is_empty());
        assert!(context.biometric.is_empty());
        assert!(context.cleaning.is_none());
        assert_eq!(source.describe(), "memory (1 records)");
    }

    struct FailingSource;

    impl DatasetSource for FailingSource {
        fn describe(&self) -> String {
            "failing".to_string()
        }

        fn load_dataset(&self, kind: DatasetKind) -> Result<Dataset> {
            match kind {
                DatasetKind::Biometric => Err(UidaiError::DatasetNotFound {
                    path: "biometric_clean.csv".into(),
                }),
                other => Ok(Dataset::empty(other)),
            }
        }

        fn load_cleaning_report(&self) -> Result<Option<CleaningReport>> {
            Ok(None)
        }
    }

    #[test]
    fn test_any_failed_dataset_makes_data_unavailable() {
        let err = load_context(&FailingSource).unwrap_err();
        match err {
            UidaiError::DataUnavailable { reason } => assert!(reason.starts_with("biometric")),
            other => panic!("unexpected error: {other}"),
        }
    }
}
