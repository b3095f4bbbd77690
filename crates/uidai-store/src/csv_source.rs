//! CSV adapter for the cleaning stage's output files.
//!
//! Each file carries `date,state,district,pincode` followed by its age columns and,
//! optionally, a `total_*` column and the derived `year`, `month`, `day_of_week`
//! columns. Derived columns are ignored; a total column must agree with the
//! bucket sum or the row is rejected.

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};

use uidai_core::error::{Result, UidaiError};
use uidai_core::models::{AgeCounts, CleaningReport, Dataset, DatasetKind, Record};

use crate::ports::DatasetSource;

/// Reads `enrolment_clean.csv`, `demographic_clean.csv` and `biometric_clean.csv`
/// from a directory, plus an optional cleaning report
#[derive(Debug, Clone)]
pub struct CsvDatasetSource {
    data_dir: PathBuf,
    report_path: Option<PathBuf>,
}

impl CsvDatasetSource {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            report_path: None,
        }
    }

    /// Read quality stats from the given `data_cleaning_report.json`
    pub fn with_report(mut self, path: impl Into<PathBuf>) -> Self {
        self.report_path = Some(path.into());
        self
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

impl DatasetSource for CsvDatasetSource {
    fn describe(&self) -> String {
        format!("csv:{}", self.data_dir.display())
    }

    fn load_dataset(&self, kind: DatasetKind) -> Result<Dataset> {
        let path = self.data_dir.join(kind.file_name());
        if !path.is_file() {
            return Err(UidaiError::DatasetNotFound { path });
        }

        let file = File::open(&path)?;
        let records = read_records(kind, file, kind.file_name())?;
        Ok(Dataset::new(kind, records))
    }

    fn load_cleaning_report(&self) -> Result<Option<CleaningReport>> {
        let Some(path) = &self.report_path else {
            return Ok(None);
        };
        if !path.is_file() {
            return Err(UidaiError::DatasetNotFound { path: path.clone() });
        }

        let content = fs::read_to_string(path)?;
        let report: CleaningReport = serde_json::from_str(&content)?;
        Ok(Some(report))
    }
}

/// Parse every row of a cleaned CSV stream into records
pub fn read_records<R: Read>(kind: DatasetKind, reader: R, source_name: &str) -> Result<Vec<Record>> {
    let csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    match kind {
        DatasetKind::Enrollment => collect_rows::<EnrollmentRow, R>(csv_reader, source_name),
        DatasetKind::Demographic => collect_rows::<DemographicRow, R>(csv_reader, source_name),
        DatasetKind::Biometric => collect_rows::<BiometricRow, R>(csv_reader, source_name),
    }
}

fn collect_rows<T: CleanRow, R: Read>(
    mut reader: csv::Reader<R>,
    source_name: &str,
) -> Result<Vec<Record>> {
    let mut records = Vec::new();

    for (index, row) in reader.deserialize::<T>().enumerate() {
        // Line 1 is the header
        let line = index as u64 + 2;
        let invalid = |reason: String| UidaiError::InvalidRecord {
            source_name: source_name.to_string(),
            line,
            reason,
        };

        let row = row.map_err(|e| invalid(e.to_string()))?;
        let record = row.into_record().map_err(|e| invalid(e.to_string()))?;
        records.push(record);
    }

    Ok(records)
}

/// Build a record from the columns shared by every cleaned file
fn build_record(
    date: &str,
    state: &str,
    district: &str,
    pincode: &str,
    counts: AgeCounts,
    declared_total: Option<u64>,
) -> Result<Record> {
    if let Some(total) = declared_total {
        if total != counts.total() {
            return Err(UidaiError::Serialization(format!(
                "declared total {} does not match bucket sum {}",
                total,
                counts.total()
            )));
        }
    }

    let date = parse_date(date)?;
    Record::parse(date, state, district, pincode, counts)
}

trait CleanRow: DeserializeOwned {
    fn into_record(self) -> Result<Record>;
}

#[derive(Debug, Deserialize)]
struct EnrollmentRow {
    date: String,
    state: String,
    district: String,
    pincode: String,
    age_0_5: u64,
    age_5_17: u64,
    age_18_greater: u64,
    #[serde(default)]
    total_enrollments: Option<u64>,
}

impl CleanRow for EnrollmentRow {
    fn into_record(self) -> Result<Record> {
        let counts = AgeCounts::new(self.age_0_5, self.age_5_17, self.age_18_greater);
        build_record(
            &self.date,
            &self.state,
            &self.district,
            &self.pincode,
            counts,
            self.total_enrollments,
        )
    }
}

#[derive(Debug, Deserialize)]
struct DemographicRow {
    date: String,
    state: String,
    district: String,
    pincode: String,
    demo_age_5_17: u64,
    demo_age_17_: u64,
    #[serde(default)]
    total_demographic_updates: Option<u64>,
}

impl CleanRow for DemographicRow {
    fn into_record(self) -> Result<Record> {
        let counts = AgeCounts::updates(self.demo_age_5_17, self.demo_age_17_);
        build_record(
            &self.date,
            &self.state,
            &self.district,
            &self.pincode,
            counts,
            self.total_demographic_updates,
        )
    }
}

#[derive(Debug, Deserialize)]
struct BiometricRow {
    date: String,
    state: String,
    district: String,
    pincode: String,
    bio_age_5_17: u64,
    bio_age_17_: u64,
    #[serde(default)]
    total_biometric_updates: Option<u64>,
}

impl CleanRow for BiometricRow {
    fn into_record(self) -> Result<Record> {
        let counts = AgeCounts::updates(self.bio_age_5_17, self.bio_age_17_);
        build_record(
            &self.date,
            &self.state,
            &self.district,
            &self.pincode,
            counts,
            self.total_biometric_updates,
        )
    }
}

/// Cleaned files use ISO dates; raw exports use day-month-year
fn parse_date(raw: &str) -> Result<NaiveDate> {
    let date_part = raw.split_whitespace().next().unwrap_or(raw);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(date_part, "%d-%m-%Y"))
        .map_err(|e| UidaiError::Serialization(format!("invalid date '{}': {}", raw, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use uidai_core::models::{AgeBucket, IndianState};

    const ENROLLMENT_CSV: &str = "\
date,state,district,pincode,age_0_5,age_5_17,age_18_greater,total_enrollments,year,month,day_of_week
2025-09-01,Bihar,Patna,800001,60,30,10,100,2025,9,Monday
2025-09-02, Goa ,North Goa,403001,5,3,2,10,2025,9,Tuesday
";

    #[test]
    fn test_reads_enrollment_rows() {
        let records =
            read_records(DatasetKind::Enrollment, ENROLLMENT_CSV.as_bytes(), "enrol.csv").unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].state, IndianState::Bihar);
        assert_eq!(records[0].total(), 100);
        assert_eq!(records[0].counts.get(AgeBucket::Age0To5), 60);
        assert_eq!(records[1].state, IndianState::Goa);
        assert_eq!(records[1].pincode.as_str(), "403001");
    }

    #[test]
    fn test_reads_update_rows_without_total_column() {
        let csv = "\
date,state,district,pincode,demo_age_5_17,demo_age_17_
2025-09-01,Kerala,Ernakulam,682001,4,16
";
        let records = read_records(DatasetKind::Demographic, csv.as_bytes(), "demo.csv").unwrap();
        assert_eq!(records[0].total(), 20);
        assert_eq!(records[0].counts.get(AgeBucket::Age0To5), 0);
    }

    #[test]
    fn test_accepts_day_month_year_dates() {
        let csv = "\
date,state,district,pincode,bio_age_5_17,bio_age_17_
02-03-2025,Punjab,Amritsar,143001,1,1
";
        let records = read_records(DatasetKind::Biometric, csv.as_bytes(), "bio.csv").unwrap();
        assert_eq!(records[0].date, NaiveDate::from_ymd_opt(2025, 3, 2).unwrap());
    }

    #[test]
    fn test_rejects_total_mismatch_with_line_number() {
        let csv = "\
date,state,district,pincode,age_0_5,age_5_17,age_18_greater,total_enrollments
2025-09-01,Bihar,Patna,800001,1,1,1,3
2025-09-01,Bihar,Patna,800001,1,1,1,4
";
        let err = read_records(DatasetKind::Enrollment, csv.as_bytes(), "enrol.csv").unwrap_err();
        match err {
            UidaiError::InvalidRecord { line, source_name, .. } => {
                assert_eq!(line, 3);
                assert_eq!(source_name, "enrol.csv");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_rejects_unknown_state_and_bad_pincode() {
        let bad_state = "\
date,state,district,pincode,bio_age_5_17,bio_age_17_
2025-09-01,Narnia,Cair,143001,1,1
";
        assert!(read_records(DatasetKind::Biometric, bad_state.as_bytes(), "bio.csv").is_err());

        let bad_pincode = "\
date,state,district,pincode,bio_age_5_17,bio_age_17_
2025-09-01,Punjab,Amritsar,1430,1,1
";
        assert!(read_records(DatasetKind::Biometric, bad_pincode.as_bytes(), "bio.csv").is_err());
    }

    #[test]
    fn test_rejects_negative_counts() {
        let csv = "\
date,state,district,pincode,demo_age_5_17,demo_age_17_
2025-09-01,Kerala,Ernakulam,682001,-4,16
";
        assert!(read_records(DatasetKind::Demographic, csv.as_bytes(), "demo.csv").is_err());
    }

    #[test]
    fn test_source_reads_directory_and_report() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("enrolment_clean.csv"), ENROLLMENT_CSV).unwrap();
        fs::write(
            dir.path().join("data_cleaning_report.json"),
            r#"{"timestamp": "2025-09-30T10:00:00", "datasets": {
                "enrolment": {"total_rows": 4, "rows_cleaned": 2, "duplicates_removed": 2},
                "demographic": {"total_rows": 0, "rows_cleaned": 0},
                "biometric": {"total_rows": 0, "rows_cleaned": 0}}}"#,
        )
        .unwrap();

        let source = CsvDatasetSource::new(dir.path())
            .with_report(dir.path().join("data_cleaning_report.json"));

        let dataset = source.load_dataset(DatasetKind::Enrollment).unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.total(), 110);

        let report = source.load_cleaning_report().unwrap().unwrap();
        assert_eq!(report.datasets.enrollment.duplicates_removed, 2);
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let source = CsvDatasetSource::new(dir.path());

        let err = source.load_dataset(DatasetKind::Biometric).unwrap_err();
        assert!(matches!(err, UidaiError::DatasetNotFound { .. }));
        assert!(source.load_cleaning_report().unwrap().is_none());
        assert!(source.describe().starts_with("csv:"));
    }
}
