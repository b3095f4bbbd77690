use serde::{Deserialize, Serialize};

/// Row accounting for one dataset, as written by the cleaning stage
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleaningStats {
    /// Rows read from the raw files
    pub total_rows: u64,

    /// Rows that survived cleaning
    pub rows_cleaned: u64,

    #[serde(default)]
    pub duplicates_removed: u64,

    #[serde(default)]
    pub invalid_dates: u64,

    #[serde(default)]
    pub invalid_states: u64,

    #[serde(default)]
    pub invalid_pincodes: u64,

    #[serde(default)]
    pub negative_values: u64,

    #[serde(default)]
    pub missing_values: u64,
}

impl CleaningStats {
    /// Stats for a dataset loaded without a report: nothing was removed
    pub fn untouched(rows: u64) -> Self {
        Self {
            total_rows: rows,
            rows_cleaned: rows,
            ..Self::default()
        }
    }

    /// Fraction of raw rows removed as duplicates, 0.0 when there were no rows
    pub fn duplicate_rate(&self) -> f64 {
        ratio(self.duplicates_removed, self.total_rows)
    }

    /// Fraction of raw rows that survived cleaning, 0.0 when there were no rows
    pub fn retention_rate(&self) -> f64 {
        ratio(self.rows_cleaned, self.total_rows)
    }

    /// Element-wise sum
    pub fn combine(&self, other: &CleaningStats) -> CleaningStats {
        CleaningStats {
            total_rows: self.total_rows + other.total_rows,
            rows_cleaned: self.rows_cleaned + other.rows_cleaned,
            duplicates_removed: self.duplicates_removed + other.duplicates_removed,
            invalid_dates: self.invalid_dates + other.invalid_dates,
            invalid_states: self.invalid_states + other.invalid_states,
            invalid_pincodes: self.invalid_pincodes + other.invalid_pincodes,
            negative_values: self.negative_values + other.negative_values,
            missing_values: self.missing_values + other.missing_values,
        }
    }
}

fn ratio(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// Per-dataset stats from `data_cleaning_report.json`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleaningDatasets {
    #[serde(rename = "enrolment", alias = "enrollment")]
    pub enrollment: CleaningStats,
    pub demographic: CleaningStats,
    pub biometric: CleaningStats,
}

/// Report emitted by the cleaning stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleaningReport {
    /// When cleaning ran, as written by the cleaning stage
    #[serde(default)]
    pub timestamp: Option<String>,

    pub datasets: CleaningDatasets,
}
