use uidai_core::error::{Result, UidaiError};
use uidai_core::models::{CleaningReport, DataContext, Dataset, DatasetKind};

/// Port for reading cleaned datasets into memory
pub trait DatasetSource: Send + Sync {
    /// Human-readable description of where the data comes from
    fn describe(&self) -> String;

    /// Load every record of one dataset kind
    fn load_dataset(&self, kind: DatasetKind) -> Result<Dataset>;

    /// Load the cleaning stage report, if this source has one
    fn load_cleaning_report(&self) -> Result<Option<CleaningReport>>;
}

/// Load all three datasets and the cleaning report into a data context.
///
/// Any failure is reported as [`UidaiError::DataUnavailable`]; callers are expected
/// to refuse to serve rather than continue with partial data.
pub fn load_context(source: &dyn DatasetSource) -> Result<DataContext> {
    tracing::info!(source = %source.describe(), "Loading datasets");

    let enrollment = load_kind(source, DatasetKind::Enrollment)?;
    let demographic = load_kind(source, DatasetKind::Demographic)?;
    let biometric = load_kind(source, DatasetKind::Biometric)?;

    let report = source.load_cleaning_report().map_err(|e| UidaiError::DataUnavailable {
        reason: format!("cleaning report: {}", e),
    })?;

    let context = DataContext::new(enrollment, demographic, biometric);
    match report {
        Some(report) => Ok(context.with_cleaning_report(report)),
        None => {
            tracing::warn!("No cleaning report available; quality metrics assume no rows were removed");
            Ok(context)
        }
    }
}

fn load_kind(source: &dyn DatasetSource, kind: DatasetKind) -> Result<Dataset> {
    let dataset = source.load_dataset(kind).map_err(|e| {
        tracing::error!(kind = %kind, error = %e, "Failed to load dataset");
        UidaiError::DataUnavailable {
            reason: format!("{} dataset: {}", kind, e),
        }
    })?;

    if dataset.kind() != kind {
        return Err(UidaiError::DataUnavailable {
            reason: format!("source returned a {} dataset when {} was requested", dataset.kind(), kind),
        });
    }

    tracing::info!(kind = %kind, records = dataset.len(), "Loaded dataset");
    Ok(dataset)
}
