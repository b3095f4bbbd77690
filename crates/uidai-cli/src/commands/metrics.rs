//! Metrics command implementation

use anyhow::Result;
use uidai_analytics::{AnalyticsEngine, MetricsSnapshot};

use crate::output::OutputWriter;

pub fn execute(engine: &AnalyticsEngine, output: &OutputWriter) -> Result<()> {
    let metrics = engine.metrics();

    if output.is_json() {
        return output.result(metrics);
    }

    output.section("Headline Metrics");
    print_metrics(&metrics, output);
    Ok(())
}

pub(super) fn print_metrics(metrics: &MetricsSnapshot, output: &OutputWriter) {
    output.kv("Enrollments", &metrics.total_enrollments_formatted);
    output.kv("Demographic Updates", &metrics.total_demographic_updates_formatted);
    output.kv("Biometric Updates", &metrics.total_biometric_updates_formatted);
    output.kv(
        "Biometric Success Rate",
        format!("{:.1}%", metrics.biometric_success_rate),
    );
    output.kv("Data Quality Score", format!("{:.2}", metrics.data_quality_score));
    output.kv(
        "Records",
        format!(
            "{} enrollment, {} demographic, {} biometric",
            metrics.records_count.enrollment,
            metrics.records_count.demographic,
            metrics.records_count.biometric
        ),
    );
}
