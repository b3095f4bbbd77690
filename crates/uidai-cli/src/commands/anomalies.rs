//! Anomalies command implementation

use anyhow::Result;
use chrono::Utc;
use uidai_analytics::{AnalyticsEngine, Anomaly, Severity};

use crate::output::OutputWriter;

pub fn execute(engine: &AnalyticsEngine, output: &OutputWriter) -> Result<()> {
    let report = engine.anomalies(Utc::now());

    if output.is_json() {
        return output.result(report);
    }

    output.section(format!("Anomalies ({})", report.count));
    print_anomalies(&report.anomalies, output);
    output.kv(
        "Checked",
        report.last_checked.format("%Y-%m-%d %H:%M:%S UTC"),
    );

    Ok(())
}

pub(super) fn print_anomalies(anomalies: &[Anomaly], output: &OutputWriter) {
    if anomalies.is_empty() {
        output.info("No anomalies detected");
        return;
    }
    for anomaly in anomalies {
        output.flagged(
            anomaly.severity == Severity::Warning,
            format!("[{}] {}", anomaly.kind, anomaly.message),
            &anomaly.detail,
        );
    }
}
