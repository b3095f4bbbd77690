//! Summary command implementation
//!
//! One screen combining the headline metrics, the top five states and the
//! current anomaly flags.

use anyhow::Result;
use chrono::Utc;
use uidai_analytics::AnalyticsEngine;

use crate::output::OutputWriter;
use crate::output_types::{PeriodOutput, SummaryOutput};

use super::anomalies::print_anomalies;
use super::metrics::print_metrics;

const SUMMARY_TOP_STATES: i64 = 5;

pub fn execute(engine: &AnalyticsEngine, source: &str, output: &OutputWriter) -> Result<()> {
    let metrics = engine.metrics();
    let top = engine.top_states(SUMMARY_TOP_STATES)?;
    let anomalies = engine.anomalies(Utc::now());
    let period = engine
        .snapshot()
        .enrollment_span()
        .map(|(start, end)| PeriodOutput {
            start: start.format("%Y-%m-%d").to_string(),
            end: end.format("%Y-%m-%d").to_string(),
            days: (end - start).num_days() + 1,
        });

    if output.is_json() {
        return output.result(SummaryOutput {
            source: source.to_string(),
            metrics,
            period,
            top_states: top.top_states,
            anomalies: anomalies.anomalies,
        });
    }

    output.section("UIDAI Summary");
    output.kv("Source", source);
    match &period {
        Some(p) => output.kv("Period", format!("{} to {} ({} days)", p.start, p.end, p.days)),
        None => output.kv("Period", "no enrollment data"),
    }
    print_metrics(&metrics, output);

    output.section("Top States");
    for (i, state) in top.top_states.iter().enumerate() {
        output.kv(
            format!("{}. {}", i + 1, state.state),
            &state.enrollments_formatted,
        );
    }
    if top.top_states.is_empty() {
        output.info("No state data");
    }

    output.section(format!("Anomalies ({})", anomalies.count));
    print_anomalies(&anomalies.anomalies, output);

    Ok(())
}
