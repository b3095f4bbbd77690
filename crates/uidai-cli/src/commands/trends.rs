//! Trends command implementation

use anyhow::Result;
use tabled::Tabled;
use uidai_analytics::AnalyticsEngine;
use uidai_analytics::format::format_with_commas;

use crate::cli::TrendsArgs;
use crate::output::OutputWriter;

#[derive(Tabled)]
struct TrendRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Enrollments")]
    enrollment: String,
    #[tabled(rename = "Demographic")]
    demographic: String,
    #[tabled(rename = "Biometric")]
    biometric: String,
}

pub fn execute(args: &TrendsArgs, engine: &AnalyticsEngine, output: &OutputWriter) -> Result<()> {
    let series = engine.trends(args.days)?;

    if output.is_json() {
        return output.result(series);
    }

    output.section(&series.period);
    if series.len() < args.days as usize && !series.is_empty() {
        output.info(format!(
            "Only {} days of enrollment data are available",
            series.len()
        ));
    }

    let rows: Vec<TrendRow> = series
        .dates
        .iter()
        .enumerate()
        .map(|(i, date)| TrendRow {
            date: date.format("%Y-%m-%d").to_string(),
            enrollment: format_with_commas(series.enrollment[i]),
            demographic: format_with_commas(series.demographic[i]),
            biometric: format_with_commas(series.biometric[i]),
        })
        .collect();
    output.table(rows);

    Ok(())
}
