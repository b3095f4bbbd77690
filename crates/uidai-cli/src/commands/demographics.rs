//! Demographics command implementation

use anyhow::Result;
use tabled::Tabled;
use uidai_analytics::AnalyticsEngine;
use uidai_analytics::format::format_with_commas;

use crate::output::OutputWriter;

#[derive(Tabled)]
struct AgeRow {
    #[tabled(rename = "Age Group")]
    group: String,
    #[tabled(rename = "Enrollments")]
    count: String,
    #[tabled(rename = "Share")]
    share: String,
}

pub fn execute(engine: &AnalyticsEngine, output: &OutputWriter) -> Result<()> {
    let distribution = engine.demographics();

    if output.is_json() {
        return output.result(distribution);
    }

    output.section("Enrollment by Age Group");
    let rows = distribution
        .age_distribution
        .iter()
        .map(|share| AgeRow {
            group: share.group.clone(),
            count: format_with_commas(share.count),
            share: format!("{:.1}%", share.percentage),
        })
        .collect();
    output.table(rows);
    output.kv("Total", format_with_commas(distribution.total));

    Ok(())
}
