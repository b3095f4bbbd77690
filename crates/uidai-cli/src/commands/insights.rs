//! Insights command implementation

use anyhow::Result;
use chrono::Utc;
use console::style;
use uidai_analytics::AnalyticsEngine;

use crate::output::OutputWriter;

pub fn execute(engine: &AnalyticsEngine, output: &OutputWriter) -> Result<()> {
    let report = engine.insights(Utc::now());

    if output.is_json() {
        return output.result(report);
    }

    output.section("Insights");
    if report.insights.is_empty() {
        output.info("No insights for the current data");
        return Ok(());
    }

    for (i, insight) in report.insights.iter().enumerate() {
        println!("{}. {}", i + 1, style(&insight.title).bold());
        println!("   {}", insight.detail);
        println!("   {} {}", style("→").green(), insight.action);
    }

    Ok(())
}
