//! States command implementation

use anyhow::Result;
use tabled::Tabled;
use uidai_analytics::AnalyticsEngine;

use crate::cli::StatesArgs;
use crate::output::OutputWriter;

#[derive(Tabled)]
struct StateRow {
    #[tabled(rename = "#")]
    rank: usize,
    #[tabled(rename = "State")]
    state: String,
    #[tabled(rename = "Code")]
    code: String,
    #[tabled(rename = "Enrollments")]
    enrollments: String,
    #[tabled(rename = "Districts")]
    districts: usize,
    #[tabled(rename = "Pincodes")]
    pincodes: usize,
}

pub fn execute(args: &StatesArgs, engine: &AnalyticsEngine, output: &OutputWriter) -> Result<()> {
    if args.all {
        let all = engine.all_states();
        if output.is_json() {
            return output.result(all);
        }

        output.section(format!("All States ({})", all.total_states));
        let rows = all
            .states
            .iter()
            .enumerate()
            .map(|(i, entry)| StateRow {
                rank: i + 1,
                state: entry.summary.state.to_string(),
                code: entry.code.clone(),
                enrollments: entry.summary.enrollments_formatted.clone(),
                districts: entry.summary.districts,
                pincodes: entry.summary.pincodes,
            })
            .collect();
        output.table(rows);
        return Ok(());
    }

    let top = engine.top_states(args.top)?;
    if output.is_json() {
        return output.result(top);
    }

    output.section(format!(
        "Top {} of {} States",
        top.top_states.len(),
        top.total_states
    ));
    let rows = top
        .top_states
        .iter()
        .enumerate()
        .map(|(i, summary)| StateRow {
            rank: i + 1,
            state: summary.state.to_string(),
            code: summary.state.iso_code().to_string(),
            enrollments: summary.enrollments_formatted.clone(),
            districts: summary.districts,
            pincodes: summary.pincodes,
        })
        .collect();
    output.table(rows);

    Ok(())
}
