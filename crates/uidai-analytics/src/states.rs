use uidai_core::error::{Result, UidaiError};

use crate::format::format_thousands;
use crate::models::{AllStates, RegionalState, StateSummary, TopStates};
use crate::snapshot::{AggregateSnapshot, StateRollup};

/// Number of states a `top_n` request can return.
///
/// Rejects values below one. Anything past the ranked state count collapses to
/// that count, and to 1 when there are no states.
pub fn covered_top_n(snapshot: &AggregateSnapshot, top_n: i64) -> Result<i64> {
    if top_n < 1 {
        return Err(UidaiError::invalid_parameter(
            "top_n",
            format!("must be at least 1, got {}", top_n),
        ));
    }

    let available = i64::try_from(snapshot.states.len()).unwrap_or(i64::MAX);
    Ok(top_n.min(available.max(1)))
}

/// The `top_n` states by enrollments
pub fn top_states(snapshot: &AggregateSnapshot, top_n: i64) -> Result<TopStates> {
    let limit = usize::try_from(covered_top_n(snapshot, top_n)?).unwrap_or(usize::MAX);
    Ok(TopStates {
        top_states: snapshot.states.iter().take(limit).map(summarize).collect(),
        total_states: snapshot.states.len(),
    })
}

/// Every state with its region code, in ranking order
pub fn all_states(snapshot: &AggregateSnapshot) -> AllStates {
    let states: Vec<RegionalState> = snapshot
        .states
        .iter()
        .map(|rollup| RegionalState {
            summary: summarize(rollup),
            code: rollup.state.iso_code().to_string(),
        })
        .collect();

    AllStates {
        total_states: states.len(),
        total_enrollments: snapshot.states.iter().map(|s| s.total).sum(),
        states,
    }
}

fn summarize(rollup: &StateRollup) -> StateSummary {
    StateSummary {
        state: rollup.state,
        enrollments: rollup.total,
        enrollments_formatted: format_thousands(rollup.total),
        districts: rollup.districts,
        pincodes: rollup.pincodes,
    }
}
