use chrono::{Days, NaiveDate};
use std::collections::BTreeMap;

use uidai_core::error::{Result, UidaiError};

use crate::models::TrendSeries;
use crate::snapshot::AggregateSnapshot;

/// Number of days a `window` request actually covers.
///
/// Rejects windows below one day. The result is the window clamped to the
/// enrollment span, or 1 when there is no enrollment data, so every oversized
/// request maps to the same covered length.
pub fn covered_window(snapshot: &AggregateSnapshot, window: i64) -> Result<i64> {
    if window < 1 {
        return Err(UidaiError::invalid_parameter(
            "days",
            format!("window must be at least 1 day, got {}", window),
        ));
    }

    Ok(match snapshot.enrollment_span() {
        Some((earliest, anchor)) => window.min((anchor - earliest).num_days() + 1),
        None => 1,
    })
}

/// Human-readable period for a series of `covered` days answering a `requested`-day query
pub fn period_label(covered: usize, requested: i64) -> String {
    if covered > 0 && (covered as i64) < requested {
        format!("Last {} days (requested {})", covered, requested)
    } else {
        format!("Last {} days", requested)
    }
}

/// Daily totals over the last `window` days of enrollment data.
///
/// The window is anchored at the latest enrollment date. When it reaches past the
/// earliest enrollment date it is clamped to the available span, so the series can
/// be shorter than requested; `period` then names both lengths.
pub fn trend_series(snapshot: &AggregateSnapshot, window: i64) -> Result<TrendSeries> {
    let length = covered_window(snapshot, window)?;

    let Some((_, anchor)) = snapshot.enrollment_span() else {
        return Ok(TrendSeries {
            dates: Vec::new(),
            enrollment: Vec::new(),
            demographic: Vec::new(),
            biometric: Vec::new(),
            period: period_label(0, window),
        });
    };

    let start = anchor - Days::new((length - 1) as u64);
    let dates: Vec<NaiveDate> = start.iter_days().take(length as usize).collect();

    Ok(TrendSeries {
        enrollment: fill(&snapshot.enrollment_daily, &dates),
        demographic: fill(&snapshot.demographic_daily, &dates),
        biometric: fill(&snapshot.biometric_daily, &dates),
        period: period_label(dates.len(), window),
        dates,
    })
}

/// Look up each date, zero when absent
fn fill(daily: &BTreeMap<NaiveDate, u64>, dates: &[NaiveDate]) -> Vec<u64> {
    dates
        .iter()
        .map(|date| daily.get(date).copied().unwrap_or(0))
        .collect()
}
