//! Read-only views over the intake log for charting and export.
//!
//! These never modify or truncate the log; a short display suffix is a
//! presentation choice.

use chrono::{DateTime, Timelike, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::error::Result;
use crate::session::IntakeEvent;

/// A point on the cumulative intake curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeriesPoint {
    pub at: DateTime<Utc>,
    pub cumulative_ml: u64,
}

/// The last `n` entries, oldest first.
pub fn recent(log: &[IntakeEvent], n: usize) -> &[IntakeEvent] {
    &log[log.len().saturating_sub(n)..]
}

/// Cumulative total after each entry, in log order.
pub fn cumulative_series(log: &[IntakeEvent]) -> Vec<SeriesPoint> {
    log.iter()
        .map(|e| SeriesPoint {
            at: e.timestamp,
            cumulative_ml: e.cumulative_total_after_ml,
        })
        .collect()
}

/// Millilitres logged per UTC hour of day. Hours with no entries are absent.
pub fn hourly_totals(log: &[IntakeEvent]) -> BTreeMap<u32, u64> {
    let mut buckets = BTreeMap::new();
    for entry in log {
        *buckets.entry(entry.timestamp.hour()).or_insert(0) += u64::from(entry.amount_ml);
    }
    buckets
}

/// Export the day's log as pretty JSON.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn export_json(log: &[IntakeEvent]) -> Result<String> {
    Ok(serde_json::to_string_pretty(log)?)
}
