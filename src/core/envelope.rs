//! Machine-readable run report printed by `--format json`.

use crate::core::report::RunSummary;
use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};
use ulid::Ulid;

pub const ENVELOPE_VERSION: &str = "1.0.0";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Ok,
    Warnings,
}

#[derive(Debug, Serialize)]
pub struct SummaryEnvelope<'a> {
    pub envelope_version: &'static str,
    /// Unix-epoch seconds with a `Z` suffix, e.g. `1771220592Z`.
    pub ts: String,
    pub run_id: String,
    pub cmd: &'static str,
    pub status: RunStatus,
    pub rows_changed: usize,
    pub summary: &'a RunSummary,
}

impl<'a> SummaryEnvelope<'a> {
    pub fn new(summary: &'a RunSummary) -> Self {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        let status = if summary.has_warnings() {
            RunStatus::Warnings
        } else {
            RunStatus::Ok
        };
        Self {
            envelope_version: ENVELOPE_VERSION,
            ts: format!("{}Z", secs),
            run_id: Ulid::new().to_string(),
            cmd: "migrate",
            status,
            rows_changed: summary.rows_changed(),
            summary,
        }
    }
}
