//! Progress hooks and the aggregated result of a run.

use crate::core::migration::TableReport;
use crate::core::sessions::{SessionPhase, SessionReport};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Database,
    Sessions,
}

/// Receives progress as each unit of work completes.
pub trait Reporter {
    fn begin_phase(&mut self, _phase: Phase) {}
    fn table(&mut self, _report: &TableReport) {}
    fn session(&mut self, _report: &SessionReport) {}
    fn session_phase(&mut self, _phase: &SessionPhase) {}
}

/// Discards all progress. Used for `--format json` and in tests.
pub struct SilentReporter;

impl Reporter for SilentReporter {}

/// Collects progress events in arrival order.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingReporter {
    pub events: Vec<String>,
}

#[cfg(test)]
impl Reporter for RecordingReporter {
    fn begin_phase(&mut self, phase: Phase) {
        self.events.push(format!("phase:{phase:?}"));
    }

    fn table(&mut self, report: &TableReport) {
        self.events.push(format!("table:{}", report.table));
    }

    fn session(&mut self, report: &SessionReport) {
        self.events.push(format!("session:{}", report.source));
    }

    fn session_phase(&mut self, phase: &SessionPhase) {
        self.events.push(format!("session_phase:{}", phase.label()));
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub owner_id: String,
    pub tables: Vec<TableReport>,
    pub sessions: SessionPhase,
}

impl RunSummary {
    pub fn rows_changed(&self) -> usize {
        self.tables.iter().map(TableReport::rows_changed).sum()
    }

    pub fn tables_failed(&self) -> usize {
        self.tables.iter().filter(|t| t.is_failed()).count()
    }

    pub fn renamed(&self) -> Option<&SessionReport> {
        self.sessions.reports().iter().find(|r| r.is_migrated())
    }

    pub fn sessions_skipped(&self) -> usize {
        self.sessions
            .reports()
            .iter()
            .filter(|r| !r.is_migrated())
            .count()
    }

    /// True when any table failed or any session candidate was skipped.
    pub fn has_warnings(&self) -> bool {
        self.tables_failed() > 0 || self.sessions_skipped() > 0
    }
}
