//! Operator-facing rendering of progress and the closing summary.

use crate::core::migration::{TableOutcome, TableReport};
use crate::core::report::{Phase, Reporter, RunSummary};
use crate::core::sessions::{SessionOutcome, SessionPhase, SessionReport};
use crate::core::tui::{self, BoxStyle, ItemStatus};

const MAX_ERROR_CHARS: usize = 160;

/// Collapse newlines/extra whitespace and bound length for terminal display.
pub fn compact_line(input: &str, max_chars: usize) -> String {
    let collapsed = input.split_whitespace().collect::<Vec<_>>().join(" ");
    let mut chars = collapsed.chars();
    let preview: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{}...", preview)
    } else {
        preview
    }
}

/// Join every id for display. The full list is the audit record of who was reassigned.
pub fn join_ids(ids: &[String]) -> String {
    ids.iter()
        .map(|id| format!("'{}'", id))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn table_lines(report: &TableReport, owner_id: &str) -> Vec<(String, ItemStatus)> {
    let t = &report.table;
    match &report.outcome {
        TableOutcome::NoOp => vec![(format!("{t}: no migration needed"), ItemStatus::Unchanged)],
        TableOutcome::Migrated { rows, previous_ids } => vec![
            (
                format!("{t}: found userId {}", join_ids(previous_ids)),
                ItemStatus::Info,
            ),
            (
                format!("{t}: {rows} row(s) reassigned to '{owner_id}'"),
                ItemStatus::Migrated,
            ),
        ],
        TableOutcome::Failed { error } => vec![(
            format!("{t}: skipped ({})", compact_line(error, MAX_ERROR_CHARS)),
            ItemStatus::Failed,
        )],
    }
}

pub fn session_line(report: &SessionReport) -> (String, ItemStatus) {
    match &report.outcome {
        SessionOutcome::Migrated { target } => (
            format!("renamed {} -> {}", report.source, target),
            ItemStatus::Migrated,
        ),
        SessionOutcome::Skipped { reason } => (
            format!("{}: not renamed, {}", report.source, reason),
            ItemStatus::Skipped,
        ),
    }
}

pub fn session_phase_line(phase: &SessionPhase) -> Option<(String, ItemStatus)> {
    match phase {
        SessionPhase::Absent { base } => Some((
            format!("session directory {base} not found, skipping"),
            ItemStatus::Info,
        )),
        SessionPhase::Empty { base } => Some((
            format!("no session directories to migrate in {base}"),
            ItemStatus::Info,
        )),
        SessionPhase::Processed { .. } => None,
    }
}

pub fn summary_line(summary: &RunSummary) -> String {
    let session = match summary.renamed() {
        Some(r) => format!("renamed {}", r.source),
        None => "no session renamed".to_string(),
    };
    format!(
        "{} row(s) reassigned, {} table warning(s), {} session warning(s), {}",
        summary.rows_changed(),
        summary.tables_failed(),
        summary.sessions_skipped(),
        session
    )
}

/// Prints progress lines to stdout as work completes.
pub struct ConsoleReporter {
    owner_id: String,
}

impl ConsoleReporter {
    pub fn new(owner_id: &str) -> Self {
        Self {
            owner_id: owner_id.to_string(),
        }
    }

    pub fn banner(&self) {
        println!();
        tui::render_box(
            "OWNER MIGRATION",
            &format!("target userId: {}", self.owner_id),
            BoxStyle::Info,
        );
    }

    pub fn finish(&self, summary: &RunSummary) {
        let style = if summary.has_warnings() {
            BoxStyle::Warning
        } else {
            BoxStyle::Success
        };
        let title = if summary.has_warnings() {
            "MIGRATION FINISHED WITH WARNINGS"
        } else {
            "MIGRATION COMPLETE"
        };
        println!();
        tui::render_box(title, "", style);
        tui::print_item(&summary_line(summary), ItemStatus::Info);
        println!();
    }
}

impl Reporter for ConsoleReporter {
    fn begin_phase(&mut self, phase: Phase) {
        use colored::Colorize;

        let heading = match phase {
            Phase::Database => "Database",
            Phase::Sessions => "Session directories",
        };
        println!();
        println!("{}", heading.bright_white().bold());
    }

    fn table(&mut self, report: &TableReport) {
        for (line, status) in table_lines(report, &self.owner_id) {
            tui::print_item(&line, status);
        }
    }

    fn session(&mut self, report: &SessionReport) {
        let (line, status) = session_line(report);
        tui::print_item(&line, status);
    }

    fn session_phase(&mut self, phase: &SessionPhase) {
        if let Some((line, status)) = session_phase_line(phase) {
            tui::print_item(&line, status);
        }
    }
}
