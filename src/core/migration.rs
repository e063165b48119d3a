//! Database phase: collapse every listed table's `userId` onto the owner.
//!
//! Each table is handled independently. A failure on one table is recorded
//! in its report and the loop moves on, so earlier tables stay migrated and
//! later tables are still attempted. Re-running is a no-op once converged
//! because both statements are guarded by `userId <> owner`.

use crate::core::db::quote_ident;
use crate::core::report::Reporter;
use rusqlite::Connection;
use rusqlite::types::Value;
use serde::Serialize;

/// Result of migrating a single table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TableOutcome {
    /// Rows were reassigned. `previous_ids` holds the distinct ids found before the update.
    Migrated {
        rows: usize,
        previous_ids: Vec<String>,
    },
    /// Every row already belongs to the owner.
    NoOp,
    /// Query or update failed; the message is SQLite's.
    Failed { error: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableReport {
    pub table: String,
    #[serde(flatten)]
    pub outcome: TableOutcome,
}

impl TableReport {
    pub fn rows_changed(&self) -> usize {
        match &self.outcome {
            TableOutcome::Migrated { rows, .. } => *rows,
            _ => 0,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.outcome, TableOutcome::Failed { .. })
    }
}

/// Distinct `userId` values in `table` that are not `owner_id`.
pub fn non_owner_ids(
    conn: &Connection,
    table: &str,
    owner_id: &str,
) -> Result<Vec<String>, rusqlite::Error> {
    let sql = format!(
        "SELECT DISTINCT userId FROM {} WHERE userId <> ?1",
        quote_ident(table)
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([owner_id], |row| row.get::<_, Value>(0))?;
    let mut out = Vec::new();
    for r in rows {
        out.push(render_value(r?));
    }
    Ok(out)
}

/// Reassign every non-owner row in `table`. Returns the number of rows changed.
pub fn reassign_rows(
    conn: &Connection,
    table: &str,
    owner_id: &str,
) -> Result<usize, rusqlite::Error> {
    let sql = format!(
        "UPDATE {} SET userId = ?1 WHERE userId <> ?1",
        quote_ident(table)
    );
    conn.execute(&sql, [owner_id])
}

fn try_migrate_table(
    conn: &Connection,
    table: &str,
    owner_id: &str,
) -> Result<TableOutcome, rusqlite::Error> {
    let previous_ids = non_owner_ids(conn, table, owner_id)?;
    if previous_ids.is_empty() {
        return Ok(TableOutcome::NoOp);
    }
    let rows = reassign_rows(conn, table, owner_id)?;
    Ok(TableOutcome::Migrated { rows, previous_ids })
}

/// Migrate one table, folding any SQLite error into the outcome.
pub fn migrate_table(conn: &Connection, table: &str, owner_id: &str) -> TableReport {
    let outcome = match try_migrate_table(conn, table, owner_id) {
        Ok(outcome) => outcome,
        Err(e) => TableOutcome::Failed {
            error: e.to_string(),
        },
    };
    TableReport {
        table: table.to_string(),
        outcome,
    }
}

/// Migrate `tables` in order, handing each report to `reporter` as soon as it is known.
pub fn migrate_tables<R>(
    conn: &Connection,
    tables: &[String],
    owner_id: &str,
    reporter: &mut R,
) -> Vec<TableReport>
where
    R: Reporter + ?Sized,
{
    let mut reports = Vec::with_capacity(tables.len());
    for table in tables {
        let report = migrate_table(conn, table, owner_id);
        reporter.table(&report);
        reports.push(report);
    }
    reports
}

fn render_value(value: Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::Integer(i) => i.to_string(),
        Value::Real(f) => f.to_string(),
        Value::Text(s) => s,
        Value::Blob(b) => format!("<blob {} bytes>", b.len()),
    }
}
