//! Sequences the two phases over one exclusively owned connection, opened
//! first and closed after the session phase.

use crate::core::config::MigrationConfig;
use crate::core::db;
use crate::core::error::MigrateError;
use crate::core::migration;
use crate::core::report::{Phase, Reporter, RunSummary};
use crate::core::sessions;

/// Run the database phase then the session phase.
///
/// Failing to open the database aborts before anything is touched. Per-table
/// failures and skipped sessions are recorded in the summary, not returned
/// as errors.
pub fn run_migration<R>(config: &MigrationConfig, reporter: &mut R) -> Result<RunSummary, MigrateError>
where
    R: Reporter + ?Sized,
{
    let conn = db::db_connect(&config.db_path)?;

    reporter.begin_phase(Phase::Database);
    let tables = migration::migrate_tables(&conn, &config.tables, &config.owner_id, reporter);

    reporter.begin_phase(Phase::Sessions);
    let sessions = sessions::migrate_sessions(config, reporter)?;

    db::db_close(conn)?;

    Ok(RunSummary {
        owner_id: config.owner_id.clone(),
        tables,
        sessions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::report::RecordingReporter;
    use rusqlite::Connection;
    use tempfile::tempdir;

    #[test]
    fn test_events_arrive_in_processing_order() {
        let tmp = tempdir().unwrap();
        let db_path = tmp.path().join("database.sqlite");
        Connection::open(&db_path)
            .unwrap()
            .execute("CREATE TABLE groups (userId TEXT)", [])
            .unwrap();
        let config = MigrationConfig {
            db_path,
            session_dir: tmp.path().join(".wwebjs_auth"),
            tables: vec!["groups".to_string(), "settings".to_string()],
            ..MigrationConfig::default()
        };

        let mut reporter = RecordingReporter::default();
        run_migration(&config, &mut reporter).unwrap();
        assert_eq!(
            reporter.events,
            vec![
                "phase:Database",
                "table:groups",
                "table:settings",
                "phase:Sessions",
                "session_phase:absent",
            ]
        );
    }

    #[test]
    fn test_missing_database_aborts_before_sessions() {
        let tmp = tempdir().unwrap();
        let auth = tmp.path().join(".wwebjs_auth");
        std::fs::create_dir_all(auth.join("session-alice")).unwrap();
        let config = MigrationConfig {
            db_path: tmp.path().join("missing.sqlite"),
            session_dir: auth.clone(),
            ..MigrationConfig::default()
        };

        let mut reporter = RecordingReporter::default();
        let err = run_migration(&config, &mut reporter).expect_err("open must fail");
        assert!(matches!(err, MigrateError::DatabaseOpenError { .. }));
        assert!(reporter.events.is_empty());
        assert!(auth.join("session-alice").exists());
    }

    #[test]
    fn test_fatal_session_error_keeps_committed_table_updates() {
        let tmp = tempdir().unwrap();
        let db_path = tmp.path().join("database.sqlite");
        {
            let conn = Connection::open(&db_path).unwrap();
            conn.execute_batch(
                "CREATE TABLE groups (userId TEXT);
                 INSERT INTO groups (userId) VALUES ('alice');",
            )
            .unwrap();
        }
        let not_a_dir = tmp.path().join("auth-file");
        std::fs::write(&not_a_dir, "x").unwrap();
        let config = MigrationConfig {
            db_path: db_path.clone(),
            session_dir: not_a_dir,
            tables: vec!["groups".to_string()],
            ..MigrationConfig::default()
        };

        let mut reporter = RecordingReporter::default();
        let err = run_migration(&config, &mut reporter).expect_err("listing a file must fail");
        assert!(matches!(err, MigrateError::IoError(_)));
        assert_eq!(reporter.events[..3], ["phase:Database", "table:groups", "phase:Sessions"]);

        let owner_rows: i64 = Connection::open(&db_path)
            .unwrap()
            .query_row("SELECT COUNT(*) FROM groups WHERE userId = 'owner'", [], |r| r.get(0))
            .unwrap();
        assert_eq!(owner_rows, 1);
    }
}
