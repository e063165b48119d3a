//! owner-migrate: collapse a multi-tenant deployment onto a single owner.
//!
//! One run does two things, in order:
//!
//! 1. **Database phase**: for each table in a fixed list, every row whose
//!    `userId` is not `owner` is reassigned to `owner`. A table that cannot be
//!    queried is reported and skipped; the run continues.
//! 2. **Session phase**: inside the session directory (`.wwebjs_auth`), the
//!    first `session-<id>` entry is renamed to `session-owner`, unless that
//!    name is already taken. Existing sessions are never overwritten.
//!
//! Both phases are guarded by their own preconditions, so running the tool
//! again after convergence changes nothing.
//!
//! # Examples
//!
//! ```bash
//! # Migrate ./data/database.sqlite and ./.wwebjs_auth
//! owner-migrate
//!
//! # Point at another database
//! DB_PATH=/srv/bot/data/database.sqlite owner-migrate
//!
//! # Machine-readable summary
//! owner-migrate --format json
//! ```
//!
//! # Crate Structure
//!
//! - [`core`]: configuration, the two phases, and run reporting

mod cli;
pub mod core;

use cli::{Cli, OutputFormat};
use crate::core::{
    config::MigrationConfig,
    envelope::SummaryEnvelope,
    error::MigrateError,
    output::ConsoleReporter,
    report::{RunSummary, SilentReporter},
    runner,
};

use clap::Parser;

pub fn run() -> Result<(), MigrateError> {
    let cli = Cli::parse();
    let format = OutputFormat::parse(&cli.format).ok_or_else(|| {
        MigrateError::ConfigError(format!(
            "unsupported --format '{}', expected 'text' or 'json'",
            cli.format
        ))
    })?;

    let config = MigrationConfig::from_env()
        .with_db_path(cli.db_path)
        .with_session_dir(cli.session_dir);

    match format {
        OutputFormat::Text => {
            let mut reporter = ConsoleReporter::new(&config.owner_id);
            reporter.banner();
            let summary = runner::run_migration(&config, &mut reporter)?;
            reporter.finish(&summary);
        }
        OutputFormat::Json => {
            let summary = runner::run_migration(&config, &mut SilentReporter)?;
            println!("{}", render_json(&summary)?);
        }
    }
    Ok(())
}

fn render_json(summary: &RunSummary) -> Result<String, MigrateError> {
    Ok(serde_json::to_string_pretty(&SummaryEnvelope::new(summary))?)
}
