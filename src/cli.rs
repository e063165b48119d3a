//! CLI struct definitions. With no arguments the tool performs a full run
//! using `DB_PATH` / `SESSION_DIR` or their defaults.

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(
    name = "owner-migrate",
    version = env!("CARGO_PKG_VERSION"),
    about = "Reassign every tenant-scoped row to the 'owner' userId and rename the matching session directory."
)]
pub(crate) struct Cli {
    /// SQLite database to migrate (overrides DB_PATH; default ./data/database.sqlite).
    #[clap(long)]
    pub db_path: Option<PathBuf>,
    /// Directory holding session-<id> entries (overrides SESSION_DIR; default ./.wwebjs_auth).
    #[clap(long)]
    pub session_dir: Option<PathBuf>,
    /// Output format: 'text' or 'json'.
    #[clap(long, default_value = "text")]
    pub format: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "text" => Some(OutputFormat::Text),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }
}
