//! Process-scoped configuration for a single migration run.
//!
//! Resolution order is CLI override, then environment, then the built-in
//! defaults below. Relative paths resolve against the working directory.

use std::env;
use std::path::PathBuf;

/// Tables whose `userId` column is collapsed onto the owner, in processing order.
pub const DEFAULT_TABLES: [&str; 8] = [
    "groups",
    "autoreplies",
    "templates",
    "schedules",
    "commands",
    "settings",
    "crm_contacts",
    "crm_sequences",
];

pub const OWNER_ID: &str = "owner";
pub const DEFAULT_DB_PATH: &str = "./data/database.sqlite";
pub const DEFAULT_SESSION_DIR: &str = "./.wwebjs_auth";
pub const SESSION_PREFIX: &str = "session-";

pub const DB_PATH_ENV: &str = "DB_PATH";
pub const SESSION_DIR_ENV: &str = "SESSION_DIR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationConfig {
    /// SQLite database file. Must already exist.
    pub db_path: PathBuf,
    /// Directory holding `session-<id>` entries. May be absent.
    pub session_dir: PathBuf,
    /// Canonical tenant id every row and the retained session are moved to.
    pub owner_id: String,
    pub tables: Vec<String>,
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            session_dir: PathBuf::from(DEFAULT_SESSION_DIR),
            owner_id: OWNER_ID.to_string(),
            tables: DEFAULT_TABLES.iter().map(|t| t.to_string()).collect(),
        }
    }
}

impl MigrationConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();
        if let Some(db_path) = non_empty(DB_PATH_ENV) {
            config.db_path = PathBuf::from(db_path);
        }
        if let Some(session_dir) = non_empty(SESSION_DIR_ENV) {
            config.session_dir = PathBuf::from(session_dir);
        }
        config
    }

    pub fn with_db_path(mut self, db_path: Option<PathBuf>) -> Self {
        if let Some(p) = db_path {
            self.db_path = p;
        }
        self
    }

    pub fn with_session_dir(mut self, session_dir: Option<PathBuf>) -> Self {
        if let Some(p) = session_dir {
            self.session_dir = p;
        }
        self
    }

    /// Directory name every candidate session is renamed to.
    pub fn owner_session_name(&self) -> String {
        format!("{}{}", SESSION_PREFIX, self.owner_id)
    }

    pub fn owner_session_path(&self) -> PathBuf {
        self.session_dir.join(self.owner_session_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_match_fixed_table_list() {
        let config = MigrationConfig::default();
        assert_eq!(config.tables.len(), 8);
        assert_eq!(config.tables[0], "groups");
        assert_eq!(config.tables[7], "crm_sequences");
        assert_eq!(config.owner_id, "owner");
        assert_eq!(config.db_path, PathBuf::from("./data/database.sqlite"));
        assert_eq!(config.session_dir, PathBuf::from("./.wwebjs_auth"));
    }

    #[test]
    fn test_db_path_env_overrides_default() {
        let config = MigrationConfig::from_lookup(lookup_from(&[("DB_PATH", "/srv/bot/db.sqlite")]));
        assert_eq!(config.db_path, PathBuf::from("/srv/bot/db.sqlite"));
        assert_eq!(config.session_dir, PathBuf::from(DEFAULT_SESSION_DIR));
    }

    #[test]
    fn test_empty_env_value_is_ignored() {
        let config = MigrationConfig::from_lookup(lookup_from(&[("DB_PATH", "  "), ("SESSION_DIR", "")]));
        assert_eq!(config, MigrationConfig::default());
    }

    #[test]
    fn test_cli_override_wins_over_env() {
        let config = MigrationConfig::from_lookup(lookup_from(&[("SESSION_DIR", "/env/auth")]))
            .with_session_dir(Some(PathBuf::from("/cli/auth")))
            .with_db_path(None);
        assert_eq!(config.session_dir, PathBuf::from("/cli/auth"));
        assert_eq!(config.db_path, PathBuf::from(DEFAULT_DB_PATH));
    }

    #[test]
    fn test_owner_session_path() {
        let config = MigrationConfig::default().with_session_dir(Some(PathBuf::from("/auth")));
        assert_eq!(config.owner_session_name(), "session-owner");
        assert_eq!(config.owner_session_path(), PathBuf::from("/auth/session-owner"));
    }
}
