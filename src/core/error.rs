use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MigrateError {
    #[error("SQLite error: {0}")]
    RusqliteError(#[from] rusqlite::Error),
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),
    #[error("Failed to open database {path}: {source}")]
    DatabaseOpenError {
        path: String,
        #[source]
        source: rusqlite::Error,
    },
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Path error: {0}")]
    PathError(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
}
