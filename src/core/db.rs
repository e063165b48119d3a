use crate::core::error::MigrateError;
use rusqlite::{Connection, OpenFlags};
use std::path::Path;

/// Open an existing database read-write. A missing file is an error rather
/// than a freshly created empty database.
pub fn db_connect(db_path: &Path) -> Result<Connection, MigrateError> {
    let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
        | OpenFlags::SQLITE_OPEN_URI
        | OpenFlags::SQLITE_OPEN_NO_MUTEX;
    Connection::open_with_flags(db_path, flags).map_err(|source| MigrateError::DatabaseOpenError {
        path: db_path.display().to_string(),
        source,
    })
}

/// Close the connection, surfacing any error SQLite reports on close.
pub fn db_close(conn: Connection) -> Result<(), MigrateError> {
    conn.close().map_err(|(_, e)| MigrateError::RusqliteError(e))
}

/// Quote an identifier for interpolation into SQL.
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
