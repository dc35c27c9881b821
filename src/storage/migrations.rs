//! Database migrations for udo.
//!
//! Each migration upgrades the schema by one version. Migrations run
//! automatically when the database is opened.

use rusqlite::Connection;
use tracing::debug;

use crate::error::UdoError;

/// Current schema version.
const CURRENT_VERSION: i32 = 1;

/// Get the current schema version from the database.
///
/// Returns 0 for a new database.
pub fn get_version(conn: &Connection) -> Result<i32, UdoError> {
    conn.query_row("PRAGMA user_version", [], |row| row.get(0))
        .map_err(|e| UdoError::db("Failed to get schema version", &e))
}

fn set_version(conn: &Connection, version: i32) -> Result<(), UdoError> {
    conn.execute_batch(&format!("PRAGMA user_version = {version};"))
        .map_err(|e| UdoError::db("Failed to set schema version", &e))
}

/// Run all pending migrations.
pub fn run(conn: &Connection) -> Result<(), UdoError> {
    let current = get_version(conn)?;

    if current >= CURRENT_VERSION {
        return Ok(());
    }

    for version in (current + 1)..=CURRENT_VERSION {
        debug!(version, "running migration");
        run_migration(conn, version)?;
        set_version(conn, version)?;
    }

    Ok(())
}

fn run_migration(conn: &Connection, version: i32) -> Result<(), UdoError> {
    match version {
        1 => migrate_v1(conn),
        _ => Err(UdoError::Database(format!(
            "Unknown migration version: {version}"
        ))),
    }
}

/// Migration v1: the `todo` table.
///
/// `due` holds a naive local timestamp as `YYYY-MM-DD HH:MM:SS`, which sorts
/// and compares correctly as text.
fn migrate_v1(conn: &Connection) -> Result<(), UdoError> {
    conn.execute_batch(
        r"
        CREATE TABLE IF NOT EXISTS todo (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            description TEXT NOT NULL,
            priority INTEGER NOT NULL DEFAULT 2,
            done INTEGER NOT NULL DEFAULT 0,
            progress INTEGER NOT NULL DEFAULT 0,
            due TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_todo_due ON todo(due);
        CREATE INDEX IF NOT EXISTS idx_todo_done ON todo(done);
        ",
    )
    .map_err(|e| UdoError::db("Migration v1 failed", &e))
}
