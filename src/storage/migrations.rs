use anyhow::{Context, Result};
use rusqlite::Connection;
use std::time::Duration;

mod embedded {
    use refinery::embed_migrations;

    embed_migrations!("./migrations");
}

/// Apply embedded schema migrations to an open connection.
///
/// Refinery runs each migration in its own transaction, so this is safe to
/// call on every startup; already-applied migrations are skipped.
pub fn run_migrations(conn: &mut Connection) -> Result<()> {
    conn.busy_timeout(Duration::from_secs(30))
        .context("set SQLite busy timeout")?;

    embedded::migrations::runner()
        .run(conn)
        .map(|_| ())
        .context("apply migrations")
}
