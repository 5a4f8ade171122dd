//! Schema migrations for the bar cache.

use anyhow::anyhow;
use diesel::{Connection, SqliteConnection, connection::SimpleConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

use crate::db::connection::sqlite_path;

/// The `bars` schema, compiled into the binary.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Apply pending migrations to the SQLite file at `path` (created if absent).
pub fn run_sqlite(path: &str) -> anyhow::Result<()> {
    let mut conn = SqliteConnection::establish(path)?;
    conn.batch_execute("PRAGMA journal_mode=WAL;")?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| anyhow!(e))?;

    if !applied.is_empty() {
        tracing::info!(path, count = applied.len(), "applied migrations");
    }
    Ok(())
}

/// Runs pending migrations for `database_url`.
///
/// Accepts a bare file path or a `sqlite:` / `sqlite://` URL; anything that
/// looks like a server URL is rejected.
pub fn run_all(database_url: &str) -> anyhow::Result<()> {
    if database_url.contains("://") && !database_url.starts_with("sqlite://") {
        anyhow::bail!("Unsupported DATABASE_URL: {database_url}");
    }
    run_sqlite(sqlite_path(database_url))
}
