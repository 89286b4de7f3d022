//! SQLite-backed registry implementation.
//!
//! Handles connection, schema migration, and timestamp helpers. Row CRUD
//! lives in `migrations`.

use anyhow::Result;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Sqlite};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

/// Percent-encode a path for use in a sqlite:// URI so spaces and special chars don't break parsing.
fn path_to_sqlite_uri(path: &Path) -> String {
    let s = path.to_string_lossy();
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '%' => out.push_str("%25"),
            ' ' => out.push_str("%20"),
            '#' => out.push_str("%23"),
            '?' => out.push_str("%3F"),
            '&' => out.push_str("%26"),
            c => out.push(c),
        }
    }
    format!("sqlite://{}", out)
}

/// Handle to the SQLite-backed migration registry.
///
/// The database file is stored under the XDG state directory:
/// `~/.local/state/cmm/migrations.db`.
#[derive(Clone)]
pub struct MigrationStore {
    pub(crate) pool: Pool<Sqlite>,
}

impl MigrationStore {
    /// Open (or create) the default registry database and run schema setup.
    pub async fn open_default() -> Result<Self> {
        let xdg_dirs = xdg::BaseDirectories::with_prefix("cmm")?;
        let state_dir = xdg_dirs.get_state_home().join("cmm");
        let db_path = state_dir.join("migrations.db");

        tokio::fs::create_dir_all(&state_dir).await?;

        let uri = path_to_sqlite_uri(&db_path) + "?mode=rwc";
        let pool = SqlitePoolOptions::new()
            .max_connections(8)
            .connect(&uri)
            .await?;

        let store = MigrationStore { pool };
        store.migrate_schema().await?;
        Ok(store)
    }

    /// Open (or create) the registry at a specific path. Creates parent dirs if needed.
    /// Used when `database` is set in config, and by tests with a temp directory.
    pub async fn open_at(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let uri = path_to_sqlite_uri(path) + "?mode=rwc";
        let pool = SqlitePoolOptions::new()
            .max_connections(8)
            .connect(&uri)
            .await?;
        let store = MigrationStore { pool };
        store.migrate_schema().await?;
        Ok(store)
    }

    async fn migrate_schema(&self) -> Result<()> {
        // Single-table schema keyed by migration name.
        //
        // - `execution_error` holds the last failure message for `cmm status`.
        // - `suspended_context` is the engine's serialized state at suspension.
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS migrations (
                name TEXT PRIMARY KEY,
                status TEXT NOT NULL,
                execution_error TEXT,
                suspended_context TEXT,
                created_at INTEGER NOT NULL,
                updated_at INTEGER NOT NULL
            );
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

/// Current time as Unix seconds (for registry timestamps). Pub for use by `migrations`.
pub(crate) fn unix_timestamp() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}

#[cfg(test)]
/// Open an in-memory registry for tests (no disk I/O).
pub(crate) async fn open_memory() -> Result<MigrationStore> {
    let pool = sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await?;
    let store = MigrationStore { pool };
    store.migrate_schema().await?;
    Ok(store)
}
