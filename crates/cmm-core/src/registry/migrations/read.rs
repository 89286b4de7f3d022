//! Registry read operations: list and get.

use anyhow::Result;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use super::super::db::MigrationStore;
use super::super::types::{MigrationRecord, MigrationStatus};

fn record_from_row(row: &SqliteRow) -> MigrationRecord {
    let name: String = row.get("name");
    let status_str: String = row.get("status");
    let execution_error: Option<String> = row.get("execution_error");
    let suspended_context: Option<String> = row.get("suspended_context");
    let created_at: i64 = row.get("created_at");
    let updated_at: i64 = row.get("updated_at");

    MigrationRecord {
        name,
        status: MigrationStatus::from_str(&status_str),
        execution_error,
        suspended_context,
        created_at,
        updated_at,
    }
}

impl MigrationStore {
    /// List all migrations in the registry, name order.
    pub async fn list_migrations(&self) -> Result<Vec<MigrationRecord>> {
        let rows = sqlx::query(
            r#"
            SELECT name, status, execution_error, suspended_context, created_at, updated_at
            FROM migrations
            ORDER BY name ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(record_from_row).collect())
    }

    /// List migrations with the given status, in the registry's enumeration
    /// order (name ASC).
    pub async fn migrations_by_status(
        &self,
        status: MigrationStatus,
    ) -> Result<Vec<MigrationRecord>> {
        let rows = sqlx::query(
            r#"
            SELECT name, status, execution_error, suspended_context, created_at, updated_at
            FROM migrations
            WHERE status = ?1
            ORDER BY name ASC
            "#,
        )
        .bind(status.as_str())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(record_from_row).collect())
    }

    /// Fetch a single migration row by name.
    pub async fn get_migration(&self, name: &str) -> Result<Option<MigrationRecord>> {
        let row = sqlx::query(
            r#"
            SELECT name, status, execution_error, suspended_context, created_at, updated_at
            FROM migrations
            WHERE name = ?1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(record_from_row))
    }
}
