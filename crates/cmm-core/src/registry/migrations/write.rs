//! Registry write operations: add, status transitions, remove.

use anyhow::{Context, Result};

use super::super::db::{unix_timestamp, MigrationStore};
use super::super::types::MigrationStatus;

impl MigrationStore {
    /// Register a new migration in `todo` status. Names are unique; adding a
    /// name that already exists is an error.
    pub async fn add_migration(&self, name: &str) -> Result<()> {
        let now = unix_timestamp();
        sqlx::query(
            r#"
            INSERT INTO migrations (name, status, execution_error, suspended_context, created_at, updated_at)
            VALUES (?1, ?2, NULL, NULL, ?3, ?4)
            "#,
        )
        .bind(name)
        .bind(MigrationStatus::Todo.as_str())
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .with_context(|| format!("could not register migration '{name}'"))?;

        Ok(())
    }

    /// Mark a migration as currently executing.
    pub async fn mark_started(&self, name: &str) -> Result<()> {
        let now = unix_timestamp();
        sqlx::query(
            r#"
            UPDATE migrations
            SET status = ?1,
                updated_at = ?2
            WHERE name = ?3
            "#,
        )
        .bind(MigrationStatus::Started.as_str())
        .bind(now)
        .bind(name)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Mark a migration as completed, clearing any stale suspension context
    /// and failure message.
    pub async fn mark_done(&self, name: &str) -> Result<()> {
        let now = unix_timestamp();
        sqlx::query(
            r#"
            UPDATE migrations
            SET status = ?1,
                execution_error = NULL,
                suspended_context = NULL,
                updated_at = ?2
            WHERE name = ?3
            "#,
        )
        .bind(MigrationStatus::Done.as_str())
        .bind(now)
        .bind(name)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Mark a migration as suspended, persisting the engine's context blob so
    /// a later resume can pick up where execution stopped.
    pub async fn record_suspension(&self, name: &str, context: Option<&str>) -> Result<()> {
        let now = unix_timestamp();
        sqlx::query(
            r#"
            UPDATE migrations
            SET status = ?1,
                suspended_context = ?2,
                updated_at = ?3
            WHERE name = ?4
            "#,
        )
        .bind(MigrationStatus::Suspended.as_str())
        .bind(context)
        .bind(now)
        .bind(name)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Mark a migration as failed and store the failure message for `cmm status`.
    pub async fn record_failure(&self, name: &str, message: &str) -> Result<()> {
        let now = unix_timestamp();
        sqlx::query(
            r#"
            UPDATE migrations
            SET status = ?1,
                execution_error = ?2,
                updated_at = ?3
            WHERE name = ?4
            "#,
        )
        .bind(MigrationStatus::Failed.as_str())
        .bind(message)
        .bind(now)
        .bind(name)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Permanently remove a migration row from the registry.
    pub async fn remove_migration(&self, name: &str) -> Result<()> {
        sqlx::query(
            r#"
            DELETE FROM migrations
            WHERE name = ?1
            "#,
        )
        .bind(name)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
