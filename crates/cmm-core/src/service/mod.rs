//! Collaborator interfaces for the resume workflow, and the production
//! registry-backed service.
//!
//! The workflow receives its collaborators explicitly so tests can script
//! lookups, failures, and operator answers without a database or terminal.

mod store_service;

use anyhow::Result;
use async_trait::async_trait;

use crate::error::ResumeError;
use crate::registry::{Migration, MigrationStatus};

pub use store_service::StoreService;

/// Lookup and resume operations over the migration system of record.
#[async_trait]
pub trait MigrationService {
    async fn get_migration(&self, name: &str) -> Result<Option<Migration>>;

    async fn migrations_by_status(&self, status: MigrationStatus) -> Result<Vec<Migration>>;

    /// Resume one suspended migration. Blocks until the engine finishes;
    /// may take arbitrarily long.
    async fn resume_migration(
        &self,
        migration: &Migration,
        use_transaction: bool,
    ) -> Result<(), ResumeError>;
}

/// Operator-facing interaction: output lines and the confirmation gate.
pub trait Operator {
    /// Yes/no prompt. Only called in interactive mode.
    fn confirm(&self, prompt: &str) -> Result<bool>;

    /// Write one line of progress/reporting output.
    fn line(&self, msg: &str);
}
