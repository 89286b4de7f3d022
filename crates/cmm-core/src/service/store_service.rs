//! Registry-backed migration service: lookups plus the resume protocol
//! around an external step executor.

use anyhow::Result;
use async_trait::async_trait;

use crate::error::ResumeError;
use crate::exec::StepExecutor;
use crate::registry::{Migration, MigrationStatus, MigrationStore};
use crate::service::MigrationService;

/// Production `MigrationService`.
///
/// Lookups go straight to the registry. `resume_migration` re-validates the
/// suspended-only invariant against the current row (the summary handed in by
/// the caller may be stale), transitions the status around the engine call,
/// and records the outcome so `cmm status` shows what happened.
pub struct StoreService<E> {
    store: MigrationStore,
    executor: E,
}

impl<E> StoreService<E> {
    pub fn new(store: MigrationStore, executor: E) -> Self {
        Self { store, executor }
    }
}

#[async_trait]
impl<E: StepExecutor> MigrationService for StoreService<E> {
    async fn get_migration(&self, name: &str) -> Result<Option<Migration>> {
        Ok(self.store.get_migration(name).await?.map(|r| r.summary()))
    }

    async fn migrations_by_status(&self, status: MigrationStatus) -> Result<Vec<Migration>> {
        let records = self.store.migrations_by_status(status).await?;
        Ok(records.iter().map(|r| r.summary()).collect())
    }

    async fn resume_migration(
        &self,
        migration: &Migration,
        use_transaction: bool,
    ) -> Result<(), ResumeError> {
        let record = self
            .store
            .get_migration(&migration.name)
            .await?
            .ok_or_else(|| ResumeError::NotFound(migration.name.clone()))?;
        if record.status != MigrationStatus::Suspended {
            return Err(ResumeError::NotSuspended {
                name: record.name,
                status: record.status,
            });
        }

        self.store.mark_started(&record.name).await?;
        tracing::info!(migration = %record.name, use_transaction, "resuming");

        match self.executor.resume_steps(&record, use_transaction).await {
            Ok(()) => {
                self.store.mark_done(&record.name).await?;
                tracing::info!(migration = %record.name, "resumed");
                Ok(())
            }
            Err(err) => {
                let message = format!("{err:#}");
                if let Err(store_err) = self.store.record_failure(&record.name, &message).await {
                    tracing::warn!(
                        migration = %record.name,
                        error = %store_err,
                        "could not record failure in registry"
                    );
                }
                tracing::warn!(migration = %record.name, reason = %message, "resume failed");
                Err(ResumeError::Failed {
                    name: record.name,
                    message,
                })
            }
        }
    }
}
