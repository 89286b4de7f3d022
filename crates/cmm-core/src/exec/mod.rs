//! The seam to the external migration engine.
//!
//! Step replay is not implemented here: `StepExecutor` is the narrow
//! interface the resume protocol drives, and `CommandExecutor` is the
//! production adapter that shells out to the configured engine binary.

mod command;

use anyhow::Result;
use async_trait::async_trait;

use crate::registry::MigrationRecord;

pub use command::CommandExecutor;

/// Re-enters execution of a suspended migration from its persisted context.
#[async_trait]
pub trait StepExecutor: Send + Sync {
    async fn resume_steps(
        &self,
        migration: &MigrationRecord,
        use_transaction: bool,
    ) -> Result<()>;
}
