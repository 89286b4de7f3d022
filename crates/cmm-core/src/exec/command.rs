//! Subprocess adapter for the external migration engine.

use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use tokio::process::Command;

use crate::config::CmmConfig;
use crate::registry::MigrationRecord;

use super::StepExecutor;

/// Runs the configured engine command to replay a migration's remaining steps:
///
/// ```text
/// <engine_command> resume <name> [--no-transaction]
/// ```
///
/// The persisted suspension context is passed in the `CMM_SUSPENDED_CONTEXT`
/// environment variable. Exit status 0 means the migration completed; any
/// other exit maps to a failure whose message is the engine's stderr.
pub struct CommandExecutor {
    program: String,
    base_args: Vec<String>,
}

impl CommandExecutor {
    /// Build from a command line of the form `prog arg1 arg2 ...`
    /// (space-separated, no shell quoting).
    pub fn new(command_line: &str) -> Result<Self> {
        let mut parts = command_line.split_whitespace().map(str::to_string);
        let program = parts
            .next()
            .ok_or_else(|| anyhow!("engine command is empty"))?;
        Ok(Self {
            program,
            base_args: parts.collect(),
        })
    }

    /// Build from config; fails fast when `engine_command` is not set so a
    /// resume run never starts half-configured.
    pub fn from_config(cfg: &CmmConfig) -> Result<Self> {
        let command_line = cfg.engine_command.as_deref().ok_or_else(|| {
            anyhow!("engine_command is not set in config.toml; cmm can not resume migrations without an engine")
        })?;
        Self::new(command_line)
    }
}

#[async_trait]
impl StepExecutor for CommandExecutor {
    async fn resume_steps(
        &self,
        migration: &MigrationRecord,
        use_transaction: bool,
    ) -> Result<()> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.base_args);
        cmd.arg("resume").arg(&migration.name);
        if !use_transaction {
            cmd.arg("--no-transaction");
        }
        if let Some(context) = &migration.suspended_context {
            cmd.env("CMM_SUSPENDED_CONTEXT", context);
        }

        tracing::debug!(
            migration = %migration.name,
            program = %self.program,
            "invoking engine"
        );
        let output = cmd
            .output()
            .await
            .with_context(|| format!("could not launch engine '{}'", self.program))?;

        if output.status.success() {
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        let reason = stderr.trim();
        if reason.is_empty() {
            bail!("engine exited with {}", output.status);
        }
        bail!("{reason}");
    }
}
