//! CLI for the cmm content migration manager.

mod commands;
mod operator;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use cmm_core::config;
use cmm_core::registry::MigrationStore;

use commands::{
    run_add, run_completions, run_remove, run_resume, run_status, run_suspend,
};

/// Top-level CLI for the cmm content migration manager.
#[derive(Debug, Parser)]
#[command(name = "cmm")]
#[command(about = "cmm: content migration manager", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Resume suspended migrations through the configured engine.
    Resume {
        /// Keep resuming migrations even if one fails.
        #[arg(short = 'i', long)]
        ignore_failures: bool,

        /// Do not ask any interactive question.
        #[arg(short = 'n', long)]
        no_interaction: bool,

        /// Do not wrap each migration in an engine-side transaction. Unsafe,
        /// but needed for legacy slot handlers.
        #[arg(short = 'u', long)]
        no_transactions: bool,

        /// A single migration to resume (plain migration name).
        #[arg(short = 'm', long, value_name = "NAME")]
        migration: Option<String>,
    },

    /// Show status of all migrations in the registry.
    Status,

    /// Register a new migration in `todo` status.
    Add {
        /// Migration name (unique).
        name: String,
    },

    /// Mark a migration suspended so a later `resume` picks it up.
    Suspend {
        /// Migration name.
        name: String,

        /// Engine context blob to persist with the suspension.
        #[arg(long, value_name = "JSON")]
        context: Option<String>,
    },

    /// Remove a migration from the registry.
    Remove {
        /// Migration name.
        name: String,
    },

    /// Generate shell completions.
    Completions {
        /// Target shell.
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<i32> {
        let cli = Cli::parse();

        // Completions need no config or registry.
        if let CliCommand::Completions { shell } = &cli.command {
            run_completions(*shell);
            return Ok(0);
        }

        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);
        let store = match &cfg.database {
            Some(path) => MigrationStore::open_at(path).await?,
            None => MigrationStore::open_default().await?,
        };

        match cli.command {
            CliCommand::Resume {
                ignore_failures,
                no_interaction,
                no_transactions,
                migration,
            } => {
                return run_resume(
                    &store,
                    &cfg,
                    ignore_failures,
                    no_interaction,
                    no_transactions,
                    migration,
                )
                .await;
            }
            CliCommand::Status => run_status(&store).await?,
            CliCommand::Add { name } => run_add(&store, &name).await?,
            CliCommand::Suspend { name, context } => {
                run_suspend(&store, &name, context.as_deref()).await?;
            }
            CliCommand::Remove { name } => run_remove(&store, &name).await?,
            CliCommand::Completions { .. } => unreachable!("handled above"),
        }

        Ok(0)
    }
}

#[cfg(test)]
mod tests;
