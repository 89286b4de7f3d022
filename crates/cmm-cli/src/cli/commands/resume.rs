//! `cmm resume` – resume suspended migrations via the external engine.

use anyhow::Result;
use cmm_core::config::CmmConfig;
use cmm_core::exec::CommandExecutor;
use cmm_core::metrics::SystemClock;
use cmm_core::registry::MigrationStore;
use cmm_core::service::StoreService;
use cmm_core::workflow::{ResumeRequest, ResumeWorkflow};
use std::io::IsTerminal;

use crate::cli::operator::TerminalOperator;

pub async fn run_resume(
    store: &MigrationStore,
    cfg: &CmmConfig,
    ignore_failures: bool,
    no_interaction: bool,
    no_transactions: bool,
    migration: Option<String>,
) -> Result<i32> {
    let executor = CommandExecutor::from_config(cfg)?;
    let service = StoreService::new(store.clone(), executor);
    let operator = TerminalOperator::new();
    let clock = SystemClock::new();

    let request = ResumeRequest {
        migration,
        ignore_failures,
        interactive: !no_interaction && std::io::stdin().is_terminal(),
        use_transaction: cfg.use_transactions && !no_transactions,
    };

    let report = ResumeWorkflow::new(&service, &operator, &clock)
        .run(&request)
        .await?;
    tracing::info!(
        executed = report.executed,
        failed = report.failed,
        "resume run finished"
    );
    Ok(report.exit_code())
}
