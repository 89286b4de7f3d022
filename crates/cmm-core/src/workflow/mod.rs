//! Resume workflow: select suspended migrations, confirm, resume each in
//! order, report counts and timing.


use anyhow::Result;
use std::time::Duration;

use crate::error::ResumeError;
use crate::metrics::{peak_memory_bytes, Clock};
use crate::registry::{Migration, MigrationStatus};
use crate::service::{MigrationService, Operator};

/// Parameters for one resume run, built once from the invocation and
/// immutable afterwards.
#[derive(Debug, Clone)]
pub struct ResumeRequest {
    /// Restrict the run to one named migration.
    pub migration: Option<String>,
    /// Keep resuming past per-migration failures instead of aborting.
    pub ignore_failures: bool,
    /// Ask for confirmation before touching persistent state.
    pub interactive: bool,
    /// Wrap each migration in an engine-side transaction.
    pub use_transaction: bool,
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The loop processed every selected migration.
    Completed,
    /// No suspended migrations matched the selection.
    NothingToDo,
    /// The operator declined the confirmation prompt. Not a failure.
    Cancelled,
    /// A non-ignored failure stopped the loop early; later migrations in the
    /// selection were never attempted and are still suspended.
    Aborted,
}

/// Summary of one resume run.
#[derive(Debug)]
pub struct ResumeReport {
    pub executed: u32,
    pub failed: u32,
    pub elapsed: Duration,
    pub peak_memory: Option<u64>,
    pub outcome: RunOutcome,
}

impl ResumeReport {
    /// Process exit status: 0 = clean (including nothing-to-do and
    /// cancelled), 1 = aborted early, 2 = completed with ignored failures.
    pub fn exit_code(&self) -> i32 {
        match self.outcome {
            RunOutcome::Aborted => 1,
            RunOutcome::Completed if self.failed > 0 => 2,
            _ => 0,
        }
    }
}

/// Orchestrates one resume run over injected collaborators.
pub struct ResumeWorkflow<'a, S, O, C> {
    service: &'a S,
    operator: &'a O,
    clock: &'a C,
}

impl<'a, S, O, C> ResumeWorkflow<'a, S, O, C>
where
    S: MigrationService,
    O: Operator,
    C: Clock,
{
    pub fn new(service: &'a S, operator: &'a O, clock: &'a C) -> Self {
        Self {
            service,
            operator,
            clock,
        }
    }

    /// Run the workflow. Selection errors (unknown name, wrong status) fail
    /// the whole run before any migration is touched; per-migration failures
    /// are reflected in the report, not the `Err` channel.
    pub async fn run(&self, request: &ResumeRequest) -> Result<ResumeReport> {
        let start = self.clock.now();

        let selected = self.select(request).await?;
        self.operator
            .line(&format!("Found {} suspended migrations", selected.len()));

        if selected.is_empty() {
            self.operator.line("Nothing to do");
            return Ok(self.finish(0, 0, RunOutcome::NothingToDo, start));
        }

        if request.interactive {
            let proceed = self.operator.confirm(
                "Careful, the stored content will be modified. Do you want to continue?",
            )?;
            if !proceed {
                self.operator.line("Migration resuming cancelled!");
                return Ok(self.finish(0, 0, RunOutcome::Cancelled, start));
            }
        }

        let mut executed = 0u32;
        let mut failed = 0u32;

        for migration in &selected {
            self.operator.line(&format!("Resuming {}", migration.name));

            match self
                .service
                .resume_migration(migration, request.use_transaction)
                .await
            {
                Ok(()) => executed += 1,
                Err(err) if request.ignore_failures => {
                    self.operator
                        .line(&format!("Migration failed! Reason: {err}"));
                    failed += 1;
                }
                Err(err) => {
                    self.operator
                        .line(&format!("Migration aborted! Reason: {err}"));
                    return Ok(self.finish(executed, failed + 1, RunOutcome::Aborted, start));
                }
            }
        }

        let report = self.finish(executed, failed, RunOutcome::Completed, start);
        self.operator.line(&format!(
            "Resumed {} migrations, failed {}",
            report.executed, report.failed
        ));
        let mut timing = format!("Time taken: {:.2} secs", report.elapsed.as_secs_f64());
        if let Some(peak) = report.peak_memory {
            timing.push_str(&format!(
                ", memory: {:.2} MiB",
                peak as f64 / 1_048_576.0
            ));
        }
        self.operator.line(&timing);

        Ok(report)
    }

    /// Selection: one named migration (which must exist and be suspended) or
    /// every suspended migration in registry order.
    async fn select(&self, request: &ResumeRequest) -> Result<Vec<Migration>> {
        let Some(name) = &request.migration else {
            return self
                .service
                .migrations_by_status(MigrationStatus::Suspended)
                .await;
        };

        let migration = self
            .service
            .get_migration(name)
            .await?
            .ok_or_else(|| ResumeError::NotFound(name.clone()))?;
        if migration.status != MigrationStatus::Suspended {
            return Err(ResumeError::NotSuspended {
                name: name.clone(),
                status: migration.status,
            }
            .into());
        }
        Ok(vec![migration])
    }

    fn finish(
        &self,
        executed: u32,
        failed: u32,
        outcome: RunOutcome,
        start: Duration,
    ) -> ResumeReport {
        ResumeReport {
            executed,
            failed,
            elapsed: self.clock.now().saturating_sub(start),
            peak_memory: peak_memory_bytes(),
            outcome,
        }
    }
}
