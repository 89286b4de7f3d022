//! Error taxonomy for migration selection and resume.

use thiserror::Error;

use crate::registry::MigrationStatus;

/// Errors surfaced while selecting or resuming a migration.
///
/// `NotFound` and `NotSuspended` are raised during selection, before any
/// migration is touched. `Failed` carries the engine's failure message for a
/// specific migration; the resume loop inspects it to decide continue-vs-abort.
#[derive(Debug, Error)]
pub enum ResumeError {
    #[error("migration '{0}' not found")]
    NotFound(String),

    #[error("migration '{name}' is not suspended (status: {status}), can not resume it")]
    NotSuspended {
        name: String,
        status: MigrationStatus,
    },

    #[error("{message}")]
    Failed { name: String, message: String },

    #[error(transparent)]
    Registry(#[from] anyhow::Error),
}
