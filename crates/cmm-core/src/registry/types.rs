//! Types used by the migration registry.

use std::fmt;

/// Execution status of a migration, stored as a string in the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationStatus {
    Todo,
    Started,
    Done,
    Suspended,
    Failed,
    Skipped,
}

impl MigrationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            MigrationStatus::Todo => "todo",
            MigrationStatus::Started => "started",
            MigrationStatus::Done => "done",
            MigrationStatus::Suspended => "suspended",
            MigrationStatus::Failed => "failed",
            MigrationStatus::Skipped => "skipped",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "todo" => MigrationStatus::Todo,
            "started" => MigrationStatus::Started,
            "done" => MigrationStatus::Done,
            "suspended" => MigrationStatus::Suspended,
            "skipped" => MigrationStatus::Skipped,
            _ => MigrationStatus::Failed,
        }
    }
}

impl fmt::Display for MigrationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Summary view of a migration, enough for selection and announcements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Migration {
    pub name: String,
    pub status: MigrationStatus,
}

/// Full registry row for a migration.
///
/// `suspended_context` is the opaque blob the engine persisted when it
/// suspended the migration; it is handed back verbatim on resume.
#[derive(Debug, Clone)]
pub struct MigrationRecord {
    pub name: String,
    pub status: MigrationStatus,
    pub execution_error: Option<String>,
    pub suspended_context: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl MigrationRecord {
    pub fn summary(&self) -> Migration {
        Migration {
            name: self.name.clone(),
            status: self.status,
        }
    }
}
