//! `cmm status` – show status of all migrations.

use anyhow::Result;
use cmm_core::registry::MigrationStore;

pub async fn run_status(store: &MigrationStore) -> Result<()> {
    let migrations = store.list_migrations().await?;
    if migrations.is_empty() {
        println!("No migrations in registry.");
    } else {
        println!("{:<40} {:<10} {}", "NAME", "STATUS", "ERROR");
        for m in migrations {
            let error = m.execution_error.as_deref().unwrap_or("-");
            println!("{:<40} {:<10} {}", m.name, m.status, error);
        }
    }
    Ok(())
}
