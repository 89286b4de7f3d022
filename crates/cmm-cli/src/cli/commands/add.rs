//! `cmm add <name>` – register a new migration.

use anyhow::Result;
use cmm_core::registry::MigrationStore;

pub async fn run_add(store: &MigrationStore, name: &str) -> Result<()> {
    store.add_migration(name).await?;
    println!("Added migration {name}");
    Ok(())
}
