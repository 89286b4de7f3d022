//! `cmm remove <name>` – remove a migration from the registry.

use anyhow::Result;
use cmm_core::registry::MigrationStore;

pub async fn run_remove(store: &MigrationStore, name: &str) -> Result<()> {
    store.remove_migration(name).await?;
    println!("Removed migration {name}");
    Ok(())
}
