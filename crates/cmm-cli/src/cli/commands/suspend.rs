//! `cmm suspend <name>` – mark a migration suspended for a later resume.

use anyhow::{bail, Result};
use cmm_core::registry::MigrationStore;

pub async fn run_suspend(store: &MigrationStore, name: &str, context: Option<&str>) -> Result<()> {
    if store.get_migration(name).await?.is_none() {
        bail!("migration '{name}' not found");
    }
    store.record_suspension(name, context).await?;
    println!("Suspended migration {name}");
    Ok(())
}
