use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

fn default_use_transactions() -> bool {
    true
}

/// Global configuration loaded from `~/.config/cmm/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CmmConfig {
    /// External engine command used to replay migration steps, e.g.
    /// `"/usr/local/bin/cms-engine"` or `"php bin/console"`. Resume runs
    /// refuse to start while this is unset.
    #[serde(default)]
    pub engine_command: Option<String>,
    /// Registry database path override; the XDG state dir is used when unset.
    #[serde(default)]
    pub database: Option<PathBuf>,
    /// Wrap each migration in an engine-side transaction. A per-run
    /// `--no-transactions` flag overrides this.
    #[serde(default = "default_use_transactions")]
    pub use_transactions: bool,
}

impl Default for CmmConfig {
    fn default() -> Self {
        Self {
            engine_command: None,
            database: None,
            use_transactions: true,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("cmm")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<CmmConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = CmmConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: CmmConfig = toml::from_str(&data)?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = CmmConfig::default();
        assert_eq!(cfg.engine_command, None);
        assert_eq!(cfg.database, None);
        assert!(cfg.use_transactions);
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = CmmConfig {
            engine_command: Some("cms-engine --env=prod".to_string()),
            database: Some(PathBuf::from("/var/lib/cmm/migrations.db")),
            use_transactions: false,
        };
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: CmmConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.engine_command, cfg.engine_command);
        assert_eq!(parsed.database, cfg.database);
        assert_eq!(parsed.use_transactions, cfg.use_transactions);
    }

    #[test]
    fn config_toml_empty_file_uses_defaults() {
        let cfg: CmmConfig = toml::from_str("").unwrap();
        assert_eq!(cfg.engine_command, None);
        assert_eq!(cfg.database, None);
        assert!(cfg.use_transactions);
    }

    #[test]
    fn config_toml_custom_values() {
        let toml = r#"
            engine_command = "php bin/console"
            use_transactions = false
        "#;
        let cfg: CmmConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.engine_command.as_deref(), Some("php bin/console"));
        assert!(cfg.database.is_none());
        assert!(!cfg.use_transactions);
    }
}
