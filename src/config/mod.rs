use serde::{Deserialize, Serialize};
use tracing::info;
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    core::utils::{ensure_dir, write_atomic, PathResolver},
    currency::ExchangeRate,
    errors::LedgerError,
    ledger::MonthScope,
    storage::PURCHASES_KEY,
};

/// Session settings. Unknown or missing fields fall back to their defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub exchange_rate: ExchangeRate,
    #[serde(default)]
    pub month_scope: MonthScope,
    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,
    #[serde(default = "Config::default_storage_key")]
    pub storage_key: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            exchange_rate: ExchangeRate::default(),
            month_scope: MonthScope::default(),
            ui_color_enabled: Self::default_ui_color_enabled(),
            storage_key: Self::default_storage_key(),
        }
    }
}

impl Config {
    pub fn default_ui_color_enabled() -> bool {
        true
    }

    pub fn default_storage_key() -> String {
        PURCHASES_KEY.into()
    }
}

pub struct ConfigManager {
    base: PathBuf,
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, LedgerError> {
        Self::with_base_dir(PathResolver::base_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, LedgerError> {
        ensure_dir(&base)?;
        Ok(Self {
            path: PathResolver::config_file_in(&base),
            base,
        })
    }

    pub fn load(&self) -> Result<Config, LedgerError> {
        if !self.path.exists() {
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&self.path)?;
        serde_json::from_str(&data).map_err(|err| {
            LedgerError::Config(format!("{}: {}", self.path.display(), err))
        })
    }

    /// Loads the configuration, writing the defaults out when no file exists yet.
    pub fn load_or_init(&self) -> Result<Config, LedgerError> {
        if self.path.exists() {
            return self.load();
        }
        let config = Config::default();
        self.save(&config)?;
        info!(path = %self.path.display(), "wrote default configuration");
        Ok(config)
    }

    pub fn save(&self, config: &Config) -> Result<(), LedgerError> {
        let json = serde_json::to_string_pretty(config)?;
        write_atomic(&self.path, &json)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn store_dir(&self) -> PathBuf {
        PathResolver::store_dir_in(&self.base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let temp = TempDir::new().expect("temp dir");
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).expect("manager");
        let config = manager.load().expect("load");
        assert_eq!(config, Config::default());
        assert_eq!(config.exchange_rate.value(), dec!(0.91));
    }

    #[test]
    fn save_and_load_roundtrip() {
        let temp = TempDir::new().expect("temp dir");
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).expect("manager");
        let config = Config {
            exchange_rate: ExchangeRate::new(dec!(0.95)).expect("rate"),
            month_scope: MonthScope::MonthOnly,
            ..Config::default()
        };
        manager.save(&config).expect("save");
        assert_eq!(manager.load().expect("load"), config);
    }

    #[test]
    fn first_start_writes_defaults_once() {
        let temp = TempDir::new().expect("temp dir");
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).expect("manager");
        assert!(!manager.path().exists());

        assert_eq!(manager.load_or_init().expect("init"), Config::default());
        let written = fs::read_to_string(manager.path()).expect("config written");
        assert!(written.contains("\"exchange_rate\": \"0.91\""));

        fs::write(manager.path(), r#"{"month_scope": "month_only"}"#).expect("edit");
        let config = manager.load_or_init().expect("reload");
        assert_eq!(config.month_scope, MonthScope::MonthOnly);
    }

    #[test]
    fn partial_file_fills_defaults_and_rejects_bad_rate() {
        let temp = TempDir::new().expect("temp dir");
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).expect("manager");

        fs::write(manager.path(), r#"{"exchange_rate": "0.5"}"#).expect("write");
        let config = manager.load().expect("load");
        assert_eq!(config.exchange_rate.value(), dec!(0.5));
        assert_eq!(config.storage_key, "purchases");

        fs::write(manager.path(), r#"{"exchange_rate": "0"}"#).expect("write");
        assert!(matches!(manager.load(), Err(LedgerError::Config(_))));
    }
}
