//! Configuration loading.
//!
//! Reads `config.toml` through version-migrate's `FileStorage`, creating it
//! with defaults on first run.

use crate::dto::create_config_migrator;
use crate::paths::DialedPaths;
use dialed_core::config::DialedConfig;
use dialed_core::error::{DialedError, Result};
use std::path::PathBuf;
use version_migrate::{FileStorage, FileStorageStrategy, FormatStrategy, LoadBehavior};

const CONFIG_ENTITY: &str = "config";

#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
}

impl ConfigService {
    /// Uses the platform config file.
    pub fn new() -> Result<Self> {
        Ok(Self::with_path(DialedPaths::config_file()?))
    }

    /// Uses an explicit config file (for `--config` and tests).
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn open(&self) -> Result<FileStorage> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let strategy = FileStorageStrategy::new()
            .with_format(FormatStrategy::Toml)
            .with_load_behavior(LoadBehavior::CreateIfMissing);
        FileStorage::new(self.path.clone(), create_config_migrator()?, strategy).map_err(|e| {
            DialedError::config(format!("Failed to open {}: {}", self.path.display(), e))
        })
    }

    /// Loads the configuration, writing the defaults when the file has none.
    pub fn load(&self) -> Result<DialedConfig> {
        let mut storage = self.open()?;
        let configs: Vec<DialedConfig> = storage.query(CONFIG_ENTITY)?;

        match configs.into_iter().next() {
            Some(config) => Ok(config),
            None => {
                let default_config = DialedConfig::default();
                storage.update_and_save(CONFIG_ENTITY, vec![default_config.clone()])?;
                tracing::info!(path = %self.path.display(), "wrote default configuration");
                Ok(default_config)
            }
        }
    }

    pub fn save(&self, config: &DialedConfig) -> Result<()> {
        let mut storage = self.open()?;
        storage.update_and_save(CONFIG_ENTITY, vec![config.clone()])?;
        Ok(())
    }
}
