//! DialedConfig DTOs and migrations

use serde::{Deserialize, Serialize};
use version_migrate::{FromDomain, IntoDomain, Versioned};

use dialed_core::config::{DialedConfig, LocalUserConfig, LoggingConfig, StorageConfig};
use dialed_core::error::Result;

/// Configuration V1.0.0.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Versioned)]
#[versioned(version = "1.0.0")]
pub struct ConfigV1_0_0 {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub user: LocalUserConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

pub type ConfigDTO = ConfigV1_0_0;

impl IntoDomain<DialedConfig> for ConfigV1_0_0 {
    fn into_domain(self) -> DialedConfig {
        DialedConfig {
            storage: self.storage,
            user: self.user,
            logging: self.logging,
        }
    }
}

impl FromDomain<DialedConfig> for ConfigV1_0_0 {
    fn from_domain(config: DialedConfig) -> Self {
        ConfigV1_0_0 {
            storage: config.storage,
            user: config.user,
            logging: config.logging,
        }
    }
}

pub fn create_config_migrator() -> Result<version_migrate::Migrator> {
    let mut migrator = version_migrate::Migrator::builder().build();

    let path = version_migrate::Migrator::define("config")
        .from::<ConfigV1_0_0>()
        .into_with_save::<DialedConfig>();

    migrator.register(path)?;
    Ok(migrator)
}
