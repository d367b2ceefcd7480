//! Application configuration (`config.toml`).

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use version_migrate::DeriveQueryable as Queryable;

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Queryable)]
#[queryable(entity = "config")]
pub struct DialedConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub user: LocalUserConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Where user documents and drafts live; the platform data directory when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

/// Identity used by the local sign-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalUserConfig {
    pub uid: String,
    pub display_name: String,
}

impl Default for LocalUserConfig {
    fn default() -> Self {
        Self {
            uid: "local".to_string(),
            display_name: "Putter".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive, overridden by `RUST_LOG`.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
