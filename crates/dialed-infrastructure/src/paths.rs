//! Path management for Dialed files.
//!
//! Directories are resolved with `AppPaths` from version-migrate.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/dialed/            # Config directory
//! └── config.toml              # Application configuration
//!
//! ~/.local/share/dialed/       # Data directory (overridable in config.toml)
//! ├── users/                   # One versioned JSON document per user
//! │   └── <uid>.json
//! └── current_draft.json       # Rounds of the unfinished session
//! ```

use dialed_core::config::DialedConfig;
use dialed_core::error::{DialedError, Result};
use std::path::PathBuf;
use version_migrate::AppPaths;

pub struct DialedPaths;

impl DialedPaths {
    fn app_paths() -> AppPaths {
        AppPaths::new("dialed")
    }

    pub fn config_dir() -> Result<PathBuf> {
        Self::app_paths()
            .config_dir()
            .map_err(|_| DialedError::config("Cannot resolve config directory"))
    }

    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Data directory: `storage.data_dir` when configured, the platform default otherwise.
    pub fn data_dir(config: &DialedConfig) -> Result<PathBuf> {
        if let Some(dir) = &config.storage.data_dir {
            return Ok(dir.clone());
        }
        Self::app_paths()
            .data_dir()
            .map_err(|_| DialedError::config("Cannot resolve data directory"))
    }

    pub fn users_dir(data_dir: &std::path::Path) -> PathBuf {
        data_dir.join("users")
    }

    pub fn draft_file(data_dir: &std::path::Path) -> PathBuf {
        data_dir.join("current_draft.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_data_dir_wins() {
        let mut config = DialedConfig::default();
        config.storage.data_dir = Some(PathBuf::from("/tmp/dialed-test"));
        let dir = DialedPaths::data_dir(&config).unwrap();
        assert_eq!(dir, PathBuf::from("/tmp/dialed-test"));
        assert_eq!(
            DialedPaths::users_dir(&dir),
            PathBuf::from("/tmp/dialed-test/users")
        );
    }
}
