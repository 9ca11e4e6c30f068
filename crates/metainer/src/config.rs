//! # Configuration
//!
//! The metadata layer recognizes a few reserved keys. Their names are
//! configurable through [`MetainerConfig`], loaded with [`confique`].
//!
//! ## Resolution Order
//!
//! 1. **Environment variables**: `METAINER_NAME_KEY`, `METAINER_MOUNTS_KEY`,
//!    `METAINER_HIDDEN_KEY`.
//! 2. **Config file**: an optional TOML file passed to [`MetainerConfig::load`].
//! 3. **Compiled defaults**: via `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `name_key` | `name` | Field holding a record's name; also the default mount key |
//! | `mounts_key` | `mounts` | Namespace slot a host reads its mount keys from |
//! | `hidden_key` | `hidden` | Field that, when truthy, suppresses the name-key mount |
//! | `mounts` | unset | Host-wide default mount keys, used when the namespace has none |

use crate::container::DEFAULT_NAME_KEY;
use crate::error::Result;
use confique::Config;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

pub const DEFAULT_MOUNTS_KEY: &str = "mounts";
pub const DEFAULT_HIDDEN_KEY: &str = "hidden";

/// Environment variables read by [`MetainerConfig::load`].
pub const ENV_VARS: [&str; 3] = [
    "METAINER_NAME_KEY",
    "METAINER_MOUNTS_KEY",
    "METAINER_HIDDEN_KEY",
];

/// Shared default configuration for hosts created without one.
pub static DEFAULT_CONFIG: Lazy<Arc<MetainerConfig>> =
    Lazy::new(|| Arc::new(MetainerConfig::default()));

// The `#[config(default = ...)]` literals must match the constants above;
// `test_load_without_file_matches_default` keeps them in step.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MetainerConfig {
    /// Field holding a record's name.
    #[config(default = "name", env = "METAINER_NAME_KEY")]
    pub name_key: String,

    /// Namespace slot holding the list of mount keys.
    #[config(default = "mounts", env = "METAINER_MOUNTS_KEY")]
    pub mounts_key: String,

    /// Field suppressing the name-key mount.
    #[config(default = "hidden", env = "METAINER_HIDDEN_KEY")]
    pub hidden_key: String,

    /// Default mount keys when the namespace carries none.
    /// When absent, only the name key mounts.
    pub mounts: Option<Vec<String>>,
}

impl Default for MetainerConfig {
    fn default() -> Self {
        Self {
            name_key: DEFAULT_NAME_KEY.to_string(),
            mounts_key: DEFAULT_MOUNTS_KEY.to_string(),
            hidden_key: DEFAULT_HIDDEN_KEY.to_string(),
            mounts: None,
        }
    }
}

impl MetainerConfig {
    /// Load configuration from the environment and an optional TOML file.
    ///
    /// A missing file is not an error; compiled defaults fill the gaps.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Self::builder().env();
        if let Some(path) = path {
            builder = builder.file(path);
        }
        Ok(builder.load()?)
    }

    /// Default mount keys, falling back to the name key.
    pub fn default_mounts(&self) -> Vec<String> {
        self.mounts
            .clone()
            .unwrap_or_else(|| vec![self.name_key.clone()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;
    use std::sync::{Mutex, MutexGuard};

    // Tests that read or write the process environment run one at a time.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn clean_env() -> MutexGuard<'static, ()> {
        let guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        for var in ENV_VARS {
            env::remove_var(var);
        }
        guard
    }

    #[test]
    fn test_default_config() {
        let config = MetainerConfig::default();
        assert_eq!(config.name_key, "name");
        assert_eq!(config.mounts_key, "mounts");
        assert_eq!(config.hidden_key, "hidden");
        assert_eq!(config.default_mounts(), vec!["name"]);
    }

    #[test]
    fn test_default_mounts_follow_name_key() {
        let config = MetainerConfig {
            name_key: "label".to_string(),
            ..Default::default()
        };
        assert_eq!(config.default_mounts(), vec!["label"]);
    }

    #[test]
    fn test_default_mounts_custom() {
        let config = MetainerConfig {
            mounts: Some(vec!["name".to_string(), "alias".to_string()]),
            ..Default::default()
        };
        assert_eq!(config.default_mounts(), vec!["name", "alias"]);
    }

    #[test]
    fn test_shared_default_matches_default() {
        assert_eq!(**DEFAULT_CONFIG, MetainerConfig::default());
    }

    #[test]
    fn test_load_without_file_matches_default() {
        let _env = clean_env();
        let config = MetainerConfig::load(None).unwrap();
        assert_eq!(config, MetainerConfig::default());
        assert_eq!(config.name_key, DEFAULT_NAME_KEY);
        assert_eq!(config.mounts_key, DEFAULT_MOUNTS_KEY);
        assert_eq!(config.hidden_key, DEFAULT_HIDDEN_KEY);
    }

    #[test]
    fn test_env_overrides_file() {
        let _env = clean_env();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("metainer.toml");
        fs::write(&path, "name_key = \"label\"\nhidden_key = \"secret\"\n").unwrap();

        env::set_var("METAINER_NAME_KEY", "ident");
        let loaded = MetainerConfig::load(Some(&path));
        env::remove_var("METAINER_NAME_KEY");

        let config = loaded.unwrap();
        assert_eq!(config.name_key, "ident");
        assert_eq!(config.hidden_key, "secret");
        assert_eq!(config.mounts_key, DEFAULT_MOUNTS_KEY);
    }

    #[test]
    fn test_env_overrides_defaults() {
        let _env = clean_env();
        env::set_var("METAINER_MOUNTS_KEY", "targets");
        let loaded = MetainerConfig::load(None);
        env::remove_var("METAINER_MOUNTS_KEY");

        let config = loaded.unwrap();
        assert_eq!(config.mounts_key, "targets");
        assert_eq!(config.name_key, DEFAULT_NAME_KEY);
    }

    #[test]
    fn test_load_from_file() {
        let _env = clean_env();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("metainer.toml");
        fs::write(
            &path,
            "hidden_key = \"secret\"\nmounts = [\"name\", \"symbol\"]\n",
        )
        .unwrap();

        let config = MetainerConfig::load(Some(&path)).unwrap();
        assert_eq!(config.hidden_key, "secret");
        assert_eq!(config.mounts_key, "mounts");
        assert_eq!(config.default_mounts(), vec!["name", "symbol"]);
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let _env = clean_env();
        let dir = tempfile::tempdir().unwrap();
        let config = MetainerConfig::load(Some(&dir.path().join("absent.toml"))).unwrap();
        assert_eq!(config.hidden_key, "hidden");
        assert_eq!(config.mounts, None);
    }
}
