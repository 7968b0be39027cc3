//! Configuration loading.
//!
//! Config is an optional TOML file (default `~/.session-scope/config.toml`).
//! A missing file yields defaults; a malformed one is an error.
//!
//! ```toml
//! root = "~/.session-scope"
//! descriptor_extension = "proj"
//! max_id_attempts = 64
//! log_to_file = false
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::alias::resolve_aliased_path;
use crate::descriptor::DEFAULT_DESCRIPTOR_EXTENSION;
use crate::error::{Result, ScopeError};
use crate::id::DEFAULT_MAX_ID_ATTEMPTS;
use crate::storage::StorageConfig;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScopeConfig {
    /// Storage root; `~` is expanded. Defaults to `~/.session-scope`.
    pub root: Option<String>,
    pub descriptor_extension: String,
    pub max_id_attempts: u32,
    /// Also write logs under `<root>/logs/`.
    pub log_to_file: bool,
}

impl Default for ScopeConfig {
    fn default() -> Self {
        Self {
            root: None,
            descriptor_extension: DEFAULT_DESCRIPTOR_EXTENSION.to_string(),
            max_id_attempts: DEFAULT_MAX_ID_ATTEMPTS,
            log_to_file: false,
        }
    }
}

impl ScopeConfig {
    /// Storage layout this config points at, resolving `~` against `user_home`.
    pub fn storage(&self, user_home: &Path) -> StorageConfig {
        match self.root.as_deref() {
            Some(root) if !root.trim().is_empty() => {
                StorageConfig::with_root(resolve_aliased_path(root.trim(), user_home))
            }
            _ => StorageConfig::from_home(user_home),
        }
    }
}

pub fn default_config_path() -> Result<PathBuf> {
    Ok(StorageConfig::for_current_user()?.config_file())
}

/// Loads config from `path`, or from the default location when `None`.
pub fn load_scope_config(path: Option<PathBuf>) -> Result<ScopeConfig> {
    let config_path = match path {
        Some(path) => path,
        None => default_config_path()?,
    };

    if !config_path.exists() {
        return Ok(ScopeConfig::default());
    }

    let content = fs_err::read_to_string(&config_path)
        .map_err(|e| ScopeError::io(format!("reading config {}", config_path.display()), e))?;
    toml::from_str::<ScopeConfig>(&content).map_err(|e| ScopeError::ConfigMalformed {
        path: config_path,
        details: e.to_string(),
    })
}
