//! Storage layout for session-scope data.
//!
//! Every path the file-backed collaborators read or write is derived here, so
//! tests can point the whole layout at a temp directory with
//! `StorageConfig::with_root()`.
//!
//! ```text
//! ~/.session-scope/
//! ├── config.toml
//! ├── logs/
//! ├── projects/
//! │   └── project-id-mappings.json
//! └── sessions/
//!     └── active/
//!         └── session-{id}/
//!             └── properties.json
//! ```

use std::path::{Path, PathBuf};

use crate::error::{Result, ScopeError};

/// Directory under the user's home that holds all session-scope data.
pub const DEFAULT_ROOT_DIR_NAME: &str = ".session-scope";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    root: PathBuf,
}

impl StorageConfig {
    /// Layout rooted at `<home>/.session-scope`.
    pub fn from_home(home: &Path) -> Self {
        Self {
            root: home.join(DEFAULT_ROOT_DIR_NAME),
        }
    }

    /// Layout rooted at the current user's home directory.
    pub fn for_current_user() -> Result<Self> {
        let home = dirs::home_dir().ok_or(ScopeError::HomeDirNotFound)?;
        Ok(Self::from_home(&home))
    }

    /// Layout rooted at an explicit directory. Used for testing with temp directories.
    pub fn with_root(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Root handed to the active-session registry.
    pub fn registry_root(&self) -> &Path {
        &self.root
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Files
    // ─────────────────────────────────────────────────────────────────────────────

    pub fn config_file(&self) -> PathBuf {
        self.root.join("config.toml")
    }

    /// Path to the project id ↔ project path map.
    pub fn project_id_map_file(&self) -> PathBuf {
        self.projects_dir().join("project-id-mappings.json")
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Directories
    // ─────────────────────────────────────────────────────────────────────────────

    pub fn logs_dir(&self) -> PathBuf {
        self.root.join("logs")
    }

    pub fn projects_dir(&self) -> PathBuf {
        self.root.join("projects")
    }

    /// Path to sessions/active/ (one directory per active session).
    pub fn active_sessions_dir(&self) -> PathBuf {
        self.root.join("sessions").join("active")
    }

    /// Path to a single active session's directory.
    /// Example: ~/.session-scope/sessions/active/session-a1b2c3d4/
    pub fn session_dir(&self, id: &str) -> PathBuf {
        self.active_sessions_dir().join(format!("session-{}", id))
    }

    /// Ensures the root directory and standard subdirectories exist.
    pub fn ensure_dirs(&self) -> std::io::Result<()> {
        fs_err::create_dir_all(&self.root)?;
        fs_err::create_dir_all(self.logs_dir())?;
        fs_err::create_dir_all(self.projects_dir())?;
        fs_err::create_dir_all(self.active_sessions_dir())?;
        Ok(())
    }
}
