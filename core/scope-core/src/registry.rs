//! Active-session registry.
//!
//! Each active session owns a directory under the registry root holding its
//! properties. Directory creation is the allocation step: `create_dir` fails
//! if another writer already took the id, so two concurrent creators never
//! end up sharing a session id. Properties are replaced atomically, so a
//! reader racing an update sees either the old or the new record.
//!
//! ```text
//! {root}/sessions/active/session-{id}/
//! └── properties.json    # { id, project, working_dir, label, created, last_used, running }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::{Result, ScopeError};
use crate::id::{ScopeIdGenerator, UniqueIdSource};
use crate::persist::atomic_write;
use crate::storage::StorageConfig;

const PROPERTIES_FILE: &str = "properties.json";
const SESSION_DIR_PREFIX: &str = "session-";

/// Persisted properties of one active session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveSessionRecord {
    pub id: String,
    /// Aliased project path, or empty when the session has no project.
    #[serde(default)]
    pub project: String,
    #[serde(default)]
    pub working_dir: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_used: Option<DateTime<Utc>>,
    #[serde(default)]
    pub running: bool,
}

impl ActiveSessionRecord {
    /// A record is usable for routing only once project, working directory
    /// and last-used time have all been written.
    pub fn has_required_properties(&self) -> bool {
        !self.project.is_empty() && !self.working_dir.is_empty() && self.last_used.is_some()
    }
}

/// Lookup of active sessions by scope id.
pub trait SessionRegistry {
    /// Returns None if no session is registered under `id` (not an error).
    fn get(&self, id: &str) -> Option<ActiveSessionRecord>;
}

impl<R: SessionRegistry + ?Sized> SessionRegistry for &R {
    fn get(&self, id: &str) -> Option<ActiveSessionRecord> {
        (**self).get(id)
    }
}

/// Registry stored as one directory per session under a registry root.
#[derive(Debug, Clone)]
pub struct FileSessionRegistry {
    storage: StorageConfig,
}

impl FileSessionRegistry {
    pub fn new(registry_root: &Path) -> Self {
        Self {
            storage: StorageConfig::with_root(registry_root.to_path_buf()),
        }
    }

    pub fn from_storage(storage: &StorageConfig) -> Self {
        Self::new(storage.registry_root())
    }

    /// Registers a new session with a freshly generated id.
    pub fn create<S: UniqueIdSource>(
        &self,
        project: &str,
        working_dir: &str,
        generator: &ScopeIdGenerator<S>,
    ) -> Result<ActiveSessionRecord> {
        let active_dir = self.storage.active_sessions_dir();
        fs_err::create_dir_all(&active_dir)
            .map_err(|e| ScopeError::io("creating active sessions directory", e))?;

        let mut taken = self.ids();
        for _ in 0..generator.max_attempts() {
            let id = generator.generate_unused(&taken)?;
            let dir = self.storage.session_dir(&id);
            match fs_err::create_dir(&dir) {
                Ok(()) => {
                    let now = Utc::now();
                    let record = ActiveSessionRecord {
                        id,
                        project: project.to_string(),
                        working_dir: working_dir.to_string(),
                        label: None,
                        created: Some(now),
                        last_used: Some(now),
                        running: false,
                    };
                    if let Err(e) = self.write(&record) {
                        if let Err(cleanup) = fs_err::remove_dir_all(&dir) {
                            warn!(
                                id = %record.id,
                                error = %cleanup,
                                "Failed to remove unwritten session directory"
                            );
                        }
                        return Err(e);
                    }
                    debug!(id = %record.id, project = %record.project, "Registered active session");
                    return Ok(record);
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    debug!(id = %id, "Session id claimed concurrently; drawing again");
                    taken.push(id);
                }
                Err(e) => return Err(ScopeError::io("creating session directory", e)),
            }
        }

        Err(ScopeError::IdSpaceExhausted {
            attempts: generator.max_attempts(),
        })
    }

    /// All readable sessions, most recently used first.
    pub fn list(&self) -> Vec<ActiveSessionRecord> {
        let mut records: Vec<ActiveSessionRecord> =
            self.ids().iter().filter_map(|id| self.get(id)).collect();
        records.sort_by(|a, b| b.last_used.cmp(&a.last_used));
        records
    }

    pub fn count(&self) -> usize {
        self.ids().len()
    }

    /// Removes a session. Returns false if it was not registered.
    pub fn remove(&self, id: &str) -> Result<bool> {
        let Some(dir) = self.session_dir(id) else {
            return Ok(false);
        };
        if !dir.exists() {
            return Ok(false);
        }
        fs_err::remove_dir_all(&dir).map_err(|e| ScopeError::io("removing session directory", e))?;
        debug!(id = %id, "Removed active session");
        Ok(true)
    }

    /// Refreshes a session's last-used time.
    pub fn touch(&self, id: &str) -> Result<ActiveSessionRecord> {
        self.update(id, |record| record.last_used = Some(Utc::now()))
    }

    pub fn set_running(&self, id: &str, running: bool) -> Result<ActiveSessionRecord> {
        self.update(id, |record| record.running = running)
    }

    pub fn set_label(&self, id: &str, label: Option<String>) -> Result<ActiveSessionRecord> {
        self.update(id, |record| record.label = label)
    }

    fn update<F>(&self, id: &str, change: F) -> Result<ActiveSessionRecord>
    where
        F: FnOnce(&mut ActiveSessionRecord),
    {
        let mut record = self
            .get(id)
            .ok_or_else(|| ScopeError::SessionNotFound(id.to_string()))?;
        change(&mut record);
        self.write(&record)?;
        Ok(record)
    }

    fn write(&self, record: &ActiveSessionRecord) -> Result<()> {
        let dir = self
            .session_dir(&record.id)
            .ok_or_else(|| ScopeError::SessionNotFound(record.id.clone()))?;
        let content = serde_json::to_string_pretty(record)
            .map_err(|e| ScopeError::json("serializing session properties", e))?;
        atomic_write(&dir.join(PROPERTIES_FILE), &content)
    }

    /// Session directory for `id`, or None if `id` cannot be a directory name.
    fn session_dir(&self, id: &str) -> Option<PathBuf> {
        let safe = !id.is_empty() && id != "." && id != ".." && !id.contains(['/', '\\']);
        safe.then(|| self.storage.session_dir(id))
    }

    fn ids(&self) -> Vec<String> {
        WalkDir::new(self.storage.active_sessions_dir())
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_dir())
            .filter_map(|e| {
                e.file_name()
                    .to_str()
                    .and_then(|name| name.strip_prefix(SESSION_DIR_PREFIX))
                    .map(|id| id.to_string())
            })
            .collect()
    }
}

impl SessionRegistry for FileSessionRegistry {
    fn get(&self, id: &str) -> Option<ActiveSessionRecord> {
        let path = self.session_dir(id)?.join(PROPERTIES_FILE);
        let content = match fs_err::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return None,
            Err(e) => {
                warn!(id = %id, error = %e, "Failed to read session properties");
                return None;
            }
        };
        match serde_json::from_str(&content) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(id = %id, error = %e, "Malformed session properties");
                None
            }
        }
    }
}
