//! Project id store: the default project path ↔ project token mapping.
//!
//! Tokens are 8 lowercase hex characters so project scopes survive the URL
//! form. A token is the MD5 prefix of the aliased project path; if that
//! prefix is reserved or already belongs to another path, a generated scope
//! id is used instead. Paths are stored aliased (`~/...`) so the map stays
//! valid if the home directory moves.
//!
//! Assignments hold a lock on the map for the whole read-modify-write and
//! replace the file atomically, so concurrent callers never lose or corrupt
//! each other's tokens.
//!
//! The file is a JSON object keyed by token:
//!
//! ```json
//! { "projects": { "3f2a9c1e": "~/code/app" } }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::alias::create_aliased_path;
use crate::error::{Result, ScopeError};
use crate::id::{ScopeIdGenerator, SCOPE_ID_LEN};
use crate::persist::{atomic_write, DirLock};
use crate::scope::reserved_scope_ids;
use crate::storage::StorageConfig;

#[derive(Debug, Default, Serialize, Deserialize)]
struct ProjectIdMap {
    #[serde(default)]
    projects: BTreeMap<String, String>,
}

impl ProjectIdMap {
    fn id_for(&self, aliased: &str) -> Option<&String> {
        self.projects
            .iter()
            .find(|(_, path)| path.as_str() == aliased)
            .map(|(id, _)| id)
    }
}

#[derive(Debug, Clone)]
pub struct ProjectIdStore {
    map_file: PathBuf,
    user_home: PathBuf,
    generator: ScopeIdGenerator,
}

impl ProjectIdStore {
    pub fn new(storage: &StorageConfig, user_home: &Path) -> Self {
        Self::with_map_file(storage.project_id_map_file(), user_home)
    }

    pub fn with_map_file(map_file: PathBuf, user_home: &Path) -> Self {
        Self {
            map_file,
            user_home: user_home.to_path_buf(),
            generator: ScopeIdGenerator::default(),
        }
    }

    pub fn map_file(&self) -> &Path {
        &self.map_file
    }

    /// Returns the token for `path`, assigning and persisting one if needed.
    pub fn project_id_for_path(&self, path: &str) -> Result<String> {
        let aliased = self.alias(path);
        if let Some(id) = self.load()?.id_for(&aliased) {
            return Ok(id.clone());
        }

        let _lock = self.lock()?;
        let mut map = self.load()?;
        if let Some(id) = map.id_for(&aliased) {
            return Ok(id.clone());
        }

        let digest = format!("{:x}", md5::compute(aliased.as_bytes()));
        let mut id = digest[..SCOPE_ID_LEN].to_string();
        if reserved_scope_ids().contains(&id.as_str()) || map.projects.contains_key(&id) {
            let taken: Vec<&str> = map.projects.keys().map(|k| k.as_str()).collect();
            id = self.generator.generate_unused(&taken)?;
        }

        debug!(id = %id, path = %aliased, "Assigned project id");
        map.projects.insert(id.clone(), aliased);
        self.save(&map)?;
        Ok(id)
    }

    /// Token already assigned to `path`, if any. Never writes.
    pub fn lookup_id(&self, path: &str) -> Option<String> {
        let aliased = self.alias(path);
        self.load_or_warn().id_for(&aliased).cloned()
    }

    /// Aliased project path for `id`, if any.
    pub fn lookup_path(&self, id: &str) -> Option<String> {
        self.load_or_warn().projects.remove(id)
    }

    /// Forgets a token. Returns false if it was not mapped.
    pub fn remove(&self, id: &str) -> Result<bool> {
        let _lock = self.lock()?;
        let mut map = self.load()?;
        if map.projects.remove(id).is_none() {
            return Ok(false);
        }
        self.save(&map)?;
        Ok(true)
    }

    /// Infallible path → token adapter for [`SessionScope::from_project`](crate::SessionScope::from_project).
    /// Yields an empty token if the map cannot be read or written.
    pub fn file_path_to_project_id(&self, path: &str) -> String {
        self.project_id_for_path(path).unwrap_or_else(|e| {
            warn!(path = %path, error = %e, "Failed to map project path to id");
            String::new()
        })
    }

    /// Infallible token → path adapter for scope validation.
    /// Yields an empty path for unknown tokens.
    pub fn project_id_to_file_path(&self, id: &str) -> String {
        self.lookup_path(id).unwrap_or_default()
    }

    fn alias(&self, path: &str) -> String {
        let trimmed = match path.trim_end_matches('/') {
            "" if path.starts_with('/') => "/",
            trimmed => trimmed,
        };
        if trimmed.starts_with('~') {
            return trimmed.to_string();
        }
        create_aliased_path(Path::new(trimmed), &self.user_home)
    }

    fn load(&self) -> Result<ProjectIdMap> {
        let content = match fs_err::read_to_string(&self.map_file) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(ProjectIdMap::default()),
            Err(e) => return Err(ScopeError::io("reading project id map", e)),
        };
        serde_json::from_str(&content).map_err(|e| ScopeError::json("parsing project id map", e))
    }

    fn load_or_warn(&self) -> ProjectIdMap {
        self.load().unwrap_or_else(|e| {
            warn!(error = %e, "Failed to load project id map");
            ProjectIdMap::default()
        })
    }

    /// Serializes read-modify-write cycles across threads and processes.
    fn lock(&self) -> Result<DirLock> {
        if let Some(parent) = self.map_file.parent() {
            fs_err::create_dir_all(parent)
                .map_err(|e| ScopeError::io("creating project id map directory", e))?;
        }
        DirLock::acquire(&self.map_file)
    }

    fn save(&self, map: &ProjectIdMap) -> Result<()> {
        if let Some(parent) = self.map_file.parent() {
            fs_err::create_dir_all(parent)
                .map_err(|e| ScopeError::io("creating project id map directory", e))?;
        }
        let content = serde_json::to_string_pretty(map)
            .map_err(|e| ScopeError::json("serializing project id map", e))?;
        atomic_write(&self.map_file, &content)
    }
}
