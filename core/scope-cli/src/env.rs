//! Resolved runtime environment: home directory, config, and storage layout.

use std::path::{Path, PathBuf};

use scope_core::{
    load_scope_config, FileSessionRegistry, ProjectIdStore, ScopeConfig, ScopeError,
    ScopeIdGenerator, ScopeValidator, StorageConfig,
};

pub struct ScopeEnv {
    pub home: PathBuf,
    pub config: ScopeConfig,
    pub storage: StorageConfig,
}

impl ScopeEnv {
    /// Loads config and resolves storage. `--root` beats the config file's `root`.
    pub fn load(config_path: Option<PathBuf>, root: Option<PathBuf>) -> scope_core::Result<Self> {
        let home = dirs::home_dir().ok_or(ScopeError::HomeDirNotFound)?;
        let config_path = config_path.unwrap_or_else(|| match &root {
            Some(root) => StorageConfig::with_root(root.clone()).config_file(),
            None => StorageConfig::from_home(&home).config_file(),
        });
        let config = load_scope_config(Some(config_path))?;
        Ok(Self::new(home, config, root))
    }

    pub fn new(home: PathBuf, config: ScopeConfig, root: Option<PathBuf>) -> Self {
        let storage = match root {
            Some(root) => StorageConfig::with_root(root),
            None => config.storage(&home),
        };
        Self {
            home,
            config,
            storage,
        }
    }

    pub fn log_dir(&self) -> Option<PathBuf> {
        self.config.log_to_file.then(|| self.storage.logs_dir())
    }

    pub fn home(&self) -> &Path {
        &self.home
    }

    pub fn generator(&self) -> ScopeIdGenerator {
        ScopeIdGenerator::default().with_max_attempts(self.config.max_id_attempts)
    }

    pub fn registry(&self) -> FileSessionRegistry {
        FileSessionRegistry::from_storage(&self.storage)
    }

    pub fn project_ids(&self) -> ProjectIdStore {
        ProjectIdStore::new(&self.storage, &self.home)
    }

    pub fn validator(&self) -> ScopeValidator<FileSessionRegistry> {
        ScopeValidator::new(&self.home, self.registry())
            .with_descriptor_extension(self.config.descriptor_extension.clone())
    }
}

#[cfg(test)]
pub mod test_utils {
    use super::*;
    use tempfile::TempDir;

    /// Environment with a temp home and storage at `<home>/.session-scope`.
    pub fn temp_env() -> (TempDir, ScopeEnv) {
        let home = TempDir::new().unwrap();
        let env = ScopeEnv::new(home.path().to_path_buf(), ScopeConfig::default(), None);
        (home, env)
    }
}
