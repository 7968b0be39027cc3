//! Scope validation against on-disk project and session state.
//!
//! A project scope is valid when, in order:
//!
//! 1. its project token maps back to a project path,
//! 2. that path (after `~` expansion) is an existing directory,
//! 3. the directory contains a project descriptor, and
//! 4. the session id has a complete record in the active-session registry.
//!
//! The first failing step decides the outcome and later steps are not run.

use std::path::{Path, PathBuf};
use tracing::debug;

use crate::alias::resolve_aliased_path;
use crate::descriptor::{find_project_descriptor, DEFAULT_DESCRIPTOR_EXTENSION};
use crate::error::{Result, ScopeError};
use crate::registry::{FileSessionRegistry, SessionRegistry};
use crate::scope::SessionScope;

/// True if `id` has a complete record in the registry rooted at `registry_root`.
pub fn validate_session_scope_id(registry_root: &Path, id: &str) -> bool {
    validate_session_scope_id_in(&FileSessionRegistry::new(registry_root), id)
}

/// True if `id` has a complete record in `registry`.
pub fn validate_session_scope_id_in<R: SessionRegistry>(registry: &R, id: &str) -> bool {
    check_session_id(registry, id).is_ok()
}

/// Validates a project scope and returns the absolute path of its project
/// descriptor, or `None` if any step fails.
pub fn validate_project_session_scope<F>(
    scope: &SessionScope,
    user_home: &Path,
    registry_root: &Path,
    project_id_to_file_path: F,
) -> Option<PathBuf>
where
    F: Fn(&str) -> String,
{
    ScopeValidator::new(user_home, FileSessionRegistry::new(registry_root))
        .validate(scope, project_id_to_file_path)
}

fn check_session_id<R: SessionRegistry>(registry: &R, id: &str) -> Result<()> {
    let record = registry
        .get(id)
        .ok_or_else(|| ScopeError::SessionNotFound(id.to_string()))?;
    if !record.has_required_properties() {
        return Err(ScopeError::SessionIncomplete(id.to_string()));
    }
    Ok(())
}

/// Validates scopes for one user against one registry.
#[derive(Debug, Clone)]
pub struct ScopeValidator<R> {
    user_home: PathBuf,
    registry: R,
    descriptor_extension: String,
}

impl<R: SessionRegistry> ScopeValidator<R> {
    pub fn new(user_home: &Path, registry: R) -> Self {
        Self {
            user_home: user_home.to_path_buf(),
            registry,
            descriptor_extension: DEFAULT_DESCRIPTOR_EXTENSION.to_string(),
        }
    }

    pub fn with_descriptor_extension(mut self, extension: impl Into<String>) -> Self {
        self.descriptor_extension = extension.into();
        self
    }

    /// Runs the validation chain, reporting which step rejected the scope.
    pub fn resolve<F>(&self, scope: &SessionScope, project_id_to_file_path: F) -> Result<PathBuf>
    where
        F: Fn(&str) -> String,
    {
        let project = SessionScope::project_path_for_scope(scope, project_id_to_file_path);
        if project.is_empty() {
            return Err(ScopeError::ProjectNotFound(scope.project().to_string()));
        }

        let project_dir = resolve_aliased_path(&project, &self.user_home);
        if !project_dir.is_dir() {
            return Err(ScopeError::ProjectDirNotFound(project_dir));
        }

        let descriptor = find_project_descriptor(&project_dir, &self.descriptor_extension)
            .ok_or_else(|| ScopeError::DescriptorNotFound(project_dir.clone()))?;

        check_session_id(&self.registry, scope.id())?;

        Ok(std::fs::canonicalize(&descriptor).unwrap_or(descriptor))
    }

    /// Like [`resolve`](Self::resolve), collapsing the rejection reason into
    /// `None`. The reason is logged at debug level.
    pub fn validate<F>(&self, scope: &SessionScope, project_id_to_file_path: F) -> Option<PathBuf>
    where
        F: Fn(&str) -> String,
    {
        match self.resolve(scope, project_id_to_file_path) {
            Ok(path) => Some(path),
            Err(err) => {
                debug!(
                    project = %scope.project(),
                    id = %scope.id(),
                    reason = %err,
                    "Session scope rejected"
                );
                None
            }
        }
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }
}
