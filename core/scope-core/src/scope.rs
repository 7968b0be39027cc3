//! The session scope value type.
//!
//! A scope pairs a project token with a session id. Both halves are opaque
//! strings; the only tokens with meaning here are the reserved sentinels below.
//! Mapping between project directories and project tokens is always supplied
//! by the caller, so this module stays storage-agnostic.

use serde::{Deserialize, Serialize};

/// Project token meaning "this session has no project open".
/// Distinct from the empty project token, which means "unscoped".
pub const PROJECT_NONE_ID: &str = "cfc78a6a";

/// Project token reserved for the workspaces view.
pub const WORKSPACES_ID: &str = "3c286bd3";

/// Input literal accepted by [`SessionScope::from_project`] in place of a path.
pub const PROJECT_NONE_INPUT: &str = "none";

/// Tokens that carry routing meaning and can never be a generated session id.
pub fn reserved_scope_ids() -> [&'static str; 2] {
    [PROJECT_NONE_ID, WORKSPACES_ID]
}

/// Identifies a (project, session) pair for routing and storage.
///
/// An empty `project` means unscoped; an empty `id` means every session of
/// the project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionScope {
    project: String,
    id: String,
}

impl SessionScope {
    /// Builds a scope from a project directory (or [`PROJECT_NONE_INPUT`]).
    ///
    /// `file_path_to_project_id` maps the directory to its project token.
    pub fn from_project<F>(project: &str, id: &str, file_path_to_project_id: F) -> Self
    where
        F: Fn(&str) -> String,
    {
        if project == PROJECT_NONE_INPUT {
            return Self::project_none(id);
        }
        Self::new(file_path_to_project_id(project), id.to_string())
    }

    /// Builds a scope from an already-mapped project token.
    pub fn from_project_id(project: &str, id: &str) -> Self {
        Self::new(project.to_string(), id.to_string())
    }

    /// Builds a scope for a session without a project.
    pub fn project_none(id: &str) -> Self {
        Self::new(PROJECT_NONE_ID.to_string(), id.to_string())
    }

    /// Maps the scope's project token back to a project directory.
    pub fn project_path_for_scope<F>(scope: &SessionScope, project_id_to_file_path: F) -> String
    where
        F: Fn(&str) -> String,
    {
        project_id_to_file_path(scope.project())
    }

    fn new(project: String, id: String) -> Self {
        Self { project, id }
    }

    pub fn project(&self) -> &str {
        &self.project
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn is_project_none(&self) -> bool {
        self.project == PROJECT_NONE_ID
    }

    pub fn has_project(&self) -> bool {
        !self.project.is_empty()
    }

    pub fn has_id(&self) -> bool {
        !self.id.is_empty()
    }

    /// True for the default scope (no project token, no session id).
    pub fn is_empty(&self) -> bool {
        !self.has_project() && !self.has_id()
    }
}
