//! `project-id` and `validate` subcommands.

use scope_core::SessionScope;

use crate::env::ScopeEnv;

pub fn project_id(env: &ScopeEnv, path: &str) -> scope_core::Result<String> {
    env.project_ids().project_id_for_path(path)
}

/// Prints the descriptor path of a valid scope; fails with the rejection reason otherwise.
pub fn run(env: &ScopeEnv, project: &str, id: &str) -> scope_core::Result<String> {
    let scope = SessionScope::from_project_id(project, id);
    let ids = env.project_ids();
    let descriptor = env
        .validator()
        .resolve(&scope, |token| ids.project_id_to_file_path(token))?;
    Ok(descriptor.to_string_lossy().to_string())
}
