//! File-name form of a session scope.
//!
//! ```text
//! bob-d                      unscoped, single-session
//! bob-da1b2c3d4              unscoped, one session id
//! bob-ds/deadbeef            project scope, all sessions
//! bob-ds/deadbeef/a1b2c3d4   project scope, one session
//! ```
//!
//! Project-scoped names get a pluralised prefix so they can never collide
//! with the single-session names of the same user.

use crate::context::SessionContext;
use crate::scope::SessionScope;

/// Suffix marking the session-scope file family for a user.
const SESSION_SUFFIX: &str = "-d";

/// Name for a scope's state under `prefix`.
pub fn session_scope_file(prefix: &str, scope: &SessionScope) -> String {
    let mut name = prefix.to_string();

    if scope.has_project() {
        name.push('s');

        let project = scope.project();
        if !project.starts_with('/') {
            name.push('/');
        }
        name.push_str(project);

        if scope.has_id() && !project.ends_with('/') {
            name.push('/');
        }
    }

    name.push_str(scope.id());
    name
}

/// Prefix for a user's single-file session state.
pub fn session_scope_prefix(username: &str) -> String {
    format!("{}{}", username, SESSION_SUFFIX)
}

/// Prefix for a user's directory-based session state.
/// Pluralised so it never collides with [`session_scope_prefix`].
pub fn session_scopes_prefix(username: &str) -> String {
    format!("{}{}s", username, SESSION_SUFFIX)
}

/// Name for a session context's state.
pub fn session_context_file(context: &SessionContext) -> String {
    session_scope_file(&session_scope_prefix(&context.username), &context.scope)
}
