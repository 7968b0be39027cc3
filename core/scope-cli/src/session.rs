//! `session` subcommands: manage the active-session registry.

use clap::Subcommand;
use scope_core::{
    create_aliased_path, url_path_for_session_scope, ScopeError, SessionRegistry, SessionScope,
};
use std::path::Path;

use crate::env::ScopeEnv;

#[derive(Subcommand)]
pub enum SessionAction {
    /// Register a new session for a project directory (prints JSON)
    Create {
        #[arg(value_name = "PROJECT_PATH")]
        project_path: String,
        /// Working directory (default: the project directory)
        #[arg(long)]
        working_dir: Option<String>,
        #[arg(long)]
        label: Option<String>,
    },
    /// List active sessions, most recently used first (prints JSON)
    List,
    /// Show one session (prints JSON)
    Show { id: String },
    /// Refresh a session's last-used time
    Touch { id: String },
    /// Unregister a session
    Remove { id: String },
}

pub fn run(env: &ScopeEnv, action: SessionAction) -> scope_core::Result<String> {
    let registry = env.registry();
    match action {
        SessionAction::Create {
            project_path,
            working_dir,
            label,
        } => {
            let project = create_aliased_path(Path::new(&project_path), env.home());
            let working_dir = working_dir
                .map(|dir| create_aliased_path(Path::new(&dir), env.home()))
                .unwrap_or_else(|| project.clone());

            let token = env.project_ids().project_id_for_path(&project_path)?;
            let mut record = registry.create(&project, &working_dir, &env.generator())?;
            if label.is_some() {
                record = registry.set_label(&record.id, label)?;
            }

            let scope = SessionScope::from_project_id(&token, &record.id);
            tracing::info!(id = %record.id, project = %project, "Session created");
            Ok(serde_json::json!({
                "id": record.id,
                "project_id": token,
                "project": record.project,
                "url_path": url_path_for_session_scope(&scope),
            })
            .to_string())
        }
        SessionAction::List => to_json(&registry.list()),
        SessionAction::Show { id } => {
            let record = registry
                .get(&id)
                .ok_or(ScopeError::SessionNotFound(id))?;
            to_json(&record)
        }
        SessionAction::Touch { id } => {
            registry.touch(&id)?;
            Ok(String::new())
        }
        SessionAction::Remove { id } => {
            if !registry.remove(&id)? {
                return Err(ScopeError::SessionNotFound(id));
            }
            Ok(String::new())
        }
    }
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> scope_core::Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| ScopeError::Json {
        context: "rendering output".to_string(),
        source: e,
    })
}
