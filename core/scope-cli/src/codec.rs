//! Scope id and codec subcommands. Pure apart from id generation.

use scope_core::{
    create_session_url, parse_session_url, session_scope_file, session_scope_prefix,
    session_scopes_prefix, url_path_for_session_scope, SessionScope,
};

use crate::env::ScopeEnv;

pub fn generate_id(env: &ScopeEnv, reserved: &[String]) -> scope_core::Result<String> {
    env.generator().generate_unused(reserved)
}

pub fn url_path(project: &str, id: &str) -> String {
    url_path_for_session_scope(&SessionScope::from_project_id(project, id))
}

/// JSON rendering of [`parse_session_url`], for scripts.
pub fn parse_url(url: &str) -> String {
    let parsed = parse_session_url(url);
    serde_json::json!({
        "project": parsed.scope.project(),
        "id": parsed.scope.id(),
        "prefix": parsed.prefix,
        "url_without_prefix": parsed.url_without_prefix,
    })
    .to_string()
}

pub fn session_url(host_url: &str, project: &str, id: &str) -> String {
    create_session_url(host_url, &SessionScope::from_project_id(project, id))
}

pub fn file_name(username: &str, project: &str, id: &str, dirs: bool) -> String {
    let prefix = if dirs {
        session_scopes_prefix(username)
    } else {
        session_scope_prefix(username)
    };
    session_scope_file(&prefix, &SessionScope::from_project_id(project, id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::test_utils::temp_env;

    #[test]
    fn test_generate_id_avoids_extra_reserved() {
        let (_home, env) = temp_env();
        let id = generate_id(&env, &["deadbeef".to_string()]).unwrap();
        assert_eq!(id.len(), 8);
        assert_ne!(id, "deadbeef");
    }

    #[test]
    fn test_parse_url_json() {
        let json: serde_json::Value =
            serde_json::from_str(&parse_url("http://host/s/deadbeefa1b2c3d4/app")).unwrap();
        assert_eq!(json["project"], "deadbeef");
        assert_eq!(json["id"], "a1b2c3d4");
        assert_eq!(json["prefix"], "/s/deadbeefa1b2c3d4/");
        assert_eq!(json["url_without_prefix"], "http://host/app");
    }

    #[test]
    fn test_parse_url_json_without_scope() {
        let json: serde_json::Value = serde_json::from_str(&parse_url("http://host/app")).unwrap();
        assert_eq!(json["project"], "");
        assert_eq!(json["prefix"], "");
        assert_eq!(json["url_without_prefix"], "http://host/app");
    }

    #[test]
    fn test_url_commands() {
        assert_eq!(url_path("deadbeef", "a1b2c3d4"), "/s/deadbeefa1b2c3d4/");
        assert_eq!(
            session_url("http://host/s/00000000ffffffff/x", "deadbeef", "a1b2c3d4"),
            "http://host/s/deadbeefa1b2c3d4/"
        );
    }

    #[test]
    fn test_file_name_prefixes() {
        assert_eq!(file_name("bob", "", "", false), "bob-d");
        assert_eq!(file_name("bob", "proj1", "a1b2c3d4", false), "bob-ds/proj1/a1b2c3d4");
        assert_eq!(file_name("bob", "", "", true), "bob-ds");
    }
}
