//! Home-relative path aliases (`~`, `~/...`).
//!
//! Project paths are stored aliased so a user's mappings survive a home
//! directory move; they are resolved against the home directory on use.

use std::path::{Path, PathBuf};

/// Expands a `~` alias against `user_home`. Other paths are returned as-is.
pub fn resolve_aliased_path(path: &str, user_home: &Path) -> PathBuf {
    if path == "~" {
        return user_home.to_path_buf();
    }
    if let Some(rest) = path.strip_prefix("~/") {
        return user_home.join(rest.trim_start_matches('/'));
    }
    PathBuf::from(path)
}

/// Rewrites a path under `user_home` as `~/...`. Other paths are unchanged.
pub fn create_aliased_path(path: &Path, user_home: &Path) -> String {
    match path.strip_prefix(user_home) {
        Ok(rest) if rest.as_os_str().is_empty() => "~".to_string(),
        Ok(rest) => format!("~/{}", rest.to_string_lossy()),
        Err(_) => path.to_string_lossy().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_tilde_alone_is_home() {
        assert_eq!(
            resolve_aliased_path("~", Path::new("/home/bob")),
            PathBuf::from("/home/bob")
        );
    }

    #[test]
    fn test_resolve_home_relative() {
        assert_eq!(
            resolve_aliased_path("~/projects/app", Path::new("/home/bob")),
            PathBuf::from("/home/bob/projects/app")
        );
    }

    #[test]
    fn test_resolve_absolute_unchanged() {
        assert_eq!(
            resolve_aliased_path("/srv/projects/app", Path::new("/home/bob")),
            PathBuf::from("/srv/projects/app")
        );
    }

    #[test]
    fn test_resolve_other_users_home_unchanged() {
        assert_eq!(
            resolve_aliased_path("~alice/app", Path::new("/home/bob")),
            PathBuf::from("~alice/app")
        );
    }

    #[test]
    fn test_create_alias_inside_home() {
        assert_eq!(
            create_aliased_path(Path::new("/home/bob/projects/app"), Path::new("/home/bob")),
            "~/projects/app"
        );
    }

    #[test]
    fn test_create_alias_for_home_itself() {
        assert_eq!(
            create_aliased_path(Path::new("/home/bob"), Path::new("/home/bob")),
            "~"
        );
    }

    #[test]
    fn test_create_alias_respects_component_boundaries() {
        assert_eq!(
            create_aliased_path(Path::new("/home/bobby/app"), Path::new("/home/bob")),
            "/home/bobby/app"
        );
    }

    #[test]
    fn test_alias_roundtrip() {
        let home = Path::new("/home/bob");
        let original = Path::new("/home/bob/code/my-project");
        let aliased = create_aliased_path(original, home);
        assert_eq!(resolve_aliased_path(&aliased, home), original);
    }
}
