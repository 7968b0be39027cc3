//! Project descriptor lookup.
//!
//! A project directory is recognised by a descriptor file directly inside it.
//! The canonical descriptor is named after the directory
//! (`~/code/app/app.proj`); any other file with the descriptor extension is
//! accepted as a fallback.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Extension of project descriptor files, without the leading dot.
pub const DEFAULT_DESCRIPTOR_EXTENSION: &str = "proj";

/// Finds the project descriptor in `dir`.
///
/// Returns `None` if `dir` has no file with `extension`. When several
/// non-canonical candidates exist the first by file name wins.
pub fn find_project_descriptor(dir: &Path, extension: &str) -> Option<PathBuf> {
    let extension = extension.trim_start_matches('.');

    if let Some(name) = dir.file_name().and_then(|n| n.to_str()) {
        let canonical = dir.join(format!("{}.{}", name, extension));
        if canonical.is_file() {
            return Some(canonical);
        }
    }

    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_file())
        .find(|e| e.path().extension().and_then(|x| x.to_str()) == Some(extension))
        .map(|e| e.into_path())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_canonical_descriptor_wins() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("app");
        fs::create_dir(&dir).unwrap();
        fs::write(dir.join("aaa.proj"), "").unwrap();
        fs::write(dir.join("app.proj"), "").unwrap();

        assert_eq!(
            find_project_descriptor(&dir, DEFAULT_DESCRIPTOR_EXTENSION),
            Some(dir.join("app.proj"))
        );
    }

    #[test]
    fn test_falls_back_to_first_matching_file() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("app");
        fs::create_dir(&dir).unwrap();
        fs::write(dir.join("zeta.proj"), "").unwrap();
        fs::write(dir.join("beta.proj"), "").unwrap();
        fs::write(dir.join("alpha.txt"), "").unwrap();

        assert_eq!(
            find_project_descriptor(&dir, "proj"),
            Some(dir.join("beta.proj"))
        );
    }

    #[test]
    fn test_ignores_nested_descriptors() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("app");
        fs::create_dir_all(dir.join("sub")).unwrap();
        fs::write(dir.join("sub").join("sub.proj"), "").unwrap();

        assert_eq!(find_project_descriptor(&dir, "proj"), None);
    }

    #[test]
    fn test_ignores_directories_with_extension() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("app");
        fs::create_dir_all(dir.join("app.proj")).unwrap();

        assert_eq!(find_project_descriptor(&dir, "proj"), None);
    }

    #[test]
    fn test_leading_dot_in_extension_is_accepted() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("app");
        fs::create_dir(&dir).unwrap();
        fs::write(dir.join("app.proj"), "").unwrap();

        assert_eq!(
            find_project_descriptor(&dir, ".proj"),
            Some(dir.join("app.proj"))
        );
    }

    #[test]
    fn test_missing_directory() {
        assert_eq!(
            find_project_descriptor(Path::new("/definitely/not/a/real/project"), "proj"),
            None
        );
    }
}
