//! End-to-end routing: project path → scope → URL → scope → validated project.

use scope_core::{
    create_session_url, parse_session_url, session_context_file, session_scope_file,
    session_scopes_prefix, url_path_for_session_scope, validate_project_session_scope,
    FileSessionRegistry, ProjectIdStore, ScopeIdGenerator, ScopeValidator, SessionContext,
    SessionScope, StorageConfig, PROJECT_NONE_INPUT,
};
use std::fs;
use tempfile::TempDir;

struct Fixture {
    home: TempDir,
    storage: StorageConfig,
}

impl Fixture {
    /// Home with `~/code/app/app.proj` and storage under `~/.session-scope`.
    fn new() -> Self {
        let home = TempDir::new().unwrap();
        let project = home.path().join("code").join("app");
        fs::create_dir_all(&project).unwrap();
        fs::write(project.join("app.proj"), "").unwrap();

        let storage = StorageConfig::from_home(home.path());
        storage.ensure_dirs().unwrap();
        Self { home, storage }
    }

    fn project_dir(&self) -> String {
        self.home.path().join("code").join("app").to_string_lossy().to_string()
    }

    fn ids(&self) -> ProjectIdStore {
        ProjectIdStore::new(&self.storage, self.home.path())
    }

    fn registry(&self) -> FileSessionRegistry {
        FileSessionRegistry::from_storage(&self.storage)
    }
}

#[test]
fn test_request_routes_to_registered_project_session() {
    let fx = Fixture::new();
    let ids = fx.ids();
    let session = fx
        .registry()
        .create("~/code/app", "~/code/app", &ScopeIdGenerator::default())
        .unwrap();

    let scope = SessionScope::from_project(&fx.project_dir(), &session.id, |p| {
        ids.file_path_to_project_id(p)
    });
    let url = create_session_url("http://localhost:8787/index.html", &scope);

    let parsed = parse_session_url(&format!("{}files/data.csv", url));
    assert_eq!(parsed.scope, scope);
    assert_eq!(parsed.url_without_prefix, "http://localhost:8787/files/data.csv");

    let descriptor = validate_project_session_scope(
        &parsed.scope,
        fx.home.path(),
        fx.storage.registry_root(),
        |id| ids.project_id_to_file_path(id),
    )
    .expect("scope should validate");
    assert!(descriptor.ends_with("code/app/app.proj"));

    let context = SessionContext::new("bob", parsed.scope);
    assert_eq!(
        session_context_file(&context),
        format!("bob-ds/{}/{}", scope.project(), session.id)
    );
}

#[test]
fn test_removed_session_no_longer_validates() {
    let fx = Fixture::new();
    let ids = fx.ids();
    let registry = fx.registry();
    let session = registry
        .create("~/code/app", "~/code/app", &ScopeIdGenerator::default())
        .unwrap();
    let scope = SessionScope::from_project(&fx.project_dir(), &session.id, |p| {
        ids.file_path_to_project_id(p)
    });

    let validator = ScopeValidator::new(fx.home.path(), &registry);
    assert!(validator.validate(&scope, |id| ids.project_id_to_file_path(id)).is_some());

    registry.remove(&session.id).unwrap();
    assert!(validator.validate(&scope, |id| ids.project_id_to_file_path(id)).is_none());
}

#[test]
fn test_deleted_project_directory_fails_validation() {
    let fx = Fixture::new();
    let ids = fx.ids();
    let session = fx
        .registry()
        .create("~/code/app", "~/code/app", &ScopeIdGenerator::default())
        .unwrap();
    let scope = SessionScope::from_project(&fx.project_dir(), &session.id, |p| {
        ids.file_path_to_project_id(p)
    });

    fs::remove_dir_all(fx.home.path().join("code").join("app")).unwrap();

    assert!(validate_project_session_scope(
        &scope,
        fx.home.path(),
        fx.storage.registry_root(),
        |id| ids.project_id_to_file_path(id),
    )
    .is_none());
}

#[test]
fn test_project_none_scope_never_validates_as_project() {
    let fx = Fixture::new();
    let ids = fx.ids();
    let scope = SessionScope::from_project(PROJECT_NONE_INPUT, "a1b2c3d4", |p| {
        ids.file_path_to_project_id(p)
    });

    assert!(scope.is_project_none());
    assert!(validate_project_session_scope(
        &scope,
        fx.home.path(),
        fx.storage.registry_root(),
        |id| ids.project_id_to_file_path(id),
    )
    .is_none());
    assert_eq!(url_path_for_session_scope(&scope), "/s/cfc78a6aa1b2c3d4/");
}

#[test]
fn test_documented_examples() {
    assert_eq!(
        session_scope_file("bob-d", &SessionScope::from_project_id("proj1", "a1b2c3d4")),
        "bob-ds/proj1/a1b2c3d4"
    );
    assert_eq!(session_scope_file("bob-d", &SessionScope::default()), "bob-d");
    assert_eq!(
        url_path_for_session_scope(&SessionScope::from_project_id("proj1", "a1b2c3d4")),
        "/s/proj1a1b2c3d4/"
    );

    let parsed = parse_session_url("http://host/s/deadbeefa1b2c3d4/app");
    assert_eq!(parsed.scope.project(), "deadbeef");
    assert_eq!(parsed.scope.id(), "a1b2c3d4");
    assert_eq!(parsed.prefix, "/s/deadbeefa1b2c3d4/");
    assert_eq!(parsed.url_without_prefix, "http://host/app");
}

#[test]
fn test_directory_schema_prefix_is_distinct() {
    let scope = SessionScope::from_project_id("deadbeef", "a1b2c3d4");
    let dir_name = session_scope_file(&session_scopes_prefix("bob"), &scope);
    let file_name = session_context_file(&SessionContext::new("bob", scope));
    assert_eq!(dir_name, "bob-dss/deadbeef/a1b2c3d4");
    assert_ne!(dir_name, file_name);
}
