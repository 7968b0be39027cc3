//! # scope-core
//!
//! Session scope model for multi-project, multi-session hosting: which
//! user/project/session triple a request or a piece of on-disk state belongs to.
//!
//! ## Design Principles
//!
//! - **Synchronous**: No async runtime dependency. Clients can wrap with async if needed.
//! - **Injected lookups**: Project path ↔ token mapping is passed in as closures,
//!   so the scope model never touches storage on its own.
//! - **Graceful degradation**: Codecs never fail; URLs without a scope decode to
//!   the empty scope.
//! - **Bit-for-bit agreement**: URL routing, session storage and project resolution
//!   all go through the same encode/decode functions in this crate.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use scope_core::{parse_session_url, session_context_file, SessionContext};
//!
//! let parsed = parse_session_url("http://host/s/deadbeefa1b2c3d4/app");
//! let context = SessionContext::new("bob", parsed.scope);
//! let file = session_context_file(&context); // "bob-ds/deadbeef/a1b2c3d4"
//! ```

pub mod alias;
pub mod codec;
pub mod config;
pub mod context;
pub mod descriptor;
pub mod error;
pub mod id;
mod persist;
pub mod project_ids;
pub mod registry;
pub mod scope;
pub mod storage;
pub mod validate;

pub use alias::{create_aliased_path, resolve_aliased_path};
pub use codec::{
    create_session_url, parse_session_url, session_context_file, session_scope_file,
    session_scope_prefix, session_scopes_prefix, url_path_for_session_scope, ParsedSessionUrl,
};
pub use config::{load_scope_config, ScopeConfig};
pub use context::SessionContext;
pub use descriptor::{find_project_descriptor, DEFAULT_DESCRIPTOR_EXTENSION};
pub use error::{Result, ScopeError};
pub use id::{
    generate_scope_id, generate_scope_id_with, normalize_scope_id, ScopeIdGenerator,
    UniqueIdSource, UuidIdSource, DEFAULT_MAX_ID_ATTEMPTS, SCOPE_ID_LEN,
};
pub use project_ids::ProjectIdStore;
pub use registry::{ActiveSessionRecord, FileSessionRegistry, SessionRegistry};
pub use scope::{reserved_scope_ids, SessionScope, PROJECT_NONE_ID, PROJECT_NONE_INPUT, WORKSPACES_ID};
pub use storage::StorageConfig;
pub use validate::{
    validate_project_session_scope, validate_session_scope_id, validate_session_scope_id_in,
    ScopeValidator,
};
