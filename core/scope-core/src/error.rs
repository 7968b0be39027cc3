//! Error types for scope-core operations.
//!
//! Codecs never return these: a URL without a scope is a normal "no scope"
//! result, not an error. Id collisions with reserved tokens are retried and
//! never surface either.

use std::path::PathBuf;

/// All errors that can occur in scope-core operations.
#[derive(Debug, thiserror::Error)]
pub enum ScopeError {
    // ─────────────────────────────────────────────────────────────────────
    // Resolution Errors
    // ─────────────────────────────────────────────────────────────────────
    #[error("No project path is mapped to project id '{0}'")]
    ProjectNotFound(String),

    #[error("Project directory not found: {0}")]
    ProjectDirNotFound(PathBuf),

    #[error("No project descriptor found in {0}")]
    DescriptorNotFound(PathBuf),

    #[error("No active session registered with id '{0}'")]
    SessionNotFound(String),

    #[error("Active session '{0}' is missing required properties")]
    SessionIncomplete(String),

    // ─────────────────────────────────────────────────────────────────────
    // Id Generation Errors
    // ─────────────────────────────────────────────────────────────────────
    #[error("Scope id generation gave up after {attempts} attempts; id source only produced reserved ids")]
    IdSpaceExhausted { attempts: u32 },

    // ─────────────────────────────────────────────────────────────────────
    // Lock Errors
    // ─────────────────────────────────────────────────────────────────────
    #[error("Timed out waiting for lock {}", path.display())]
    LockTimeout { path: PathBuf },

    // ─────────────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────────────
    #[error("Home directory not found")]
    HomeDirNotFound,

    #[error("Configuration file malformed: {path}: {details}")]
    ConfigMalformed { path: PathBuf, details: String },

    // ─────────────────────────────────────────────────────────────────────
    // I/O Errors
    // ─────────────────────────────────────────────────────────────────────
    #[error("I/O error: {context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON parsing error: {context}: {source}")]
    Json {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ScopeError {
    pub(crate) fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        ScopeError::Io {
            context: context.into(),
            source,
        }
    }

    pub(crate) fn json(context: impl Into<String>, source: serde_json::Error) -> Self {
        ScopeError::Json {
            context: context.into(),
            source,
        }
    }
}

/// Convenience type alias for Results using ScopeError.
pub type Result<T> = std::result::Result<T, ScopeError>;
