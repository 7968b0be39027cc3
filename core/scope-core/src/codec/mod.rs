//! Scope codecs: the two string forms a [`SessionScope`](crate::SessionScope) travels in.
//!
//! - `url`: the `/s/<project><id>/` prefix embedded in request URLs
//! - `file`: name fragments for per-user, per-scope state on disk
//!
//! Routing and storage must agree on both forms exactly; change them together.

mod file;
mod url;

pub use self::file::{
    session_context_file, session_scope_file, session_scope_prefix, session_scopes_prefix,
};
pub use self::url::{
    create_session_url, parse_session_url, url_path_for_session_scope, ParsedSessionUrl,
};
