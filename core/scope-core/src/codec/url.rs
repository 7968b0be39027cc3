//! URL form of a session scope.
//!
//! ```text
//! http://host/s/deadbeefa1b2c3d4/app
//!            └──────┬─────────┘
//!     /s/<project:8 hex><id:8 hex>/
//! ```
//!
//! Only 8-hex project tokens survive a round trip through this form. Scopes
//! with other project tokens can still be encoded, but decode as "no scope".

use once_cell::sync::Lazy;
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use regex::Regex;
use tracing::warn;
use url::Url;

use crate::scope::SessionScope;

/// Matches the scope prefix anywhere in a URL. Hex is case-insensitive.
static RE_SESSION_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/s/([A-Fa-f0-9]{8})([A-Fa-f0-9]{8})/").unwrap());

/// Characters left literal when encoding a project token: RFC 3986 unreserved.
const PROJECT_TOKEN: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Result of scanning a URL for a scope prefix.
///
/// When no prefix is present `scope` is the default scope, `prefix` is empty
/// and `url_without_prefix` is the input URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedSessionUrl {
    pub scope: SessionScope,
    /// The exact `/s/<project><id>/` substring that matched.
    pub prefix: String,
    /// The input URL with the first occurrence of `prefix` replaced by `/`.
    pub url_without_prefix: String,
}

impl ParsedSessionUrl {
    pub fn has_scope(&self) -> bool {
        !self.prefix.is_empty()
    }
}

/// Builds the `/s/<project><id>/` path for a scope.
///
/// The project token is percent-encoded, except that `/` stays literal so
/// hierarchical tokens remain readable as path segments.
pub fn url_path_for_session_scope(scope: &SessionScope) -> String {
    let project = utf8_percent_encode(scope.project(), PROJECT_TOKEN)
        .to_string()
        .replace("%2F", "/");
    format!("/s/{}{}/", project, scope.id())
}

/// Extracts the scope prefix from a URL, if it has one.
pub fn parse_session_url(url: &str) -> ParsedSessionUrl {
    let Some(captures) = RE_SESSION_URL.captures(url) else {
        return ParsedSessionUrl {
            url_without_prefix: url.to_string(),
            ..ParsedSessionUrl::default()
        };
    };

    let prefix = captures[0].to_string();
    let project = percent_decode_str(&captures[1]).decode_utf8_lossy();
    let scope = SessionScope::from_project_id(&project, &captures[2]);
    let url_without_prefix = url.replacen(&prefix, "/", 1);

    ParsedSessionUrl {
        scope,
        prefix,
        url_without_prefix,
    }
}

/// Rewrites `host_page_url` so it points at `scope`.
///
/// Any existing scope prefix is dropped first; the scope path is then
/// resolved against the host URL, which keeps only its origin. If the host
/// URL is not absolute the bare scope path is returned.
pub fn create_session_url(host_page_url: &str, scope: &SessionScope) -> String {
    let base = parse_session_url(host_page_url).url_without_prefix;
    let path = url_path_for_session_scope(scope);

    match Url::parse(&base).and_then(|base_url| base_url.join(&path)) {
        Ok(url) => url.to_string(),
        Err(err) => {
            warn!(url = %host_page_url, error = %err, "Host page URL is not absolute; using bare scope path");
            path
        }
    }
}
