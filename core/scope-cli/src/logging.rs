//! Logging setup.
//!
//! Logs always go to stderr so stdout stays machine-readable. When the config
//! enables `log_to_file`, a daily-rolling file under `<root>/logs/` is added.
//! Set `SESSION_SCOPE_DEBUG_LOG=1` to force debug level, otherwise `RUST_LOG`
//! applies (default `info`).

use std::env;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::env::ScopeEnv;

const LOG_FILE_PREFIX: &str = "scope.log";
const DEFAULT_FILTER: &str = "info";

/// Installs the global subscriber. Keep the returned guard alive until exit
/// so buffered file logs are flushed.
pub fn init(env: Option<&ScopeEnv>) -> Option<WorkerGuard> {
    let (file_layer, guard) = match env.and_then(file_writer) {
        Some((writer, guard)) => (
            Some(fmt::layer().with_ansi(false).with_writer(writer)),
            Some(guard),
        ),
        None => (None, None),
    };

    let _ = tracing_subscriber::registry()
        .with(filter())
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .try_init();

    guard
}

fn filter() -> EnvFilter {
    if debug_enabled() {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| fallback_filter())
    }
}

fn fallback_filter() -> EnvFilter {
    EnvFilter::new(DEFAULT_FILTER)
}

fn debug_enabled() -> bool {
    env::var("SESSION_SCOPE_DEBUG_LOG")
        .map(|value| matches!(value.as_str(), "1" | "true" | "TRUE" | "yes" | "YES"))
        .unwrap_or(false)
}

fn file_writer(
    env: &ScopeEnv,
) -> Option<(tracing_appender::non_blocking::NonBlocking, WorkerGuard)> {
    let log_dir = env.log_dir()?;
    if let Err(e) = std::fs::create_dir_all(&log_dir) {
        eprintln!("scope: cannot create log directory {}: {}", log_dir.display(), e);
        return None;
    }
    let appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_PREFIX);
    Some(tracing_appender::non_blocking(appender))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::level_filters::LevelFilter;

    #[test]
    fn test_fallback_filter_is_info() {
        assert_eq!(fallback_filter().max_level_hint(), Some(LevelFilter::INFO));
    }
}
