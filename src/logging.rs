//! Diagnostic logging.
//!
//! Logs go to stderr so they never mix with command output. The filter comes
//! from `UDO_LOG` when set, otherwise from the configured level.

use tracing_subscriber::EnvFilter;

/// Environment variable holding a tracing filter directive.
pub const LOG_ENV: &str = "UDO_LOG";

const FALLBACK_LEVEL: &str = "warn";

fn filter_from(directive: Option<&str>, default_level: &str) -> EnvFilter {
    directive
        .and_then(|d| EnvFilter::try_new(d).ok())
        .or_else(|| EnvFilter::try_new(default_level).ok())
        .unwrap_or_else(|| EnvFilter::new(FALLBACK_LEVEL))
}

/// Install the global subscriber.
///
/// Returns `false` if a subscriber was already installed.
pub fn init(default_level: &str) -> bool {
    let directive = std::env::var(LOG_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(filter_from(directive.as_deref(), default_level))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .is_ok()
}
