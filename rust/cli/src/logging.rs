//! Log subscriber bootstrap for the `holdem` binary.
//!
//! The engine and bots emit `tracing` events; nothing is printed unless a
//! subscriber is installed. Verbosity follows `HOLDEM_LOG` (an `EnvFilter`
//! directive such as `info` or `holdem_engine=debug`), defaulting to `warn`.
//! Logs go to stderr so command output on stdout stays machine-readable.

use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "HOLDEM_LOG";
const DEFAULT_DIRECTIVE: &str = "warn";

pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))
}

/// Installs the global subscriber. Calling it twice is harmless.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();
}
