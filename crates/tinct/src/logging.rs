//! Diagnostic logging setup.
//!
//! Logs go to stderr so that stdout stays free for command output. The level
//! comes from `-v` flags unless `TINCT_LOG` holds an env-filter directive.

use tracing_subscriber::EnvFilter;

/// Environment variable overriding the verbosity flags.
pub const LOG_ENV: &str = "TINCT_LOG";

/// The filter directive for a `-v` count.
pub fn level_for(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn filter(verbose: u8) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(level_for(verbose)))
}

/// Installs the global subscriber. Later calls are no-ops.
pub fn init(verbose: u8) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(verbose))
        .with_writer(std::io::stderr)
        .with_target(verbose > 1)
        .try_init();
}
