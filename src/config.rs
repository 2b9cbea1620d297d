//! Configuration constants and utilities for restsh
//!
//! There is no configuration file. The only persisted state is the line
//! history, whose location can be overridden from the environment or the
//! command line.

use tracing_subscriber::EnvFilter;

/// Default history file path for restsh
pub const DEFAULT_HISTORY_PATH: &str = "~/.restsh-history";

/// Environment variable name for overriding the history path
pub const HISTORY_PATH_ENV_VAR: &str = "RESTSH_HISTORY_PATH";

/// Environment variable name for the log level
pub const LOG_LEVEL_ENV_VAR: &str = "RESTSH_LOG_LEVEL";

/// Maximum number of lines kept in the history file
pub const HISTORY_MAX_LINES: usize = 1000;

/// Get the history file path, checking environment variable first, then falling back to default
///
/// A leading `~` is expanded to the user's home directory.
pub fn get_history_path() -> String {
    let path = std::env::var_os(HISTORY_PATH_ENV_VAR)
        .and_then(|val| val.into_string().ok())
        .unwrap_or_else(|| DEFAULT_HISTORY_PATH.to_string());
    expand_path(&path)
}

/// Expand `~` in a user supplied path
pub fn expand_path(path: &str) -> String {
    shellexpand::tilde(path).into_owned()
}

/// Build the log filter: `--verbose` forces `debug`, otherwise the
/// `RESTSH_LOG_LEVEL` directives apply, defaulting to `error`
///
/// Directives take the usual `tracing` form, so `restsh=trace,reqwest=warn`
/// works as well as a bare level.
pub fn env_filter(verbose: bool) -> EnvFilter {
    if verbose {
        return EnvFilter::new("debug");
    }
    EnvFilter::try_from_env(LOG_LEVEL_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("error"))
}
