//! # Shell Errors
//!
//! Errors raised by the command layer itself. Failures coming out of the HTTP
//! collaborator or the terminal travel as `anyhow::Error` and are reported the
//! same way.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShellError {
    #[error("Invalid number of parameters for '{command}'")]
    InvalidParameters { command: &'static str },

    #[error("Invalid type of variables: '{0}'")]
    InvalidType(String),

    #[error("Command not found: {0}")]
    CommandNotFound(String),

    #[error("No help on {0}")]
    NoHelp(String),

    #[error("Invalid quoting in parameters: {0}")]
    InvalidQuoting(String),

    #[error("Unsupported auth method: '{0}' (use basic or bearer)")]
    UnsupportedAuthMethod(String),

    #[error("No base url configured for relative url '{0}'")]
    MissingBaseUrl(String),
}
