//! Argument splitting for command lines.

use crate::repl::error::ShellError;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// Split a line into its command word and the untouched remainder
///
/// Returns `None` for a blank line.
pub fn split_command(line: &str) -> Option<(&str, &str)> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let mut parts = WHITESPACE.splitn(line, 2);
    let name = parts.next().unwrap_or_default();
    let rest = parts.next().unwrap_or_default();
    Some((name, rest))
}

/// Split parameters the way a POSIX shell splits words
pub fn shell_words(params: &str) -> Result<Vec<String>, ShellError> {
    shlex::split(params).ok_or_else(|| ShellError::InvalidQuoting(params.to_string()))
}

/// Split request parameters into the url and an optional raw body
///
/// Only the first run of whitespace separates the two; the body is kept
/// verbatim, quotes and all.
pub fn split_request(params: &str) -> (&str, Option<&str>) {
    let params = params.trim_start();
    let mut parts = WHITESPACE.splitn(params, 2);
    let url = parts.next().unwrap_or_default();
    let body = parts.next().filter(|body| !body.is_empty());
    (url, body)
}
