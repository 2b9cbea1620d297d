//! # Response View
//!
//! Formats a request/response exchange according to the display settings.

use crate::repl::services::http::{Exchange, Variables};
use std::io::{self, Write};

pub const PRINT_REQUEST: &str = "print_request";
pub const PRINT_BODY: &str = "print_body";
pub const PRINT_HEADERS: &str = "print_headers";
pub const PRINT_STATUS: &str = "print_status";

/// Values that switch a display setting on; everything else switches it off
const TRUTHY: [&str; 3] = ["1", "yes", "true"];

/// Whether a display toggle is on. Unset toggles are on.
pub fn is_enabled(settings: &Variables, key: &str) -> bool {
    let value = settings.get(key).map(String::as_str).unwrap_or("1");
    TRUTHY.contains(&value)
}

/// Write an exchange, honouring `print_request`, `print_body`,
/// `print_headers` and `print_status`
pub fn write_exchange<W: Write>(
    out: &mut W,
    exchange: &Exchange,
    settings: &Variables,
) -> io::Result<()> {
    let request = &exchange.request;
    let response = &exchange.response;

    if is_enabled(settings, PRINT_REQUEST) {
        writeln!(out, "Request:")?;
        writeln!(out, "  url: {}", request.url)?;
        writeln!(out, "  data: {}", request.body.as_deref().unwrap_or("{}"))?;
        writeln!(out, "  headers:")?;
        for (key, value) in &request.headers {
            writeln!(out, "    {key}: {value}")?;
        }
    }

    if is_enabled(settings, PRINT_BODY) {
        writeln!(out, "Response body:\n{}", response.body)?;
    }

    if is_enabled(settings, PRINT_HEADERS) {
        writeln!(out, "Response headers:")?;
        for (key, value) in &response.headers {
            writeln!(out, "  {key}: {value}")?;
        }
    }

    if is_enabled(settings, PRINT_STATUS) {
        writeln!(out, "Status Code: {}", response.status)?;
    }

    Ok(())
}

/// `key: value` lines for `show`
pub fn render_variables(variables: &Variables) -> String {
    variables
        .iter()
        .map(|(key, value)| format!("{key}: {value}\n"))
        .collect()
}
