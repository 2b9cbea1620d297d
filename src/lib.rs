//! # restsh - Interactive REST Shell
//!
//! A small shell for talking to HTTP APIs. Set a base url, headers,
//! credentials and display settings once, then fire `get`, `post`, `put` and
//! `delete` at relative urls:
//!
//! ```text
//! no-user@no-host|restsh> baseurl http://localhost:8000/api
//! no-user@http://localhost:8000/api|restsh> set header Accept application/json
//! no-user@http://localhost:8000/api|restsh> get /users
//! ```

pub mod cmd_args;
pub mod config;
pub mod repl;

// Re-export main types for easy access
pub use repl::*;
