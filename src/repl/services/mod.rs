//! # Services Layer
//!
//! Wraps the external resources the shell talks to. Today that is only the
//! HTTP client.

pub mod http;

pub use http::{Exchange, HttpMethod, HttpService, RequestRecord, ResponseRecord, RestClient};
