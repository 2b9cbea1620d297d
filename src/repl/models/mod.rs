//! # Models Module
//!
//! State owned by the shell between commands.

pub mod session;

pub use session::Session;
