//! # Views Module
//!
//! Text rendering for command output.

pub mod response;

pub use response::{render_variables, write_exchange};
