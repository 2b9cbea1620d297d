//! # REPL Module
//!
//! The interactive command shell:
//!
//! ```text
//! ┌──────────────┐   line    ┌───────────────┐  Command  ┌──────────────┐
//! │  LineEditor  │──────────▶│ AppController │──────────▶│   Session    │
//! │ (io)         │◀──prompt──│ (controller)  │◀──Exchange│ + RestClient │
//! └──────────────┘           └───────────────┘           └──────────────┘
//!                                    │
//!                                    ▼
//!                             views::response
//! ```

pub mod commands;
pub mod controller;
pub mod error;
pub mod io;
pub mod models;
pub mod services;
pub mod views;

pub use commands::{Command, CommandName, VariableKind};
pub use controller::{AppController, Flow};
pub use error::ShellError;
pub use models::Session;
pub use services::{HttpService, RestClient};
