//! # I/O Abstraction Layer
//!
//! Trait abstractions for the terminal services the shell needs, so the
//! dispatch loop never touches the terminal directly.
//!
//! ```text
//! Production:  AppController ──▶ ReedlineEditor / StdinLineEditor ──▶ reedline, stdin
//!                            ──▶ TerminalSecretReader             ──▶ dialoguer Password, stdin
//!
//! Testing:     AppController ──▶ MockLineEditor   ──▶ VecDeque<String>
//!                            ──▶ MockSecretReader ──▶ VecDeque<String>
//! ```

use anyhow::Result;

pub mod mock;
pub mod terminal;

pub use mock::{MockClient, MockLineEditor, MockSecretReader};
pub use terminal::{ReedlineEditor, StdinLineEditor, TerminalSecretReader};

/// Line input with history
pub trait LineEditor {
    /// Read one line, showing `prompt`. `None` means end of input.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>>;

    /// Persist the history, if this editor keeps one
    fn flush_history(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Masked input for passwords
pub trait SecretReader {
    fn read_secret(&mut self, prompt: &str) -> Result<String>;
}

impl<T: LineEditor + ?Sized> LineEditor for Box<T> {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        (**self).read_line(prompt)
    }

    fn flush_history(&mut self) -> Result<()> {
        (**self).flush_history()
    }
}
