//! # Terminal I/O Implementations
//!
//! Production implementations of [`LineEditor`] and [`SecretReader`].

use super::{LineEditor, SecretReader};
use anyhow::{Context, Result};
use dialoguer::Password;
use reedline::{
    FileBackedHistory, Prompt, PromptEditMode, PromptHistorySearch, PromptHistorySearchStatus,
    Reedline, Signal,
};
use std::borrow::Cow;
use std::io::{self, Write};
use std::path::PathBuf;

/// Prompt that shows the rendered session prompt verbatim
struct ShellPrompt<'a>(&'a str);

impl Prompt for ShellPrompt<'_> {
    fn render_prompt_left(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.0)
    }

    fn render_prompt_right(&self) -> Cow<'_, str> {
        Cow::Borrowed("")
    }

    fn render_prompt_indicator(&self, _mode: PromptEditMode) -> Cow<'_, str> {
        Cow::Borrowed("")
    }

    fn render_prompt_multiline_indicator(&self) -> Cow<'_, str> {
        Cow::Borrowed("... ")
    }

    fn render_prompt_history_search_indicator(&self, hs: PromptHistorySearch) -> Cow<'_, str> {
        let prefix = match hs.status {
            PromptHistorySearchStatus::Passing => "",
            PromptHistorySearchStatus::Failing => "failing ",
        };
        Cow::Owned(format!("({}search: {}) ", prefix, hs.term))
    }
}

/// Interactive line editor with a file backed history
///
/// The history file is read when the editor is built, trimmed to `capacity`
/// entries and written back by [`LineEditor::flush_history`].
pub struct ReedlineEditor {
    editor: Reedline,
}

impl ReedlineEditor {
    pub fn new(history_path: &str, capacity: usize) -> Result<Self> {
        tracing::debug!("Loading history from '{}'", history_path);
        let history = FileBackedHistory::with_file(capacity, PathBuf::from(history_path))
            .with_context(|| format!("Failed to open history file '{history_path}'"))?;

        Ok(Self {
            editor: Reedline::create().with_history(Box::new(history)),
        })
    }
}

impl LineEditor for ReedlineEditor {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        match self.editor.read_line(&ShellPrompt(prompt))? {
            Signal::Success(line) => Ok(Some(line)),
            Signal::CtrlD => Ok(None),
            // Ctrl-C abandons the current line
            _ => Ok(Some(String::new())),
        }
    }

    fn flush_history(&mut self) -> Result<()> {
        self.editor
            .sync_history()
            .context("Failed to write history file")
    }
}

/// Line reader for piped input, no history
///
/// Stdin is locked per line so a password can be read from it in between.
#[derive(Debug, Default)]
pub struct StdinLineEditor;

impl StdinLineEditor {
    pub fn new() -> Self {
        Self
    }
}

impl LineEditor for StdinLineEditor {
    fn read_line(&mut self, _prompt: &str) -> Result<Option<String>> {
        read_stdin_line()
    }
}

fn read_stdin_line() -> Result<Option<String>> {
    let mut line = String::new();
    if io::stdin().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(strip_line_ending(&line).to_string()))
}

fn strip_line_ending(line: &str) -> &str {
    line.trim_end_matches(['\r', '\n'])
}

/// Reads a password without echoing it
///
/// On a terminal the password is masked by dialoguer; piped input is read as
/// one plain line so scripted sessions can log in.
#[derive(Debug, Default)]
pub struct TerminalSecretReader;

impl TerminalSecretReader {
    pub fn new() -> Self {
        Self
    }
}

impl SecretReader for TerminalSecretReader {
    fn read_secret(&mut self, prompt: &str) -> Result<String> {
        if atty::is(atty::Stream::Stdin) {
            return Password::new()
                .with_prompt(password_label(prompt))
                .allow_empty_password(true)
                .interact()
                .context("Failed to read password");
        }

        let mut stdout = io::stdout();
        write!(stdout, "{prompt}")?;
        stdout.flush()?;
        Ok(read_stdin_line()?.unwrap_or_default())
    }
}

/// dialoguer appends its own separator after the label
fn password_label(prompt: &str) -> &str {
    prompt.trim_end_matches([':', ' '])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_line_ending_should_handle_unix_and_windows_endings() {
        assert_eq!(strip_line_ending("get /a\r\n"), "get /a");
        assert_eq!(strip_line_ending("show headers\n"), "show headers");
        assert_eq!(strip_line_ending("\n"), "");
        assert_eq!(strip_line_ending("quit"), "quit");
    }

    #[test]
    fn password_label_should_drop_trailing_separator() {
        assert_eq!(password_label("Password: "), "Password");
        assert_eq!(password_label("Token:"), "Token");
        assert_eq!(password_label("Secret"), "Secret");
    }

    #[test]
    fn shell_prompt_should_render_verbatim() {
        let prompt = ShellPrompt("alice@http://h|restsh> ");
        assert_eq!(prompt.render_prompt_left(), "alice@http://h|restsh> ");
        assert_eq!(prompt.render_prompt_right(), "");
    }
}
