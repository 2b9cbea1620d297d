//! # REPL Application Controller
//!
//! Reads a line, parses it into a [`Command`], runs it against the session and
//! prints the outcome, then renders the prompt again. Errors from a single
//! command are printed as `*** message` and never end the loop.

use crate::repl::commands::{Command, CommandName, VariableKind, HELP_TEXT};
use crate::repl::error::ShellError;
use crate::repl::io::{LineEditor, SecretReader};
use crate::repl::models::session::Session;
use crate::repl::services::http::RestClient;
use crate::repl::views::response::{render_variables, write_exchange};
use anyhow::Result;
use std::fmt::Write as _;
use std::io::Write;

const PASSWORD_PROMPT: &str = "Password: ";

/// What the loop does after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// The main application controller
pub struct AppController<C, L, S, W>
where
    C: RestClient,
    L: LineEditor,
    S: SecretReader,
    W: Write,
{
    session: Session<C>,
    line_editor: L,
    secret_reader: S,
    output: W,
}

impl<C, L, S, W> AppController<C, L, S, W>
where
    C: RestClient,
    L: LineEditor,
    S: SecretReader,
    W: Write,
{
    /// Create the controller with injected I/O (dependency injection)
    pub fn with_io(session: Session<C>, line_editor: L, secret_reader: S, output: W) -> Self {
        Self {
            session,
            line_editor,
            secret_reader,
            output,
        }
    }

    pub fn session(&self) -> &Session<C> {
        &self.session
    }

    pub fn line_editor(&self) -> &L {
        &self.line_editor
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    /// Run until `quit`, `EOF` or end of input, then save the history
    pub fn run(&mut self) -> Result<()> {
        let result = self.read_eval_loop();
        let flushed = self.line_editor.flush_history();
        result.and(flushed)
    }

    fn read_eval_loop(&mut self) -> Result<()> {
        tracing::info!("Starting shell loop");
        loop {
            let prompt = self.session.render_prompt();
            let Some(line) = self.line_editor.read_line(&prompt)? else {
                tracing::info!("End of input");
                return Ok(());
            };

            if self.execute_line(&line)? == Flow::Quit {
                return Ok(());
            }
        }
    }

    /// Execute one input line
    ///
    /// Command failures are reported on the output and yield `Flow::Continue`;
    /// only failures to write the output are returned.
    pub fn execute_line(&mut self, line: &str) -> Result<Flow> {
        match Command::parse(line) {
            Ok(None) => Ok(Flow::Continue),
            Ok(Some(command)) => {
                tracing::debug!("Executing {:?}", command);
                match self.execute(command) {
                    Ok(flow) => Ok(flow),
                    Err(e) => {
                        tracing::warn!("Command failed: {e:#}");
                        self.report(&e)?;
                        Ok(Flow::Continue)
                    }
                }
            }
            Err(e) => {
                tracing::warn!("Rejected '{}': {}", line.trim(), e);
                self.report(&anyhow::Error::from(e))?;
                Ok(Flow::Continue)
            }
        }
    }

    fn report(&mut self, error: &anyhow::Error) -> Result<()> {
        let mut message = format!("{error}");
        for cause in error.chain().skip(1) {
            let _ = write!(message, "\n  Caused by: {cause}");
        }
        writeln!(self.output, "*** {message}")?;
        Ok(())
    }

    fn execute(&mut self, command: Command) -> Result<Flow> {
        match command {
            Command::Set { kind, key, value } => match kind {
                VariableKind::Header => self.session.set_header(&key, &value),
                VariableKind::Setting => self.session.set_setting(&key, &value),
            },
            Command::Unset { kind, key } => match kind {
                VariableKind::Header => self.session.unset_header(&key),
                VariableKind::Setting => self.session.unset_setting(&key),
            },
            Command::SetEnv(pairs) => {
                for (key, value) in pairs {
                    self.session.set_env(&key, &value);
                }
            }
            Command::DelEnv(keys) => {
                for key in keys {
                    self.session.del_env(&key);
                }
            }
            Command::Show(kind) => {
                let variables = match kind {
                    VariableKind::Header => self.session.headers(),
                    VariableKind::Setting => self.session.settings(),
                };
                let text = render_variables(variables);
                write!(self.output, "{text}")?;
            }
            Command::BaseUrl(url) => self.session.set_base_url(&url),
            Command::Login(username) => {
                let password = self.secret_reader.read_secret(PASSWORD_PROMPT)?;
                self.session.authenticate(&username, &password)?;
            }
            Command::Prompt(template) => self.session.set_prompt(&template),
            Command::Request { method, url, body } => {
                let exchange = self.session.request(method, &url, body.as_deref())?;
                write_exchange(&mut self.output, &exchange, self.session.settings())?;
            }
            Command::Help(None) => writeln!(self.output, "{HELP_TEXT}")?,
            Command::Help(Some(topic)) => {
                let name =
                    CommandName::lookup(&topic).ok_or_else(|| ShellError::NoHelp(topic.clone()))?;
                writeln!(self.output, "{}", name.help())?;
            }
            Command::Quit => return Ok(Flow::Quit),
            Command::Reload => self.session.reload()?,
        }

        self.output.flush()?;
        Ok(Flow::Continue)
    }
}
