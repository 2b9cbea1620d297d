//! # Shell Commands
//!
//! Every command the shell understands is listed once in [`CommandName::ALL`],
//! together with its usage line and help text. A line is parsed into a typed
//! [`Command`] before anything runs, so arity and type tag errors never touch
//! the session.

pub mod args;

use crate::repl::error::ShellError;
use crate::repl::services::http::HttpMethod;
use args::{shell_words, split_command, split_request};

pub const HELP_TEXT: &str = "Usage: command [<command-option>...]

Client commands:
  set <header|setting> <key> <value>
  unset <header|setting> <key>
  show <headers|settings>
  setenv <key> <value> [<key> <value>...]
  delenv <key> [<key>...]
  prompt <new-prompt>
  login <username>
  baseurl <host>
  reload
  help [<command>]
  quit

Rest actions:
  get <url>
  post <url> <data>
  put <url> <data>
  delete <url>
";

/// Names in the dispatch table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandName {
    Set,
    Unset,
    SetEnv,
    DelEnv,
    Show,
    BaseUrl,
    Login,
    Prompt,
    Get,
    Post,
    Put,
    Delete,
    Help,
    Quit,
    Eof,
    Reload,
}

impl CommandName {
    pub const ALL: [CommandName; 16] = [
        CommandName::Set,
        CommandName::Unset,
        CommandName::SetEnv,
        CommandName::DelEnv,
        CommandName::Show,
        CommandName::BaseUrl,
        CommandName::Login,
        CommandName::Prompt,
        CommandName::Get,
        CommandName::Post,
        CommandName::Put,
        CommandName::Delete,
        CommandName::Help,
        CommandName::Quit,
        CommandName::Eof,
        CommandName::Reload,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CommandName::Set => "set",
            CommandName::Unset => "unset",
            CommandName::SetEnv => "setenv",
            CommandName::DelEnv => "delenv",
            CommandName::Show => "show",
            CommandName::BaseUrl => "baseurl",
            CommandName::Login => "login",
            CommandName::Prompt => "prompt",
            CommandName::Get => "get",
            CommandName::Post => "post",
            CommandName::Put => "put",
            CommandName::Delete => "delete",
            CommandName::Help => "help",
            CommandName::Quit => "quit",
            CommandName::Eof => "EOF",
            CommandName::Reload => "reload",
        }
    }

    pub fn lookup(name: &str) -> Option<CommandName> {
        Self::ALL.into_iter().find(|command| command.as_str() == name)
    }

    /// One line of documentation, shown by `help <command>`
    pub fn help(&self) -> &'static str {
        match self {
            CommandName::Set => {
                "Set headers and settings variables. Example: set setting auth_method bearer"
            }
            CommandName::Unset => {
                "Unset headers and settings variables. Example: unset setting auth_method"
            }
            CommandName::SetEnv => {
                "Set environment variables used as $name in urls and bodies. Example: setenv id 42 name bob"
            }
            CommandName::DelEnv => "Delete environment variables. Example: delenv id name",
            CommandName::Show => "Show headers and settings variables. Example: show settings",
            CommandName::BaseUrl => {
                "Set the base url for all requests. Example: baseurl http://testserver.com/api"
            }
            CommandName::Login => {
                "Set HTTP AUTH login username and password. Example: login myusername"
            }
            CommandName::Prompt => "Change restsh prompt. Example: prompt \"{login}@{baseurl}> \"",
            CommandName::Get => "Send get request. Example: get /url",
            CommandName::Post => "Send post request. Example: post /url key=value test=test",
            CommandName::Put => "Send put request. Example: put /url key=value test=test",
            CommandName::Delete => "Send delete request. Example: delete /url",
            CommandName::Help => "Show help information. Example: help set",
            CommandName::Quit | CommandName::Eof => "Quit restsh",
            CommandName::Reload => {
                "Rebuild the HTTP client, keeping environment variables. Example: reload"
            }
        }
    }
}

/// Which mapping `set`/`unset`/`show` address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableKind {
    Header,
    Setting,
}

impl VariableKind {
    fn parse(tag: &str) -> Result<Self, ShellError> {
        match tag {
            "header" | "headers" => Ok(VariableKind::Header),
            "setting" | "settings" => Ok(VariableKind::Setting),
            other => Err(ShellError::InvalidType(other.to_string())),
        }
    }
}

/// A fully parsed command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Set {
        kind: VariableKind,
        key: String,
        value: String,
    },
    Unset {
        kind: VariableKind,
        key: String,
    },
    SetEnv(Vec<(String, String)>),
    DelEnv(Vec<String>),
    Show(VariableKind),
    BaseUrl(String),
    Login(String),
    Prompt(String),
    Request {
        method: HttpMethod,
        url: String,
        body: Option<String>,
    },
    Help(Option<String>),
    Quit,
    Reload,
}

impl Command {
    /// Parse one input line. A blank line parses to `None`.
    pub fn parse(line: &str) -> Result<Option<Command>, ShellError> {
        let Some((name, params)) = split_command(line) else {
            return Ok(None);
        };
        let name = CommandName::lookup(name)
            .ok_or_else(|| ShellError::CommandNotFound(name.to_string()))?;
        Self::parse_params(name, params).map(Some)
    }

    fn parse_params(name: CommandName, params: &str) -> Result<Command, ShellError> {
        let invalid = || ShellError::InvalidParameters {
            command: name.as_str(),
        };

        let command = match name {
            CommandName::Get | CommandName::Post | CommandName::Put | CommandName::Delete => {
                let method = match name {
                    CommandName::Get => HttpMethod::Get,
                    CommandName::Post => HttpMethod::Post,
                    CommandName::Put => HttpMethod::Put,
                    _ => HttpMethod::Delete,
                };
                let (url, body) = split_request(params);
                Command::Request {
                    method,
                    url: url.to_string(),
                    body: body.map(str::to_string),
                }
            }
            CommandName::Quit | CommandName::Eof => Command::Quit,
            CommandName::Reload => Command::Reload,
            _ => {
                let words = shell_words(params)?;
                match (name, words.as_slice()) {
                    (CommandName::Set, [kind, key, value]) => Command::Set {
                        kind: VariableKind::parse(kind)?,
                        key: key.clone(),
                        value: value.clone(),
                    },
                    (CommandName::Unset, [kind, key]) => Command::Unset {
                        kind: VariableKind::parse(kind)?,
                        key: key.clone(),
                    },
                    (CommandName::SetEnv, pairs) if !pairs.is_empty() && pairs.len() % 2 == 0 => {
                        Command::SetEnv(
                            pairs
                                .chunks(2)
                                .map(|pair| (pair[0].clone(), pair[1].clone()))
                                .collect(),
                        )
                    }
                    (CommandName::DelEnv, keys) if !keys.is_empty() => {
                        Command::DelEnv(keys.to_vec())
                    }
                    (CommandName::Show, [kind]) => Command::Show(VariableKind::parse(kind)?),
                    (CommandName::BaseUrl, [url]) => Command::BaseUrl(url.clone()),
                    (CommandName::Login, [username]) => Command::Login(username.clone()),
                    (CommandName::Prompt, [template]) => Command::Prompt(template.clone()),
                    (CommandName::Help, []) => Command::Help(None),
                    (CommandName::Help, [topic]) => Command::Help(Some(topic.clone())),
                    _ => return Err(invalid()),
                }
            }
        };

        Ok(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Result<Option<Command>, ShellError> {
        Command::parse(line)
    }

    #[test]
    fn command_table_should_round_trip_names() {
        for name in CommandName::ALL {
            assert_eq!(CommandName::lookup(name.as_str()), Some(name));
        }
        assert_eq!(CommandName::lookup("SET"), None);
    }

    #[test]
    fn blank_line_should_be_a_no_op() {
        assert_eq!(parse("").unwrap(), None);
        assert_eq!(parse("   ").unwrap(), None);
    }

    #[test]
    fn unknown_command_should_be_reported() {
        assert_eq!(
            parse("fetch /x"),
            Err(ShellError::CommandNotFound("fetch".to_string()))
        );
    }

    #[test]
    fn set_should_parse_three_words() {
        assert_eq!(
            parse("set header X-Foo \"bar baz\"").unwrap(),
            Some(Command::Set {
                kind: VariableKind::Header,
                key: "X-Foo".to_string(),
                value: "bar baz".to_string(),
            })
        );
        assert_eq!(
            parse("set settings print_body no").unwrap(),
            Some(Command::Set {
                kind: VariableKind::Setting,
                key: "print_body".to_string(),
                value: "no".to_string(),
            })
        );
    }

    #[test]
    fn set_should_reject_wrong_arity_and_type() {
        assert_eq!(
            parse("set header onlykey"),
            Err(ShellError::InvalidParameters { command: "set" })
        );
        assert_eq!(
            parse("set cookie a b"),
            Err(ShellError::InvalidType("cookie".to_string()))
        );
    }

    #[test]
    fn unset_should_parse_two_words() {
        assert_eq!(
            parse("unset setting auth_method").unwrap(),
            Some(Command::Unset {
                kind: VariableKind::Setting,
                key: "auth_method".to_string(),
            })
        );
        assert!(parse("unset header").is_err());
    }

    #[test]
    fn setenv_should_require_pairs() {
        assert_eq!(
            parse("setenv a 1 b 2").unwrap(),
            Some(Command::SetEnv(vec![
                ("a".to_string(), "1".to_string()),
                ("b".to_string(), "2".to_string()),
            ]))
        );
        assert_eq!(
            parse("setenv a 1 b"),
            Err(ShellError::InvalidParameters { command: "setenv" })
        );
        assert!(parse("setenv").is_err());
    }

    #[test]
    fn delenv_should_require_a_key() {
        assert_eq!(
            parse("delenv a b").unwrap(),
            Some(Command::DelEnv(vec!["a".to_string(), "b".to_string()]))
        );
        assert!(parse("delenv").is_err());
    }

    #[test]
    fn show_should_accept_both_spellings() {
        assert_eq!(
            parse("show headers").unwrap(),
            Some(Command::Show(VariableKind::Header))
        );
        assert_eq!(
            parse("show setting").unwrap(),
            Some(Command::Show(VariableKind::Setting))
        );
        assert!(parse("show").is_err());
        assert_eq!(
            parse("show cookies"),
            Err(ShellError::InvalidType("cookies".to_string()))
        );
    }

    #[test]
    fn single_word_commands_should_check_arity() {
        assert_eq!(
            parse("baseurl http://h").unwrap(),
            Some(Command::BaseUrl("http://h".to_string()))
        );
        assert_eq!(
            parse("login alice").unwrap(),
            Some(Command::Login("alice".to_string()))
        );
        assert_eq!(
            parse("prompt \"{login}@{baseurl}> \"").unwrap(),
            Some(Command::Prompt("{login}@{baseurl}> ".to_string()))
        );
        assert!(parse("baseurl").is_err());
        assert!(parse("login alice bob").is_err());
    }

    #[test]
    fn request_should_keep_body_verbatim() {
        assert_eq!(
            parse("post /users {\"name\": \"a b\"}").unwrap(),
            Some(Command::Request {
                method: HttpMethod::Post,
                url: "/users".to_string(),
                body: Some("{\"name\": \"a b\"}".to_string()),
            })
        );
        assert_eq!(
            parse("delete /users/1").unwrap(),
            Some(Command::Request {
                method: HttpMethod::Delete,
                url: "/users/1".to_string(),
                body: None,
            })
        );
    }

    #[test]
    fn help_quit_and_reload_should_parse() {
        assert_eq!(parse("help").unwrap(), Some(Command::Help(None)));
        assert_eq!(
            parse("help set").unwrap(),
            Some(Command::Help(Some("set".to_string())))
        );
        assert_eq!(parse("quit").unwrap(), Some(Command::Quit));
        assert_eq!(parse("EOF").unwrap(), Some(Command::Quit));
        assert_eq!(parse("reload").unwrap(), Some(Command::Reload));
    }

    #[test]
    fn unbalanced_quotes_should_be_reported() {
        assert!(matches!(
            parse("set header X \"y"),
            Err(ShellError::InvalidQuoting(_))
        ));
    }
}
