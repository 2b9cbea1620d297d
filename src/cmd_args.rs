use std::ffi::OsString;

pub use clap::Parser;

use crate::config;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct ClapArgs {
    /// History file
    /// Optional. Where the line history is loaded from and saved to.
    /// Defaults to $RESTSH_HISTORY_PATH or ~/.restsh-history.
    #[clap(long, value_name = "PATH", help = "history file path")]
    history_file: Option<String>,

    /// Verbose mode
    /// Optional. Log debug messages to stderr.
    #[clap(
        short = 'v',
        long,
        help = "Print verbose message",
        default_value = "false"
    )]
    verbose: bool,
}

#[derive(Debug, Clone)]
pub struct CommandLineArgs {
    history_file: String,
    verbose: bool,
}

impl CommandLineArgs {
    pub fn parse() -> Self {
        Self::from_clap(ClapArgs::parse())
    }

    pub fn parse_from<I, T>(itr: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Self::from_clap(ClapArgs::parse_from(itr))
    }

    fn from_clap(args: ClapArgs) -> Self {
        let history_file = match args.history_file {
            Some(path) => config::expand_path(&path),
            None => config::get_history_path(),
        };
        Self {
            history_file,
            verbose: args.verbose,
        }
    }

    pub fn history_file(&self) -> &str {
        &self.history_file
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_args_history_file() {
        let args = CommandLineArgs::parse_from(["restsh", "--history-file", "/tmp/h"]);
        assert_eq!(args.history_file(), "/tmp/h");
        assert!(!args.verbose());
    }

    #[test]
    fn test_parse_args_verbose() {
        let args = CommandLineArgs::parse_from(["restsh", "--verbose"]);
        assert!(args.verbose());
    }

    #[test]
    fn test_parse_args_short_flags() {
        let args = CommandLineArgs::parse_from(["restsh", "-v"]);
        assert!(args.verbose());
    }

    #[test]
    fn test_default_values() {
        let args = CommandLineArgs::parse_from(["restsh"]);
        assert!(!args.history_file().is_empty());
        assert!(!args.verbose());
    }
}
