//! # restsh Main Entry Point

use anyhow::Result;
use restsh::cmd_args::CommandLineArgs;
use restsh::config;
use restsh::repl::io::{LineEditor, ReedlineEditor, StdinLineEditor, TerminalSecretReader};
use restsh::{AppController, HttpService, Session};

fn main() -> Result<()> {
    let args = CommandLineArgs::parse();

    tracing_subscriber::fmt()
        .with_env_filter(config::env_filter(args.verbose()))
        .with_writer(std::io::stderr)
        .init();

    let line_editor: Box<dyn LineEditor> = if atty::is(atty::Stream::Stdin) {
        Box::new(ReedlineEditor::new(
            args.history_file(),
            config::HISTORY_MAX_LINES,
        )?)
    } else {
        tracing::debug!("stdin is not a terminal, reading commands without history");
        Box::new(StdinLineEditor::new())
    };

    let session = Session::<HttpService>::new()?;
    let mut app = AppController::with_io(
        session,
        line_editor,
        TerminalSecretReader::new(),
        std::io::stdout(),
    );

    app.run()
}
