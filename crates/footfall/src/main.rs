//! `footfall`: serves today's entry count and runs the sign that shows it.
//!
//! `serve` answers `GET /count` from the visitor log. `display` polls that
//! endpoint every interval and restarts itself when the server stays
//! unreachable for too many polls in a row.

mod cli;
mod commands;
mod error;
mod logging;
mod restart;
mod server;
mod sign;

use clap::{CommandFactory, Parser};
use tracing_appender::non_blocking::WorkerGuard;

use crate::cli::{Backend, Cli, Command};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_file = match &cli.command {
        Command::Display(args) if args.backend == Backend::Panel => Some(
            cli.global
                .log_file
                .clone()
                .unwrap_or_else(logging::default_panel_log),
        ),
        _ => cli.global.log_file.clone(),
    };
    let log_guard = logging::init(cli.global.verbose, log_file.as_deref());

    let result = run(cli, log_guard).await;

    if let Err(err) = result {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

/// `log_guard` lives until the command returns, or until `display` restarts.
async fn run(cli: Cli, log_guard: Option<WorkerGuard>) -> Result<(), CliError> {
    tracing::debug!(command = ?cli.command, "dispatching command");

    match cli.command {
        Command::Serve(args) => commands::serve::handle(args, &cli.global).await,
        Command::Display(args) => {
            commands::display::handle(args, &cli.global, log_guard).await
        }
        Command::Count(args) => commands::count::handle(&args, &cli.global),
        Command::Config(args) => commands::config_cmd::handle(&args, &cli.global),
        Command::Completions(args) => {
            let mut cmd = Cli::command();
            clap_complete::generate(args.shell, &mut cmd, "footfall", &mut std::io::stdout());
            Ok(())
        }
    }
}
