//! Arcroute CLI - Command-line utility for detecting, extracting and
//! creating archives.

mod cli;
mod commands;
mod error;
mod output;
mod progress;

use arcroute_core::handlers;
use clap::Parser;
use std::process::ExitCode;
use tracing::Level;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else if cli.quiet {
        Level::ERROR
    } else {
        Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    handlers::register_builtin();

    let formatter = output::create_formatter(cli.json, cli.verbose, cli.quiet);

    let result = match &cli.command {
        cli::Commands::Compress(args) => commands::compress::execute(args, &*formatter),
        cli::Commands::Extract(args) => {
            commands::extract::execute(args, &*formatter, cli.quiet || cli.json)
        }
        cli::Commands::List(args) => commands::list::execute(args, &*formatter),
        cli::Commands::Detect(args) => commands::detect::execute(args, &*formatter),
        cli::Commands::Completion { shell } => {
            commands::completion::execute(*shell);
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "command failed");
            eprintln!("Error: {err:?}");
            ExitCode::FAILURE
        }
    }
}
