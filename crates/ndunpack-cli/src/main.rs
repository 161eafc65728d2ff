//! ndunpack CLI - Command-line utility for idempotent unpacking of native
//! dependency artifacts.

mod cli;
mod commands;
mod error;
mod logging;
mod output;
mod progress;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();

    let level = if cli.verbose {
        logging::LogLevel::Debug
    } else {
        cli.log_level
    };
    if let Err(err) = logging::init(cli.log_format, level) {
        eprintln!("warning: {err:#}");
    }

    let formatter = output::create_formatter(cli.json, cli.verbose, cli.quiet);

    match run(&cli, &*formatter) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            formatter.format_error(&err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &cli::Cli, formatter: &dyn output::OutputFormatter) -> Result<()> {
    match &cli.command {
        cli::Commands::Unpack(args) => {
            let show_progress = !cli.quiet && !cli.json && progress::CliProgress::should_show();
            commands::unpack::execute(args, formatter, show_progress)
        }
        cli::Commands::Status(args) => commands::status::execute(args, formatter),
        cli::Commands::Types(args) => commands::types::execute(args, formatter),
        cli::Commands::Completion(args) => {
            commands::completion::execute(args.shell);
            Ok(())
        }
    }
}
