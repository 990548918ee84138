mod cli;
mod config;
mod diff_cmd;
mod format_cmd;
mod inspect_cmd;
mod logging;
mod sweep_cmd;
mod validate_cmd;

use std::process;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match run(cli.command) {
        Ok(status) => process::exit(status),
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(1);
        }
    }
}

/// Run a subcommand and return the process exit status.
fn run(command: Command) -> Result<i32> {
    match command {
        Command::Validate(args) => validate_cmd::run(args),
        Command::Format(args) => format_cmd::run(args).map(|()| 0),
        Command::Diff(args) => diff_cmd::run(args).map(|()| 0),
        Command::Sweep(args) => sweep_cmd::run(args).map(|()| 0),
        Command::Inspect(args) => inspect_cmd::run(args).map(|()| 0),
    }
}
