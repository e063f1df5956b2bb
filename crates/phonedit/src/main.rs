//! `phonedit` - look up, search and type IPA characters from the terminal.
//!
//! Run with: cargo run -p phonedit -- <command>

mod cli;
mod commands;
mod output;

use std::io::Write;
use std::process::ExitCode;

use clap::Parser;

use crate::cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .init();

    match commands::run(&cli) {
        Ok(output) => {
            let mut stdout = std::io::stdout().lock();
            if let Err(err) = stdout.write_all(output.as_bytes()) {
                log::debug!("failed to write output: {}", err);
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("phonedit: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
