//! Deslang: Convert a slang dataset into LLM prompts and review the
//! generated translations into a training corpus.
//!
//! This is the main entry point for the `deslang` CLI. It parses arguments,
//! dispatches to the appropriate command handler, and handles errors with
//! proper exit codes.

mod cli;
mod commands;
pub mod artifact;
pub mod config;
pub mod corpus;
pub mod dataset;
pub mod error;
pub mod events;
pub mod exit_codes;
pub mod fs;
pub mod prompt;
pub mod review;
pub mod service;

#[cfg(test)]
mod test_support;

use cli::Cli;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    match commands::dispatch(cli.command) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            // Print user-actionable error message to stderr
            eprintln!("Error: {}", err);

            // Return appropriate exit code
            ExitCode::from(err.exit_code() as u8)
        }
    }
}
