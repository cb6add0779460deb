//! Command implementations for deslang.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations. Each command lives in its own submodule.

mod convert;
mod review;
mod status;

use crate::cli::Command;
use crate::error::Result;

/// Dispatch a command to its implementation.
///
/// This is the main entry point for command execution. Each command
/// is routed to its handler function.
pub fn dispatch(command: Command) -> Result<()> {
    match command {
        Command::Convert(args) => convert::cmd_convert(args),
        Command::Review(args) => review::cmd_review(args),
        Command::Status(args) => status::cmd_status(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{ConvertArgs, ReviewArgs, StatusArgs};
    use tempfile::TempDir;

    #[test]
    fn dispatch_routes_convert() {
        let dir = TempDir::new().unwrap();
        let dataset = dir.path().join("slangs.csv");
        std::fs::write(
            &dataset,
            "Slang,Description,Example,Context\n\
             rizz,charisma,He has rizz.,informal\n",
        )
        .unwrap();

        let args = ConvertArgs {
            dataset,
            prompts: dir.path().join("prompts.json"),
            examples: dir.path().join("examples.json"),
        };

        dispatch(Command::Convert(args)).unwrap();
        assert!(dir.path().join("prompts.json").exists());
        assert!(dir.path().join("examples.json").exists());
    }

    #[test]
    fn dispatch_routes_status() {
        let dir = TempDir::new().unwrap();
        let args = StatusArgs {
            prompts: dir.path().join("prompts.json"),
            examples: dir.path().join("examples.json"),
            corpus: dir.path().join("corpus.json"),
        };

        assert!(dispatch(Command::Status(args)).is_ok());
    }

    #[test]
    fn dispatch_routes_review_and_surfaces_artifact_errors() {
        let dir = TempDir::new().unwrap();
        let args = ReviewArgs {
            prompts: dir.path().join("absent.json"),
            examples: dir.path().join("absent.json"),
            corpus: dir.path().join("corpus.json"),
            start: 0,
            account_id: None,
            model: None,
            token: None,
            config: None,
            retry_delay_ms: None,
            max_retries: None,
            clear: true,
        };

        let err = dispatch(Command::Review(args)).unwrap_err();
        assert!(err.to_string().contains("deslang convert"));
    }
}
