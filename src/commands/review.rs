//! Implementation of the `deslang review` command.
//!
//! Loads the artifacts, resolves configuration (flags over file over
//! defaults), installs the Ctrl-C handler, and hands off to the
//! interactive session.

use crate::artifact;
use crate::cli::ReviewArgs;
use crate::config::Config;
use crate::corpus::ReviewBuffer;
use crate::error::{DeslangError, Result};
use crate::events::{EventLog, ReviewAction, ReviewEvent};
use crate::exit_codes;
use crate::review::{self, ReviewSession, RetryPolicy, StdinDecisions};
use crate::service::WorkersAiClient;
use colored::Colorize;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Execute the `deslang review` command.
pub fn cmd_review(args: ReviewArgs) -> Result<()> {
    let prompts = artifact::load(&args.prompts)?;
    let examples = artifact::load(&args.examples)?;
    validate_artifacts(prompts.len(), examples.len(), args.start)?;

    let config = Config::resolve(args.config.as_deref())?;

    let account_id = resolve_account_id(args.account_id, &config)?;
    let model = args.model.unwrap_or_else(|| config.model.clone());
    let token = resolve_token(args.token, &config.token_env)?;

    let retry = RetryPolicy {
        delay: Duration::from_millis(args.retry_delay_ms.unwrap_or(config.retry_delay_ms)),
        max_retries: args.max_retries.or(config.max_retries),
    };

    let client = WorkersAiClient::new(
        &config.api_base,
        &account_id,
        &model,
        token,
        config.request_timeout_secs,
    )?;

    let buffer = Arc::new(Mutex::new(ReviewBuffer::new()));
    let log = EventLog::beside_corpus(&args.corpus);

    install_interrupt_handler(Arc::clone(&buffer), args.corpus.clone(), log.clone())?;

    println!(
        "Reviewing {} prompts with {} (starting at index {}).",
        prompts.len(),
        model,
        args.start
    );
    println!();

    let session = ReviewSession::new(
        client,
        StdinDecisions,
        buffer,
        args.corpus.clone(),
        log,
        retry,
    )
    .with_start_index(args.start)
    .with_screen_clearing(args.clear);

    let summary = session.run(&prompts, &examples)?;

    println!();
    println!("Review finished.");
    println!();
    println!("  Accepted:     {}", summary.accepted);
    println!("  Rejected:     {}", summary.rejected);
    println!("  Retries:      {}", summary.retries);
    println!("  Corpus size:  {} entries", summary.corpus_total);

    Ok(())
}

/// Flush the shared buffer and exit cleanly when the operator interrupts.
///
/// An interrupt is a normal way to end a session, so the process exits
/// with the success code once buffered work is on disk.
fn install_interrupt_handler(
    buffer: Arc<Mutex<ReviewBuffer>>,
    corpus_path: PathBuf,
    log: EventLog,
) -> Result<()> {
    ctrlc::set_handler(move || {
        println!("\n{}", "Script interrupted. Saving data...".red());
        let _ = review::flush_and_report(&buffer, &corpus_path, &log, None);
        let _ = log.append(&ReviewEvent::new(ReviewAction::Interrupt));
        std::process::exit(exit_codes::SUCCESS);
    })
    .map_err(|e| DeslangError::UserError(format!("failed to install interrupt handler: {}", e)))
}

/// Prompt and example artifacts must pair up, and the start index must
/// stay within the list (equal to the length resumes an empty tail).
fn validate_artifacts(prompts: usize, examples: usize, start: usize) -> Result<()> {
    if prompts != examples {
        return Err(DeslangError::UserError(format!(
            "artifact length mismatch: {} prompts vs {} examples. Re-run `deslang convert` to regenerate both.",
            prompts, examples
        )));
    }
    if start > prompts {
        return Err(DeslangError::UserError(format!(
            "--start {} is out of range for {} prompts",
            start, prompts
        )));
    }
    Ok(())
}

fn resolve_account_id(flag: Option<String>, config: &Config) -> Result<String> {
    if let Some(id) = flag {
        return Ok(id);
    }
    if !config.account_id.trim().is_empty() {
        return Ok(config.account_id.clone());
    }
    Err(DeslangError::UserError(
        "no account id configured; pass --account-id or set account_id in deslang.yaml".to_string(),
    ))
}

fn resolve_token(flag: Option<String>, token_env: &str) -> Result<String> {
    if let Some(token) = flag {
        return Ok(token);
    }
    std::env::var(token_env).map_err(|_| {
        DeslangError::UserError(format!(
            "no API token found; pass --token or set the {} environment variable",
            token_env
        ))
    })
}
