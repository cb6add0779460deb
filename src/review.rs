//! The interactive review session.
//!
//! One session walks the prompt list in order. For each prompt it fetches
//! a translation (retrying service failures with a fixed delay), shows the
//! original example next to the translation, and asks the operator whether
//! to keep it. Every attempt is buffered and flushed to the corpus before
//! the session moves on, so the on-disk corpus is current after each
//! answer, not just at the end.
//!
//! Buffer lifecycle: an attempt enters the shared buffer once a decision
//! arrives, and the buffer is cleared only after an accepted attempt has
//! been flushed successfully. Rejections and failed flushes leave it in
//! place, so its content rides into the next flush (and into the interrupt
//! handler's flush) rather than being lost.

use crate::corpus::{self, FlushReport, ReviewBuffer};
use crate::error::{DeslangError, Result};
use crate::events::{EventLog, ReviewAction, ReviewEvent};
use crate::service::{GenerationResult, Generator};
use colored::Colorize;
use serde_json::json;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

/// Question shown for every fetched translation.
pub const DECISION_PROMPT: &str = "Save this prompt? (y/n): ";

/// The operator's verdict on one translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Accept,
    Reject,
}

impl Decision {
    /// Only a trimmed, case-insensitive `y` accepts. Everything else,
    /// including an empty line, rejects and refetches the prompt.
    pub fn parse(input: &str) -> Self {
        if input.trim().eq_ignore_ascii_case("y") {
            Self::Accept
        } else {
            Self::Reject
        }
    }
}

/// Where decisions come from. The live session reads stdin; tests script
/// the answers.
pub trait DecisionSource {
    fn next_decision(&mut self) -> Result<Decision>;
}

/// Reads decisions from standard input, one line per prompt.
pub struct StdinDecisions;

impl DecisionSource for StdinDecisions {
    fn next_decision(&mut self) -> Result<Decision> {
        print!("{}", DECISION_PROMPT.white());
        std::io::stdout()
            .flush()
            .map_err(|e| DeslangError::UserError(format!("failed to write to stdout: {}", e)))?;

        let mut line = String::new();
        let read = std::io::stdin()
            .read_line(&mut line)
            .map_err(|e| DeslangError::UserError(format!("failed to read from stdin: {}", e)))?;
        if read == 0 {
            return Err(DeslangError::UserError(
                "stdin closed while waiting for a decision".to_string(),
            ));
        }

        Ok(Decision::parse(&line))
    }
}

/// How service failures are retried.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Fixed delay between attempts.
    pub delay: Duration,
    /// Attempt cap per prompt. `None` retries forever.
    pub max_retries: Option<u32>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(1000),
            max_retries: None,
        }
    }
}

/// Counters reported when a session finishes normally.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    pub accepted: usize,
    pub rejected: usize,
    pub retries: usize,
    /// Corpus entry count after the last successful flush.
    pub corpus_total: usize,
}

/// Lock the shared buffer, recovering it if a panicking thread poisoned
/// the mutex. The buffer must stay reachable for the interrupt flush.
pub fn lock_buffer(buffer: &Mutex<ReviewBuffer>) -> MutexGuard<'_, ReviewBuffer> {
    buffer.lock().unwrap_or_else(|poison| poison.into_inner())
}

/// Flush the shared buffer to the corpus and tell the operator how it went.
///
/// Shared between the session loop and the interrupt handler so both
/// report persistence the same way. Returns `None` when the flush failed;
/// the failure is printed and logged but never escalated, since losing a
/// flush must not end the session.
pub fn flush_and_report(
    buffer: &Mutex<ReviewBuffer>,
    corpus_path: &Path,
    log: &EventLog,
    prompt_index: Option<usize>,
) -> Option<FlushReport> {
    let outcome = {
        let entries = lock_buffer(buffer);
        corpus::flush(corpus_path, entries.entries())
    };

    match outcome {
        Ok(report) => {
            if report.recovered {
                println!(
                    "{}",
                    format!(
                        "Warning: existing data at '{}' was unreadable and has been replaced.",
                        corpus_path.display()
                    )
                    .yellow()
                );
            }
            println!(
                "{}",
                format!(
                    "Data has been saved successfully to '{}'.",
                    corpus_path.display()
                )
                .green()
            );
            Some(report)
        }
        Err(err) => {
            println!("{}", format!("Error saving data: {}", err).red());
            let mut event = ReviewEvent::new(ReviewAction::FlushError)
                .with_details(json!({ "error": err.to_string() }));
            if let Some(index) = prompt_index {
                event = event.with_prompt(index);
            }
            log_event(log, event);
            None
        }
    }
}

/// Append an audit event, downgrading failures to a warning.
fn log_event(log: &EventLog, event: ReviewEvent) {
    if let Err(e) = log.append(&event) {
        eprintln!("Warning: failed to record {} event: {}", event.action, e);
    }
}

fn clear_screen() {
    print!("\x1b[2J\x1b[H");
    let _ = std::io::stdout().flush();
}

/// One fetch-review-persist pass over a prompt list.
pub struct ReviewSession<G: Generator, D: DecisionSource> {
    generator: G,
    decisions: D,
    buffer: Arc<Mutex<ReviewBuffer>>,
    corpus_path: PathBuf,
    log: EventLog,
    retry: RetryPolicy,
    start_index: usize,
    clear_screen: bool,
}

impl<G: Generator, D: DecisionSource> ReviewSession<G, D> {
    pub fn new(
        generator: G,
        decisions: D,
        buffer: Arc<Mutex<ReviewBuffer>>,
        corpus_path: PathBuf,
        log: EventLog,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            generator,
            decisions,
            buffer,
            corpus_path,
            log,
            retry,
            start_index: 0,
            clear_screen: true,
        }
    }

    /// Resume partway through the prompt list.
    pub fn with_start_index(mut self, index: usize) -> Self {
        self.start_index = index;
        self
    }

    /// Disable the between-prompts screen clear (used by tests and
    /// non-interactive terminals).
    pub fn with_screen_clearing(mut self, enabled: bool) -> Self {
        self.clear_screen = enabled;
        self
    }

    /// Run the session to completion.
    ///
    /// Ends with a closing flush whether or not anything was accepted, so
    /// the corpus file exists (and holds any entries a failed flush left
    /// behind) even for an empty run. Errors out only when the retry cap
    /// is exhausted or the decision source fails; the buffer is flushed
    /// before either return.
    pub fn run(mut self, prompts: &[String], examples: &[String]) -> Result<SessionSummary> {
        let total = prompts.len();
        debug_assert_eq!(total, examples.len());

        let mut summary = SessionSummary::default();

        log_event(
            &self.log,
            ReviewEvent::new(ReviewAction::SessionStart).with_details(json!({
                "total_prompts": total,
                "start_index": self.start_index,
            })),
        );

        let mut index = self.start_index;
        while index < total {
            let response = match self.fetch_with_retry(&prompts[index], &mut summary) {
                Ok(result) => result.response,
                Err(err) => {
                    self.flush_residual();
                    return Err(err);
                }
            };

            self.present(&examples[index], &response);

            let decision = match self.decisions.next_decision() {
                Ok(decision) => decision,
                Err(err) => {
                    self.flush_residual();
                    return Err(err);
                }
            };

            {
                let mut buffer = lock_buffer(&self.buffer);
                buffer.push_pair(examples[index].as_str(), response.as_str());
            }
            let report = flush_and_report(&self.buffer, &self.corpus_path, &self.log, Some(index));
            if let Some(report) = &report {
                summary.corpus_total = report.total;
            }

            match decision {
                Decision::Accept => {
                    // The attempt is only safe once flushed; after a failed
                    // flush it stays buffered for the next one.
                    if report.is_some() {
                        lock_buffer(&self.buffer).clear();
                    }
                    summary.accepted += 1;
                    log_event(
                        &self.log,
                        ReviewEvent::new(ReviewAction::Accept).with_prompt(index),
                    );
                    index += 1;
                    self.maybe_clear_screen();
                    println!("We are on prompt: {} / {}", index, total);
                }
                Decision::Reject => {
                    summary.rejected += 1;
                    log_event(
                        &self.log,
                        ReviewEvent::new(ReviewAction::Reject).with_prompt(index),
                    );
                    println!("{}", "Retrying this prompt...".red());
                    self.maybe_clear_screen();
                }
            }
        }

        if let Some(report) = flush_and_report(&self.buffer, &self.corpus_path, &self.log, None) {
            summary.corpus_total = report.total;
            lock_buffer(&self.buffer).clear();
        }

        log_event(
            &self.log,
            ReviewEvent::new(ReviewAction::SessionEnd).with_details(json!({
                "accepted": summary.accepted,
                "rejected": summary.rejected,
                "retries": summary.retries,
                "corpus_total": summary.corpus_total,
            })),
        );

        Ok(summary)
    }

    /// Fetch one translation, retrying failures at the policy's cadence.
    fn fetch_with_retry(
        &self,
        prompt: &str,
        summary: &mut SessionSummary,
    ) -> Result<GenerationResult> {
        let mut attempt: u32 = 0;
        loop {
            match self.generator.generate(prompt) {
                Ok(result) => return Ok(result),
                Err(err) => {
                    attempt += 1;
                    if let Some(cap) = self.retry.max_retries
                        && attempt > cap
                    {
                        return Err(err.into());
                    }
                    summary.retries += 1;
                    println!("{}", format!("Error with the AI model: {}", err).red());
                    println!("{}", "Retrying...".yellow());
                    std::thread::sleep(self.retry.delay);
                }
            }
        }
    }

    fn present(&self, example: &str, translation: &str) {
        println!("{} {}", "Original Example:".yellow(), example);
        println!("{} {}", "Translation:".green(), translation);
        println!();
    }

    /// Best-effort flush on an abnormal exit path.
    fn flush_residual(&self) {
        let _ = flush_and_report(&self.buffer, &self.corpus_path, &self.log, None);
    }

    fn maybe_clear_screen(&self) {
        if self.clear_screen {
            clear_screen();
        }
    }
}
