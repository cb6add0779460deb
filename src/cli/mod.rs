//! CLI argument parsing for deslang.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Deslang: Human-in-the-loop builder for a slang-to-plain-English corpus.
///
/// The workflow has two halves:
/// - `convert` turns a slang dataset (CSV) into ready-to-send prompts
/// - `review` sends each prompt to a model and lets you accept or reject
///   every translation before it lands in the corpus
#[derive(Parser, Debug)]
#[command(name = "deslang")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for deslang.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Convert a slang dataset into prompt and example artifacts.
    ///
    /// Reads the CSV dataset and writes one prompt per record plus a
    /// parallel file of the original example sentences.
    Convert(ConvertArgs),

    /// Review model translations interactively.
    ///
    /// Fetches a translation for each prompt, shows it next to the
    /// original example, and appends accepted pairs to the corpus.
    /// Interrupting with Ctrl-C saves buffered work before exiting.
    Review(ReviewArgs),

    /// Show the state of the generated artifacts and the corpus.
    ///
    /// Reports prompt/example counts, corpus size, and anything that
    /// needs attention before a review session.
    Status(StatusArgs),
}

/// Arguments for the `convert` command.
#[derive(Parser, Debug)]
pub struct ConvertArgs {
    /// Slang dataset CSV to read.
    #[arg(long, default_value = "all_slangs.csv")]
    pub dataset: PathBuf,

    /// Where to write the generated prompts.
    #[arg(long, default_value = "genz_prompts.json")]
    pub prompts: PathBuf,

    /// Where to write the original example sentences.
    #[arg(long, default_value = "original_examples.json")]
    pub examples: PathBuf,
}

/// Arguments for the `review` command.
#[derive(Parser, Debug)]
pub struct ReviewArgs {
    /// Prompt artifact produced by `convert`.
    #[arg(long, default_value = "genz_prompts.json")]
    pub prompts: PathBuf,

    /// Example artifact produced by `convert`.
    #[arg(long, default_value = "original_examples.json")]
    pub examples: PathBuf,

    /// Corpus file that accepted pairs are appended to.
    #[arg(long, default_value = "normal_data.json")]
    pub corpus: PathBuf,

    /// Zero-based prompt index to resume from.
    #[arg(long, default_value_t = 0)]
    pub start: usize,

    /// Cloudflare account id. Overrides the config file.
    #[arg(long)]
    pub account_id: Option<String>,

    /// Model identifier. Overrides the config file.
    #[arg(long)]
    pub model: Option<String>,

    /// API token. Read from the configured environment variable when omitted.
    #[arg(long)]
    pub token: Option<String>,

    /// Path to a config file (default: deslang.yaml if present).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Delay between retry attempts in milliseconds. Overrides the config file.
    #[arg(long)]
    pub retry_delay_ms: Option<u64>,

    /// Cap on retries per prompt. Unset retries forever.
    #[arg(long)]
    pub max_retries: Option<u32>,

    /// Clear the screen between prompts.
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub clear: bool,
}

/// Arguments for the `status` command.
#[derive(Parser, Debug)]
pub struct StatusArgs {
    /// Prompt artifact produced by `convert`.
    #[arg(long, default_value = "genz_prompts.json")]
    pub prompts: PathBuf,

    /// Example artifact produced by `convert`.
    #[arg(long, default_value = "original_examples.json")]
    pub examples: PathBuf,

    /// Corpus file that accepted pairs are appended to.
    #[arg(long, default_value = "normal_data.json")]
    pub corpus: PathBuf,
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
