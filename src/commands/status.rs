//! Implementation of the `deslang status` command.
//!
//! Reports the state of the convert artifacts and the corpus without
//! touching the network, so the operator can see what a review session
//! would pick up before starting one.

use crate::artifact::{self, ArtifactState};
use crate::cli::StatusArgs;
use crate::corpus::{self, CorpusCondition};
use crate::error::Result;
use std::path::Path;

/// Execute the `deslang status` command.
///
/// Always succeeds; missing or broken files are reported, not errors.
pub fn cmd_status(args: StatusArgs) -> Result<()> {
    let prompts = artifact::inspect(&args.prompts);
    let examples = artifact::inspect(&args.examples);

    let (corpus_line, corpus_corrupt) = match corpus::read(&args.corpus) {
        Ok((entries, CorpusCondition::Readable)) => (
            format!("{} entries ({})", entries.len(), args.corpus.display()),
            false,
        ),
        Ok((_, CorpusCondition::Missing)) => (
            format!(
                "missing ({}) - created by the first flush",
                args.corpus.display()
            ),
            false,
        ),
        Ok((_, CorpusCondition::Corrupt)) => {
            (format!("unparseable ({})", args.corpus.display()), true)
        }
        Err(e) => (format!("unreadable: {}", e), false),
    };

    // Print header
    println!("Deslang Status");
    println!("==============");
    println!();

    println!("Artifacts:");
    println!("  Prompts:   {}", describe_artifact(prompts, &args.prompts));
    println!(
        "  Examples:  {}",
        describe_artifact(examples, &args.examples)
    );
    println!();
    println!("Corpus:");
    println!("  Entries:   {}", corpus_line);
    println!();

    // Collect issues to highlight
    let mut issues: Vec<String> = Vec::new();

    if matches!(prompts, ArtifactState::Invalid) {
        issues.push(format!(
            "prompt artifact '{}' is not a JSON string array",
            args.prompts.display()
        ));
    }
    if matches!(examples, ArtifactState::Invalid) {
        issues.push(format!(
            "example artifact '{}' is not a JSON string array",
            args.examples.display()
        ));
    }
    if let (ArtifactState::Loaded(p), ArtifactState::Loaded(e)) = (prompts, examples)
        && p != e
    {
        issues.push(format!(
            "artifact lengths differ ({} prompts vs {} examples); review will refuse to start",
            p, e
        ));
    }
    if corpus_corrupt {
        issues.push(
            "corpus is unparseable; the next review flush will replace it with session data"
                .to_string(),
        );
    }

    if !issues.is_empty() {
        println!("Highlights:");
        for issue in &issues {
            println!("  - {}", issue);
        }
        println!();
    }

    // Print helpful next steps
    println!("Commands:");
    match (prompts, examples) {
        (ArtifactState::Loaded(p), ArtifactState::Loaded(e)) if p == e && p > 0 => {
            println!("  deslang review  - Start or resume a review session");
        }
        _ => {
            println!("  deslang convert - Generate the artifacts from the dataset");
        }
    }

    Ok(())
}

fn describe_artifact(state: ArtifactState, path: &Path) -> String {
    match state {
        ArtifactState::Missing => format!("missing ({})", path.display()),
        ArtifactState::Loaded(n) => format!("{} entries ({})", n, path.display()),
        ArtifactState::Invalid => format!("invalid ({})", path.display()),
    }
}
