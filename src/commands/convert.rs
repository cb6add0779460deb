//! Implementation of the `deslang convert` command.
//!
//! Reads the slang CSV and writes the two index-aligned artifacts the
//! review loop consumes: a JSON array of rendered prompts and a JSON
//! array of the original example sentences.

use crate::artifact;
use crate::cli::ConvertArgs;
use crate::dataset;
use crate::error::Result;
use crate::prompt;

/// Execute the `deslang convert` command.
pub fn cmd_convert(args: ConvertArgs) -> Result<()> {
    let records = dataset::load_records(&args.dataset)?;
    let set = prompt::build_prompts(&records)?;

    artifact::save(&args.prompts, &set.prompts)?;
    artifact::save(&args.examples, &set.examples)?;

    // Print success message
    println!(
        "Converted {} records from '{}'.",
        records.len(),
        args.dataset.display()
    );
    println!();
    println!("  Prompts:  {}", args.prompts.display());
    println!("  Examples: {}", args.examples.display());
    println!();
    println!("Next steps:");
    println!("  1. Export your API token (default variable: CLOUDFLARE_API_TOKEN)");
    println!("  2. Run `deslang review --account-id <id>` to review translations");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exit_codes;
    use tempfile::TempDir;

    fn convert_args(dir: &TempDir, dataset: &str) -> ConvertArgs {
        ConvertArgs {
            dataset: dir.path().join(dataset),
            prompts: dir.path().join("prompts.json"),
            examples: dir.path().join("examples.json"),
        }
    }

    #[test]
    fn test_convert_writes_aligned_artifacts() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("slangs.csv"),
            "Slang,Description,Example,Context\n\
             rizz,charisma,He's got rizz.,dating slang\n\
             mid,mediocre,That movie was mid.,criticism\n",
        )
        .unwrap();

        cmd_convert(convert_args(&dir, "slangs.csv")).unwrap();

        let prompts = artifact::load(dir.path().join("prompts.json")).unwrap();
        let examples = artifact::load(dir.path().join("examples.json")).unwrap();
        assert_eq!(prompts.len(), 2);
        assert_eq!(examples, vec!["He's got rizz.", "That movie was mid."]);
        assert!(prompts[0].contains("**Word**: rizz"));
        assert!(prompts[1].contains("That movie was mid."));
    }

    #[test]
    fn test_convert_missing_dataset_is_a_user_error() {
        let dir = TempDir::new().unwrap();

        let err = cmd_convert(convert_args(&dir, "absent.csv")).unwrap_err();

        assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
    }

    #[test]
    fn test_convert_bad_row_reports_dataset_format() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("slangs.csv"),
            "Slang,Description,Example,Context\n\
             rizz,charisma\n",
        )
        .unwrap();

        let err = cmd_convert(convert_args(&dir, "slangs.csv")).unwrap_err();

        assert_eq!(err.exit_code(), exit_codes::DATA_FORMAT_FAILURE);
        assert!(err.to_string().contains("row 2"));
    }

    #[test]
    fn test_convert_empty_dataset_writes_empty_artifacts() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("slangs.csv"),
            "Slang,Description,Example,Context\n",
        )
        .unwrap();

        cmd_convert(convert_args(&dir, "slangs.csv")).unwrap();

        let prompts = artifact::load(dir.path().join("prompts.json")).unwrap();
        let examples = artifact::load(dir.path().join("examples.json")).unwrap();
        assert!(prompts.is_empty());
        assert!(examples.is_empty());
    }
}
