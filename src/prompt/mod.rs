//! Prompt construction from slang records.
//!
//! Each record renders through a fixed instruction template into one
//! self-contained prompt for the generation service, paired with the
//! record's original example sentence. The two output sequences stay
//! index-aligned: `prompts[i]` and `examples[i]` always describe the
//! same record.

mod template;

pub use template::{TemplateError, render_template, vars};

use crate::dataset::SlangRecord;
use crate::error::{DeslangError, Result};

/// Instruction template sent to the generation service, one render per record.
///
/// The model is told to answer with a JSON object whose single key
/// `response` holds the rewritten sentence; the review loop depends on
/// that shape when decoding replies.
pub const PROMPT_TEMPLATE: &str = r#"You are a professional Gen Z slang translator. Your task is to translate Gen Z slang into plain, formal English.

You will be provided with the following information:
- **Word**: The slang term or phrase.
- **Definition**: A brief explanation of what the slang means.
- **Example**: A sentence that demonstrates how the slang is used.
- **Context**: Additional information about how or where this slang is typically used.

Your job:
1. Carefully analyze the information provided.
2. Rewrite the example sentence in plain, formal English while preserving its original meaning.
3. Avoid including any slang or casual expressions in your response.

---

**Word**: {word}
**Definition**: {definition}
**Example**: "{example}"
**Context**: {context}

**Your Response**: Rewrite the example sentence in plain, formal English. Your response should be in the JSON format, and the key 'response' should contain the rewritten sentence."#;

/// The two index-aligned sequences produced from a dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptSet {
    /// Rendered prompts, one per record.
    pub prompts: Vec<String>,
    /// Original example sentences, one per record, same order.
    pub examples: Vec<String>,
}

/// Render every record into a prompt and collect the original examples.
///
/// Deterministic: the same records always produce byte-identical prompts.
pub fn build_prompts(records: &[SlangRecord]) -> Result<PromptSet> {
    let mut prompts = Vec::with_capacity(records.len());
    let mut examples = Vec::with_capacity(records.len());

    for record in records {
        let rendered = render_template(PROMPT_TEMPLATE, &record_vars(record))
            .map_err(|e| DeslangError::UserError(format!("prompt template error: {}", e)))?;
        prompts.push(rendered);
        examples.push(record.example.clone());
    }

    Ok(PromptSet { prompts, examples })
}

fn record_vars(record: &SlangRecord) -> std::collections::HashMap<String, String> {
    vars([
        ("word", record.word.as_str()),
        ("definition", record.definition.as_str()),
        ("example", record.example.as_str()),
        ("context", record.context.as_str()),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(word: &str, definition: &str, example: &str, context: &str) -> SlangRecord {
        SlangRecord {
            word: word.to_string(),
            definition: definition.to_string(),
            example: example.to_string(),
            context: context.to_string(),
        }
    }

    #[test]
    fn test_builds_one_prompt_and_example_per_record() {
        let records = vec![
            record("rizz", "charisma", "He's got rizz.", "dating slang"),
            record("mid", "mediocre", "That movie was mid.", "criticism"),
            record("bet", "agreement", "Bet, see you there.", "confirmation"),
        ];

        let set = build_prompts(&records).unwrap();

        assert_eq!(set.prompts.len(), 3);
        assert_eq!(set.examples.len(), 3);
    }

    #[test]
    fn test_prompt_embeds_all_record_fields() {
        let records = vec![record("rizz", "charisma", "He's got rizz.", "dating slang")];

        let set = build_prompts(&records).unwrap();

        let prompt = &set.prompts[0];
        assert!(prompt.contains("**Word**: rizz"));
        assert!(prompt.contains("**Definition**: charisma"));
        assert!(prompt.contains("**Example**: \"He's got rizz.\""));
        assert!(prompt.contains("**Context**: dating slang"));
    }

    #[test]
    fn test_prompt_instructs_json_output_with_response_key() {
        let records = vec![record("bet", "agreement", "Bet.", "confirmation")];

        let set = build_prompts(&records).unwrap();

        assert!(set.prompts[0].contains("JSON format"));
        assert!(set.prompts[0].contains("'response'"));
    }

    #[test]
    fn test_examples_stay_index_aligned_with_prompts() {
        let records = vec![
            record("a", "first", "example one", "c1"),
            record("b", "second", "example two", "c2"),
        ];

        let set = build_prompts(&records).unwrap();

        assert_eq!(set.examples, vec!["example one", "example two"]);
        assert!(set.prompts[0].contains("example one"));
        assert!(set.prompts[1].contains("example two"));
    }

    #[test]
    fn test_build_is_deterministic() {
        let records = vec![record("sus", "suspicious", "That's sus.", "gaming")];

        let first = build_prompts(&records).unwrap();
        let second = build_prompts(&records).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_dataset_builds_empty_set() {
        let set = build_prompts(&[]).unwrap();
        assert!(set.prompts.is_empty());
        assert!(set.examples.is_empty());
    }

    #[test]
    fn test_template_has_no_stray_placeholders() {
        // Every placeholder in the fixed template must be one of the four
        // record fields, otherwise rendering would fail at runtime.
        let records = vec![record("w", "d", "e", "c")];
        assert!(build_prompts(&records).is_ok());
    }
}
