//! Template engine for variable substitution.
//!
//! Performs `{variable}` substitution in strings. `{{` and `}}` render as
//! literal braces. Undefined variables are an error rather than a silent
//! empty substitution, so a typo in a placeholder name cannot produce a
//! subtly broken prompt.

use std::collections::HashMap;
use thiserror::Error;

/// Error type for template rendering failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// A variable was referenced but not provided.
    #[error("undefined variable '{name}' at position {position} in template")]
    UndefinedVariable { name: String, position: usize },

    /// A `{` was found without a matching `}`.
    #[error("unmatched '{{' at position {position} in template")]
    UnmatchedBrace { position: usize },

    /// An empty placeholder (`{}`) was found.
    #[error("empty variable name at position {position} in template")]
    EmptyVariableName { position: usize },
}

/// Render a template string by substituting `{variable}` placeholders.
///
/// Placeholder names are trimmed, so `{ word }` and `{word}` are equivalent.
pub fn render_template(
    template: &str,
    variables: &HashMap<String, String>,
) -> Result<String, TemplateError> {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.char_indices().peekable();

    while let Some((pos, ch)) = chars.next() {
        if ch == '{' {
            if let Some((_, '{')) = chars.peek() {
                chars.next();
                out.push('{');
                continue;
            }

            let mut name = String::new();
            loop {
                match chars.next() {
                    Some((_, '}')) => break,
                    Some((_, c)) => name.push(c),
                    None => return Err(TemplateError::UnmatchedBrace { position: pos }),
                }
            }

            let name = name.trim();
            if name.is_empty() {
                return Err(TemplateError::EmptyVariableName { position: pos });
            }
            match variables.get(name) {
                Some(value) => out.push_str(value),
                None => {
                    return Err(TemplateError::UndefinedVariable {
                        name: name.to_string(),
                        position: pos,
                    });
                }
            }
        } else if ch == '}' {
            // A lone } is literal; }} collapses to one
            if let Some((_, '}')) = chars.peek() {
                chars.next();
            }
            out.push('}');
        } else {
            out.push(ch);
        }
    }

    Ok(out)
}

/// Build a variables map from key-value pairs.
pub fn vars<I, K, V>(pairs: I) -> HashMap<String, String>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}
