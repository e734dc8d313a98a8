//! Decoding untyped source responses into a [`SuggestionResult`].

use serde::{Deserialize, Serialize};

use crate::layout::Placement;

/// The structured answer expected from a suggestion source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SuggestionResult {
    pub placements: Vec<Placement>,
    pub rationale: String,
}

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("response does not contain a JSON object")]
    NoObject,
    #[error("response object is not a valid suggestion: {0}")]
    Json(#[from] serde_json::Error),
}

/// Returns the first top-level `{...}` block in `text`.
///
/// Braces inside JSON string literals are ignored. Returns `None` when no
/// opening brace is found or it is never closed.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, c) in text[start..].char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + 1]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Extracts and decodes the suggestion carried by a raw response.
pub fn decode_suggestion(text: &str) -> Result<SuggestionResult, DecodeError> {
    let object = extract_json_object(text).ok_or(DecodeError::NoObject)?;
    Ok(serde_json::from_str(object)?)
}
