//! Defensive unwrapping of Gemini plan text. The model is asked for a JSON
//! array of days but routinely wraps it in markdown fences or surrounding
//! prose; this module pulls the first top-level array literal back out with
//! an explicit success/failure result instead of inline exception handling.

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractError {
    #[error("no JSON array found in model output")]
    NoArray,

    #[error("failed to parse extracted JSON: {0}")]
    Parse(String),

    #[error("model output parsed as JSON but is not an array")]
    NotAnArray,
}

/// Extracts the roadmap array from raw model text.
///
/// Fast path: the whole (fence-stripped) text parses as a JSON array.
/// Fallback: locate the first balanced top-level `[...]` literal, honoring
/// JSON string and escape rules, and parse that slice. Anything else is an
/// explicit error; malformed output must never flow onward as an empty
/// roadmap.
pub fn extract_json_array(text: &str) -> Result<Value, ExtractError> {
    let stripped = strip_json_fences(text);

    if let Ok(value) = serde_json::from_str::<Value>(stripped) {
        return match value {
            Value::Array(_) => Ok(value),
            // Whole-text JSON of another shape falls through to the scan;
            // an object may still wrap the array in prose-free form.
            _ => find_array_slice(stripped)
                .ok_or(ExtractError::NotAnArray)
                .and_then(parse_array_slice),
        };
    }

    find_array_slice(stripped)
        .ok_or(ExtractError::NoArray)
        .and_then(parse_array_slice)
}

fn parse_array_slice(slice: &str) -> Result<Value, ExtractError> {
    match serde_json::from_str::<Value>(slice) {
        Ok(value @ Value::Array(_)) => Ok(value),
        Ok(_) => Err(ExtractError::NotAnArray),
        Err(e) => Err(ExtractError::Parse(e.to_string())),
    }
}

/// Finds the first balanced `[...]` region, tracking string literals so
/// brackets inside quoted values do not unbalance the scan.
fn find_array_slice(text: &str) -> Option<&str> {
    let start = text.find('[')?;

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '[' => depth += 1,
            ']' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + ch.len_utf8()]);
                }
            }
            _ => {}
        }
    }

    None
}

/// Strips ```json ... ``` or ``` ... ``` code fences from model output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}
