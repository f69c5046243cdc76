//! Best-effort recovery of a JSON object embedded in free-form text.

use crate::error::StrategyError;
use serde_json::Value;

/// Balanced `{...}` spans, one per opening brace that closes, in order of their start.
///
/// Every `{` is tried as a start, so an unmatched brace or a stray quote in a
/// span that never closes does not hide a later object. Spans can nest.
pub fn object_candidates(text: &str) -> Vec<&str> {
    text.char_indices()
        .filter(|(_, ch)| *ch == '{')
        .filter_map(|(start, _)| balanced_span(text, start))
        .collect()
}

/// The span opened by the `{` at `start`, if it closes before the text ends.
///
/// Braces inside JSON string literals are ignored.
fn balanced_span(text: &str, start: usize) -> Option<&str> {
    let mut depth: u32 = 0;
    let mut in_string = false;
    let mut escape = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            if escape {
                escape = false;
                continue;
            }
            match ch {
                '\\' => escape = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..=start + offset]);
                }
            }
            _ => {}
        }
    }

    None
}

/// First embedded span that decodes as a JSON object.
pub fn first_object(text: &str) -> Result<Value, StrategyError> {
    let mut saw_span = false;
    let found = text
        .char_indices()
        .filter(|(_, ch)| *ch == '{')
        .filter_map(|(start, _)| balanced_span(text, start))
        .inspect(|_| saw_span = true)
        .filter_map(|candidate| serde_json::from_str::<Value>(candidate).ok())
        .find(Value::is_object);

    match found {
        Some(value) => Ok(value),
        None if saw_span => Err(StrategyError::ExtractionFailure(
            "no embedded object decoded as JSON".to_string(),
        )),
        None => Err(StrategyError::ExtractionFailure(
            "no brace-delimited object in response".to_string(),
        )),
    }
}
