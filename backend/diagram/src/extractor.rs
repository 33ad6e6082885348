//! Fenced-block extraction from free-form model output.
//!
//! The model is *asked* (not guaranteed) to return its diagram inside a
//! ```` ```plantuml … ``` ```` fence. The response is unstructured text, so
//! isolation is a pattern match over it, not a parse.

use once_cell::sync::Lazy;
use regex::Regex;

use umlforge_core::ExtractError;

/// First fenced plantuml region, non-greedy, spanning newlines.
static FENCE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```plantuml(.*?)```").unwrap());

/// Isolate the first fenced plantuml block from a model response.
///
/// Later fenced regions are ignored (first-match policy). The captured body
/// is trimmed, and any stray fence tokens left inside it (artifacts of the
/// model nesting fences in its own example formatting) are stripped.
pub fn extract(text: &str) -> Result<String, ExtractError> {
    let caps = FENCE_PATTERN.captures(text).ok_or(ExtractError::NotFound)?;
    let body = caps[1].trim().replace("```", "");
    Ok(body.trim().to_string())
}
