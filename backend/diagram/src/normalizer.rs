//! Document normalization.
//!
//! Models routinely emit their own `@startuml`/`@enduml` markers: none at
//! all, one pair, or several. The renderer needs exactly one pair, so every
//! marker token is stripped from the body before it is re-wrapped.

use once_cell::sync::Lazy;
use regex::Regex;

use umlforge_core::{DiagramDocument, NormalizeError};

/// Runs of blank lines left behind where marker-only lines stood.
static BLANK_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());

/// Build a well-formed document from an extracted diagram body.
///
/// Strips every occurrence of the begin and end marker tokens (exact token
/// match, anywhere in the text), collapses the blank-line runs stripping
/// leaves behind, trims, and wraps the result in a single marker pair.
/// Idempotent: normalizing an already-normalized document yields an
/// equivalent document.
pub fn normalize(body: &str) -> Result<DiagramDocument, NormalizeError> {
    let stripped = body
        .replace(DiagramDocument::START_MARKER, "")
        .replace(DiagramDocument::END_MARKER, "");
    let collapsed = BLANK_RUN.replace_all(&stripped, "\n\n");
    let cleaned = collapsed.trim();

    if cleaned.is_empty() {
        return Err(NormalizeError::EmptyBody);
    }

    Ok(DiagramDocument::wrap(cleaned))
}
