use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A complete PlantUML document ready for the rendering tool.
///
/// Invariant: the text begins with exactly one `@startuml` line and ends
/// with exactly one `@enduml` line. The only way to build one is to wrap a
/// marker-free body, so the invariant holds by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramDocument(String);

impl DiagramDocument {
    pub const START_MARKER: &'static str = "@startuml";
    pub const END_MARKER: &'static str = "@enduml";

    /// Wrap a marker-free diagram body into a well-formed document.
    ///
    /// The body must already be cleaned (no marker tokens, trimmed);
    /// the normalizer is responsible for that.
    pub fn wrap(body: &str) -> Self {
        Self(format!(
            "{}\n{}\n{}",
            Self::START_MARKER,
            body,
            Self::END_MARKER
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The diagram body between the marker lines.
    pub fn body(&self) -> &str {
        self.0
            .trim_start_matches(Self::START_MARKER)
            .trim_end_matches(Self::END_MARKER)
            .trim_matches('\n')
    }
}

impl fmt::Display for DiagramDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Handle to the image file produced by the rendering tool.
///
/// Created by a renderer after the run that produced it has been validated;
/// never re-used across runs (each run overwrites or creates anew).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedArtifact {
    pub path: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_produces_one_marker_pair() {
        let doc = DiagramDocument::wrap("start\nstop");
        assert_eq!(doc.as_str(), "@startuml\nstart\nstop\n@enduml");
        assert_eq!(doc.as_str().matches("@startuml").count(), 1);
        assert_eq!(doc.as_str().matches("@enduml").count(), 1);
    }

    #[test]
    fn body_strips_markers_only() {
        let doc = DiagramDocument::wrap("start\n:A;\nstop");
        assert_eq!(doc.body(), "start\n:A;\nstop");
    }
}
