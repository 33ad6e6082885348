//! Pipeline orchestrator: model → extract → normalize → render.
//!
//! Fully sequential, one run at a time. The fixed document/artifact paths
//! make concurrent runs race; callers must not invoke this in parallel
//! without relocating those paths first.

use anyhow::{Context, Result};
use tracing::{info, warn};

use umlforge_core::{
    DiagramRenderer, ExtractError, ModelProvider, NormalizeError, RenderedArtifact,
};
use umlforge_model::build_request;

/// Final outcome of one pipeline run.
///
/// A response with no usable diagram ends the run gracefully; only model
/// and render failures are errors. No stage retries; a caller wanting
/// resilience re-invokes the whole pipeline.
#[derive(Debug)]
pub enum PipelineOutcome {
    /// The artifact was rendered and validated.
    Rendered(RenderedArtifact),
    /// The response carried no fenced diagram block.
    NoDiagram,
    /// The extracted block was empty after cleanup.
    EmptyDiagram,
}

/// Run source text through the full pipeline.
pub async fn run(
    source: &str,
    model: &str,
    provider: &dyn ModelProvider,
    renderer: &dyn DiagramRenderer,
) -> Result<PipelineOutcome> {
    let request = build_request(source, model);
    let response = provider
        .complete(&request)
        .await
        .with_context(|| format!("model request to {} failed", provider.name()))?;

    info!(
        provider = %response.provider,
        model = %response.model,
        tokens = response.tokens_used,
        latency_ms = response.latency_ms,
        "Model response received"
    );

    let body = match umlforge_diagram::extract(&response.content) {
        Ok(body) => body,
        Err(ExtractError::NotFound) => {
            warn!("No diagram block found in the model response");
            return Ok(PipelineOutcome::NoDiagram);
        }
    };

    let doc = match umlforge_diagram::normalize(&body) {
        Ok(doc) => doc,
        Err(NormalizeError::EmptyBody) => {
            warn!("Diagram block was empty after cleanup");
            return Ok(PipelineOutcome::EmptyDiagram);
        }
    };

    info!(document = %doc, "Normalized diagram document");

    let artifact = renderer.render(&doc).await?;
    Ok(PipelineOutcome::Rendered(artifact))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use umlforge_core::{DiagramDocument, RenderError};
    use umlforge_model::MockProvider;

    /// Renderer double that records the document it was handed.
    struct CapturingRenderer {
        seen: Mutex<Option<String>>,
    }

    impl CapturingRenderer {
        fn new() -> Self {
            Self {
                seen: Mutex::new(None),
            }
        }
    }

    #[async_trait]
    impl DiagramRenderer for CapturingRenderer {
        async fn render(&self, doc: &DiagramDocument) -> Result<RenderedArtifact, RenderError> {
            *self.seen.lock().unwrap() = Some(doc.as_str().to_string());
            Ok(RenderedArtifact {
                path: PathBuf::from("diagram.png"),
            })
        }
    }

    #[tokio::test]
    async fn renders_fenced_response_end_to_end() {
        let provider =
            MockProvider::new("mock").with_response("blah ```plantuml\nstart\n:A;\nstop\n``` blah");
        let renderer = CapturingRenderer::new();

        let outcome = run("fn main() {}", "mock", &provider, &renderer)
            .await
            .unwrap();

        assert!(matches!(outcome, PipelineOutcome::Rendered(_)));
        assert_eq!(
            renderer.seen.lock().unwrap().as_deref(),
            Some("@startuml\nstart\n:A;\nstop\n@enduml")
        );
    }

    #[tokio::test]
    async fn response_without_fence_stops_gracefully() {
        let provider = MockProvider::new("mock").with_response("sorry, no diagram for you");
        let renderer = CapturingRenderer::new();

        let outcome = run("fn main() {}", "mock", &provider, &renderer)
            .await
            .unwrap();

        assert!(matches!(outcome, PipelineOutcome::NoDiagram));
        assert!(renderer.seen.lock().unwrap().is_none());
    }

    #[tokio::test]
    async fn marker_only_block_never_reaches_renderer() {
        let provider =
            MockProvider::new("mock").with_response("```plantuml\n@startuml\n@enduml\n```");
        let renderer = CapturingRenderer::new();

        let outcome = run("fn main() {}", "mock", &provider, &renderer)
            .await
            .unwrap();

        assert!(matches!(outcome, PipelineOutcome::EmptyDiagram));
        assert!(renderer.seen.lock().unwrap().is_none());
    }
}
