use anyhow::Result;
use async_trait::async_trait;

use crate::error::RenderError;
use crate::types::{DiagramDocument, RenderedArtifact};

/// Trait for hosted model providers used by the pipeline.
#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// Provider name (e.g., "gemini").
    fn name(&self) -> &str;

    /// Send a completion request and return the response text.
    async fn complete(&self, request: &ModelRequest) -> Result<ModelResponse>;
}

/// Trait for diagram renderers.
///
/// The external tool dependency sits behind this single method so it is
/// swappable and mockable in tests without spawning real processes.
#[async_trait]
pub trait DiagramRenderer: Send + Sync {
    /// Render a normalized document into an image artifact.
    async fn render(&self, doc: &DiagramDocument) -> Result<RenderedArtifact, RenderError>;
}

/// Request to a model provider.
#[derive(Debug, Clone)]
pub struct ModelRequest {
    pub model: String,
    pub system_prompt: String,
    pub user_prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// Response from a model provider.
#[derive(Debug, Clone)]
pub struct ModelResponse {
    pub content: String,
    pub provider: String,
    pub model: String,
    pub tokens_used: u64,
    pub latency_ms: u64,
}
