use std::path::PathBuf;

use serde::Deserialize;

use umlforge_render::RendererConfig;

/// umlforge runtime configuration.
///
/// Read from the environment once at process start and passed down
/// explicitly; nothing re-reads env vars at call sites.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Gemini API key
    pub gemini_api_key: Option<String>,
    /// Model to request
    pub model: String,
    /// Override for the model API base URL
    pub api_url: Option<String>,
    /// Rendering tool command
    pub tool: String,
    /// Directory rendered artifacts are written into
    pub out_dir: String,
    /// Log level
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            model: "gemini-1.5-pro".to_string(),
            api_url: None,
            tool: "plantuml".to_string(),
            out_dir: ".".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables with sensible defaults.
    pub fn from_env() -> Self {
        Self {
            gemini_api_key: std::env::var("GEMINI_API_KEY").ok(),
            model: std::env::var("UMLFORGE_MODEL")
                .unwrap_or_else(|_| "gemini-1.5-pro".to_string()),
            api_url: std::env::var("UMLFORGE_API_URL").ok(),
            tool: std::env::var("UMLFORGE_TOOL").unwrap_or_else(|_| "plantuml".to_string()),
            out_dir: std::env::var("UMLFORGE_OUT_DIR").unwrap_or_else(|_| ".".to_string()),
            log_level: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        }
    }

    /// Renderer settings for this run.
    pub fn renderer_config(&self, open_viewer: bool) -> RendererConfig {
        RendererConfig {
            tool: self.tool.clone(),
            output_dir: PathBuf::from(&self.out_dir),
            open_viewer,
            ..RendererConfig::default()
        }
    }
}
