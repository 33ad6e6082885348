use std::path::PathBuf;

use thiserror::Error;

/// Failure to isolate a diagram block from free-form model output.
///
/// Not finding a block is a valid outcome of talking to a model, not a
/// fault; callers log it and stop the run gracefully.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("no fenced plantuml block in model response")]
    NotFound,
}

/// Failure to build a well-formed diagram document from an extracted body.
#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("diagram body is empty after marker cleanup")]
    EmptyBody,
}

/// Failures of the external rendering tool, one variant per pipeline stage.
///
/// Every variant is fatal to the current run. There are no retries anywhere
/// in the pipeline; a caller wanting resilience re-invokes the whole run.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("rendering tool '{tool}' is not invocable: {reason}")]
    ToolUnavailable { tool: String, reason: String },

    #[error("failed to write diagram document to {path}")]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The tool ran and reported failure. `diagnostics` is the captured
    /// stderr, preserved verbatim for the caller.
    #[error("rendering tool exited with status {status}: {diagnostics}")]
    Tool { status: i32, diagnostics: String },

    #[error("rendering tool reported success but no artifact exists at {path}")]
    ArtifactMissing { path: PathBuf },

    #[error("rendering tool did not finish within {seconds}s")]
    Timeout { seconds: u64 },
}
