pub mod error;
pub mod traits;
pub mod types;

pub use error::{ExtractError, NormalizeError, RenderError};
pub use traits::{DiagramRenderer, ModelProvider, ModelRequest, ModelResponse};
pub use types::{DiagramDocument, RenderedArtifact};
