pub mod renderer;
pub mod viewer;

pub use renderer::{PlantUmlRenderer, RendererConfig};
