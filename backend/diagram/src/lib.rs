pub mod extractor;
pub mod normalizer;

pub use extractor::extract;
pub use normalizer::normalize;
