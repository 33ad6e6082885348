use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Error reading the input source file.
///
/// Absence is reported distinctly so callers can tell a mistyped path from
/// an unreadable file.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("source file not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to read source file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Read the named input file into a text buffer.
pub async fn load_source(path: &Path) -> Result<String, SourceError> {
    match tokio::fs::read_to_string(path).await {
        Ok(text) => Ok(text),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            Err(SourceError::NotFound(path.to_path_buf()))
        }
        Err(e) => Err(SourceError::Io {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}
