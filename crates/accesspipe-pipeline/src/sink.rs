//! Durable storage for pipeline outputs

use accesspipe_core::Result;
use std::path::{Path, PathBuf};
use tracing::info;

/// Writes pipeline artifacts under one directory. Purely a
/// convenience; the pipeline's correctness never depends on it.
pub struct ArtifactSink {
    directory: PathBuf,
}

impl ArtifactSink {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Ensure the directory exists, write `content` verbatim, and
    /// return the final path.
    pub fn persist(&self, content: &str, logical_name: &str) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.directory)?;
        let path = self.directory.join(logical_name);
        std::fs::write(&path, content)?;
        info!(path = %path.display(), bytes = content.len(), "artifact persisted");
        Ok(path)
    }
}
