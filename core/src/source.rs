use crate::error::{CoreError, CoreResult};
use std::path::{Path, PathBuf};
use tracing::info;

/// Text of the generated binding file under validation.
///
/// Read once and never mutated; every check borrows from it.
#[derive(Debug, Clone)]
pub struct SourceText {
    path: PathBuf,
    text: String,
}

impl SourceText {
    /// Reads the whole file as UTF-8. Missing, unreadable and non-UTF-8
    /// files all surface as `CoreError::FileRead`.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| CoreError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), bytes = text.len(), "loaded binding source");
        Ok(Self {
            path: path.to_path_buf(),
            text,
        })
    }

    pub fn from_string(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn byte_len(&self) -> usize {
        self.text.len()
    }

    pub fn line_count(&self) -> usize {
        self.text.lines().count()
    }
}
