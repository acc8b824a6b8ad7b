//! Directory-backed source.
//!
//! Provides [`DirSource`] for reading a ready-to-serve vault straight from the
//! local filesystem: the manifest file sits in the vault root and every
//! `content_path` is resolved against the same root.

use std::path::{Component, Path, PathBuf};

use crate::source::{ContentSource, ManifestSource, SourceError, SourceErrorKind};

/// Backend identifier for error messages.
const BACKEND: &str = "Dir";

/// Default manifest file name inside the vault root.
pub const DEFAULT_MANIFEST_FILE: &str = "manifest.json";

/// Filesystem source rooted at a vault directory.
///
/// # Example
///
/// ```ignore
/// use std::path::PathBuf;
/// use vault_source::{ContentSource, DirSource};
///
/// let source = DirSource::new(PathBuf::from("public"));
/// let body = source.fetch_content("/nature/tundra.html").await?;
/// ```
#[derive(Clone, Debug)]
pub struct DirSource {
    root: PathBuf,
    manifest_file: String,
}

impl DirSource {
    /// Create a source that reads `manifest.json` from `root`.
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self::with_manifest_file(root, DEFAULT_MANIFEST_FILE)
    }

    /// Create a source with a custom manifest file name.
    #[must_use]
    pub fn with_manifest_file(root: PathBuf, manifest_file: impl Into<String>) -> Self {
        Self {
            root,
            manifest_file: manifest_file.into(),
        }
    }

    /// Root directory of the vault.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a content path onto a file below the root.
    ///
    /// Rejects paths containing parent directory components (`..`) so a
    /// manifest cannot point outside the vault.
    fn resolve(&self, content_path: &str) -> Result<PathBuf, SourceError> {
        let relative = Path::new(content_path.trim_start_matches('/'));
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));

        if escapes || relative.as_os_str().is_empty() {
            return Err(SourceError::new(SourceErrorKind::InvalidPath)
                .with_location(content_path)
                .with_backend(BACKEND));
        }
        Ok(self.root.join(relative))
    }

    async fn read(path: PathBuf) -> Result<String, SourceError> {
        tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| SourceError::io(e, path.display().to_string()).with_backend(BACKEND))
    }
}

impl ManifestSource for DirSource {
    async fn fetch_manifest(&self) -> Result<String, SourceError> {
        let path = self.root.join(&self.manifest_file);
        tracing::debug!(path = %path.display(), "Reading manifest");
        Self::read(path).await
    }
}

impl ContentSource for DirSource {
    async fn fetch_content(&self, content_path: &str) -> Result<String, SourceError> {
        let path = self.resolve(content_path)?;
        tracing::debug!(path = %path.display(), "Reading content");
        Self::read(path).await
    }
}
