//! Mock source implementation for testing.
//!
//! Provides [`MockSource`] for unit testing without network or filesystem
//! access. Every fetch is counted so callers can assert how often the
//! transport was hit.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, RwLock};

use crate::source::{ContentSource, ManifestSource, SourceError, SourceErrorKind};

const BACKEND: &str = "Mock";

/// In-memory source for testing.
///
/// # Example
///
/// ```ignore
/// use vault_source::{ContentSource, MockSource};
///
/// let source = MockSource::new()
///     .with_manifest(r#"{"root": {"slug": "root", "title": "Home", "type": "directory"}}"#)
///     .with_content("/x.html", "<p>X</p>");
///
/// let body = source.fetch_content("/x.html").await?;
/// assert_eq!(source.content_fetch_count("/x.html"), 1);
/// ```
#[derive(Debug, Default)]
pub struct MockSource {
    manifest: RwLock<Option<String>>,
    contents: RwLock<HashMap<String, String>>,
    failing: RwLock<HashSet<String>>,
    manifest_fetches: AtomicUsize,
    content_fetches: Mutex<HashMap<String, usize>>,
}

impl MockSource {
    /// Create a new empty mock source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `json` as the manifest document.
    #[must_use]
    pub fn with_manifest(self, json: impl Into<String>) -> Self {
        self.set_manifest(json);
        self
    }

    /// Serve `body` for `content_path`.
    #[must_use]
    pub fn with_content(self, content_path: impl Into<String>, body: impl Into<String>) -> Self {
        self.set_content(content_path, body);
        self
    }

    /// Make every fetch of `content_path` fail with a 500 status.
    #[must_use]
    pub fn with_failure(self, content_path: impl Into<String>) -> Self {
        self.failing.write().unwrap().insert(content_path.into());
        self
    }

    /// Replace the manifest document.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn set_manifest(&self, json: impl Into<String>) {
        *self.manifest.write().unwrap() = Some(json.into());
    }

    /// Replace the body for `content_path` and clear any injected failure.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn set_content(&self, content_path: impl Into<String>, body: impl Into<String>) {
        let content_path = content_path.into();
        self.failing.write().unwrap().remove(&content_path);
        self.contents.write().unwrap().insert(content_path, body.into());
    }

    /// Number of manifest fetches so far.
    #[must_use]
    pub fn manifest_fetch_count(&self) -> usize {
        self.manifest_fetches.load(Ordering::SeqCst)
    }

    /// Number of fetches for `content_path` so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn content_fetch_count(&self, content_path: &str) -> usize {
        self.content_fetches
            .lock()
            .unwrap()
            .get(content_path)
            .copied()
            .unwrap_or(0)
    }
}

impl ManifestSource for MockSource {
    #[allow(clippy::unused_async)]
    async fn fetch_manifest(&self) -> Result<String, SourceError> {
        self.manifest_fetches.fetch_add(1, Ordering::SeqCst);
        self.manifest
            .read()
            .unwrap()
            .clone()
            .ok_or_else(|| SourceError::not_found("manifest").with_backend(BACKEND))
    }
}

impl ContentSource for MockSource {
    #[allow(clippy::unused_async)]
    async fn fetch_content(&self, content_path: &str) -> Result<String, SourceError> {
        *self
            .content_fetches
            .lock()
            .unwrap()
            .entry(content_path.to_owned())
            .or_default() += 1;

        if self.failing.read().unwrap().contains(content_path) {
            return Err(SourceError::new(SourceErrorKind::Status(500))
                .with_location(content_path)
                .with_backend(BACKEND));
        }

        self.contents
            .read()
            .unwrap()
            .get(content_path)
            .cloned()
            .ok_or_else(|| SourceError::not_found(content_path).with_backend(BACKEND))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_serves_content_and_counts() {
        let source = MockSource::new().with_content("/a.html", "A");

        assert_eq!(source.fetch_content("/a.html").await.unwrap(), "A");
        assert_eq!(source.fetch_content("/a.html").await.unwrap(), "A");
        assert_eq!(source.content_fetch_count("/a.html"), 2);
        assert_eq!(source.content_fetch_count("/b.html"), 0);
    }

    #[tokio::test]
    async fn test_mock_missing_content_is_not_found() {
        let source = MockSource::new();

        let err = source.fetch_content("/missing.html").await.unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(source.content_fetch_count("/missing.html"), 1);
    }

    #[tokio::test]
    async fn test_mock_failure_then_recovery() {
        let source = MockSource::new()
            .with_content("/a.html", "A")
            .with_failure("/a.html");

        let err = source.fetch_content("/a.html").await.unwrap_err();
        assert_eq!(err.kind, SourceErrorKind::Status(500));

        source.set_content("/a.html", "A2");
        assert_eq!(source.fetch_content("/a.html").await.unwrap(), "A2");
    }

    #[tokio::test]
    async fn test_mock_manifest() {
        let source = MockSource::new();
        assert!(source.fetch_manifest().await.is_err());

        source.set_manifest("{}");
        assert_eq!(source.fetch_manifest().await.unwrap(), "{}");
        assert_eq!(source.manifest_fetch_count(), 2);
    }
}
