//! Source traits and error types.
//!
//! Provides the [`ManifestSource`] and [`ContentSource`] traits that abstract
//! the two transports the router depends on, along with [`SourceError`] for
//! unified error handling across backends.
//!
//! # Content Path Convention
//!
//! `content_path` arguments are the values found in the manifest, e.g.
//! `"/nature/tundra.html"` or `"/README.html"`. Backends map them onto their
//! own location scheme (a URL prefix, a directory, a map key).

use std::future::Future;
use std::sync::Arc;

/// Semantic error categories.
#[derive(Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum SourceErrorKind {
    /// Resource does not exist.
    NotFound,
    /// Content path escapes the source root or is otherwise malformed.
    InvalidPath,
    /// Server answered with a non-success status.
    Status(u16),
    /// Connection, DNS, TLS, or timeout failure.
    Network,
    /// Other/unknown error category.
    Other,
}

/// Transport error with semantic kind and backend-specific source.
#[derive(Debug)]
pub struct SourceError {
    /// Semantic error category.
    pub kind: SourceErrorKind,
    /// Location that failed (URL, file path, or content path).
    pub location: Option<String>,
    /// Backend identifier (e.g., "Http", "Dir", "Mock").
    pub backend: Option<&'static str>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl SourceError {
    /// Create a new source error.
    #[must_use]
    pub fn new(kind: SourceErrorKind) -> Self {
        Self {
            kind,
            location: None,
            backend: None,
            source: None,
        }
    }

    /// Attach location context.
    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Attach backend identifier.
    #[must_use]
    pub fn with_backend(mut self, backend: &'static str) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Attach the underlying error source.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Create a not found error with location.
    #[must_use]
    pub fn not_found(location: impl Into<String>) -> Self {
        Self::new(SourceErrorKind::NotFound).with_location(location)
    }

    /// Create an error for a non-success HTTP status.
    ///
    /// 404 maps to [`SourceErrorKind::NotFound`].
    #[must_use]
    pub fn status(status: u16, location: impl Into<String>) -> Self {
        let kind = if status == 404 {
            SourceErrorKind::NotFound
        } else {
            SourceErrorKind::Status(status)
        };
        Self::new(kind).with_location(location)
    }

    /// Create a source error from an I/O error.
    #[must_use]
    pub fn io(err: std::io::Error, location: impl Into<String>) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => SourceErrorKind::NotFound,
            std::io::ErrorKind::TimedOut => SourceErrorKind::Network,
            _ => SourceErrorKind::Other,
        };
        Self::new(kind).with_location(location).with_source(err)
    }

    /// Whether the resource simply does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.kind == SourceErrorKind::NotFound
    }
}

impl std::fmt::Display for SourceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Format: "[Backend] Kind: message (location: /foo/bar)"
        if let Some(backend) = self.backend {
            write!(f, "[{backend}] ")?;
        }

        match self.kind {
            SourceErrorKind::NotFound => write!(f, "Not found")?,
            SourceErrorKind::InvalidPath => write!(f, "Invalid path")?,
            SourceErrorKind::Status(code) => write!(f, "HTTP status {code}")?,
            SourceErrorKind::Network => write!(f, "Network error")?,
            SourceErrorKind::Other => write!(f, "Error")?,
        }

        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }

        if let Some(location) = &self.location {
            write!(f, " (location: {location})")?;
        }

        Ok(())
    }
}

impl std::error::Error for SourceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|s| s.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Transport for the manifest document.
///
/// Returns the raw JSON text; parsing belongs to the manifest store.
pub trait ManifestSource {
    /// Fetch the manifest document.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] on transport failure or non-success status.
    fn fetch_manifest(&self) -> impl Future<Output = Result<String, SourceError>> + Send;
}

/// Transport for per-node body content.
pub trait ContentSource {
    /// Fetch the body stored at `content_path`.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] on transport failure or non-success status.
    fn fetch_content(
        &self,
        content_path: &str,
    ) -> impl Future<Output = Result<String, SourceError>> + Send;
}

impl<T: ManifestSource + Send + Sync> ManifestSource for Arc<T> {
    fn fetch_manifest(&self) -> impl Future<Output = Result<String, SourceError>> + Send {
        (**self).fetch_manifest()
    }
}

impl<T: ContentSource + Send + Sync> ContentSource for Arc<T> {
    fn fetch_content(
        &self,
        content_path: &str,
    ) -> impl Future<Output = Result<String, SourceError>> + Send {
        (**self).fetch_content(content_path)
    }
}
