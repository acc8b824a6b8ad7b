//! Manifest loading errors.

use vault_source::SourceError;

/// Error returned when the manifest cannot be turned into a route table.
#[derive(Debug, thiserror::Error)]
pub enum ManifestLoadError {
    /// Transport failure.
    #[error("Failed to fetch manifest: {0}")]
    Fetch(#[from] SourceError),
    /// Document is not `{ "root": ManifestNode }`.
    #[error("Invalid manifest document: {0}")]
    Parse(#[from] serde_json::Error),
    /// Nesting exceeds the flattening depth limit.
    #[error("Manifest nesting exceeds {max} levels at {path}")]
    TooDeep { path: String, max: usize },
    /// Two nodes flatten to the same URL.
    #[error("Duplicate route in manifest: {0}")]
    DuplicateRoute(String),
}
