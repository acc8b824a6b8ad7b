//! Source selection from configuration.

use std::time::Duration;

use vault_config::SourcesConfig;
use vault_source::{ContentSource, DirSource, ManifestSource, SourceError};
use vault_source_http::HttpSource;

/// Transport chosen by configuration: a local vault directory when one is
/// set, the HTTP endpoints otherwise.
#[derive(Clone, Debug)]
pub(crate) enum VaultSource {
    Dir(DirSource),
    Http(HttpSource),
}

impl VaultSource {
    pub(crate) fn from_config(sources: &SourcesConfig) -> Self {
        if let Some(dir) = &sources.vault_dir {
            Self::Dir(DirSource::with_manifest_file(
                dir.clone(),
                sources.manifest_file.clone(),
            ))
        } else {
            let timeout = (sources.timeout_secs > 0).then(|| Duration::from_secs(sources.timeout_secs));
            Self::Http(HttpSource::new(
                sources.manifest_url.clone(),
                &sources.content_base_url,
                timeout,
            ))
        }
    }

    /// Human-readable origin for status messages.
    pub(crate) fn describe(&self, sources: &SourcesConfig) -> String {
        match self {
            Self::Dir(source) => format!("directory {}", source.root().display()),
            Self::Http(_) => format!("{} (content: {})", sources.manifest_url, sources.content_base_url),
        }
    }
}

impl ManifestSource for VaultSource {
    async fn fetch_manifest(&self) -> Result<String, SourceError> {
        match self {
            Self::Dir(source) => source.fetch_manifest().await,
            Self::Http(source) => source.fetch_manifest().await,
        }
    }
}

impl ContentSource for VaultSource {
    async fn fetch_content(&self, content_path: &str) -> Result<String, SourceError> {
        match self {
            Self::Dir(source) => source.fetch_content(content_path).await,
            Self::Http(source) => source.fetch_content(content_path).await,
        }
    }
}
