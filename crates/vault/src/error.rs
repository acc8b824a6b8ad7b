//! CLI error types.

use vault_config::ConfigError;
use vault_manifest::{BuildError, ManifestLoadError};

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Build(#[from] BuildError),

    #[error("{0}")]
    Manifest(#[from] ManifestLoadError),

    #[error("{0}")]
    Serialize(#[from] serde_json::Error),
}
