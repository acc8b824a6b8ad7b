//! CLI command implementations.

pub(crate) mod manifest;
pub(crate) mod render;
pub(crate) mod routes;

use std::path::PathBuf;

use clap::Args;
use vault_config::{CliSettings, Config};
use vault_site::{SiteConfig, StaticPage, VaultPaths};

use crate::error::CliError;

pub(crate) use manifest::ManifestArgs;
pub(crate) use render::RenderArgs;
pub(crate) use routes::RoutesArgs;

/// Configuration and transport options shared by commands that read a vault.
#[derive(Args)]
pub(crate) struct SourceArgs {
    /// Path to configuration file (default: auto-discover vault.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Read manifest and content from a local vault directory.
    #[arg(short, long)]
    dir: Option<PathBuf>,

    /// Manifest document URL (overrides config).
    #[arg(long, env = "VAULT_MANIFEST_URL")]
    manifest_url: Option<String>,

    /// Content base URL (overrides config).
    #[arg(long, env = "VAULT_CONTENT_BASE_URL")]
    content_base_url: Option<String>,
}

impl SourceArgs {
    /// Load configuration with these arguments applied on top.
    pub(crate) fn load_config(&self) -> Result<Config, CliError> {
        let cli_settings = CliSettings {
            manifest_url: self.manifest_url.clone(),
            content_base_url: self.content_base_url.clone(),
            vault_dir: self.dir.clone(),
        };
        Ok(Config::load(self.config.as_deref(), Some(&cli_settings))?)
    }
}

/// Map loaded configuration onto router settings.
pub(crate) fn site_config(config: &Config) -> SiteConfig {
    SiteConfig {
        title: config.site.title.clone(),
        vault: VaultPaths::new(config.vault.base_path.clone(), config.vault.label.clone()),
        pages: config
            .pages
            .iter()
            .map(|page| StaticPage::new(page.path.clone(), page.title.clone(), page.content.clone()))
            .collect(),
    }
}

/// Single-threaded runtime for commands that talk to a source.
pub(crate) fn runtime() -> Result<tokio::runtime::Runtime, CliError> {
    Ok(tokio::runtime::Builder::new_current_thread().build()?)
}
