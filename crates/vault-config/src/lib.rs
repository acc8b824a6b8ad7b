//! Configuration management for the vault router.
//!
//! Parses `vault.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `sources.manifest_url`
//! - `sources.content_base_url`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override manifest document URL.
    pub manifest_url: Option<String>,
    /// Override content base URL.
    pub content_base_url: Option<String>,
    /// Read manifest and content from a local vault directory instead of HTTP.
    pub vault_dir: Option<PathBuf>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "vault.toml";

/// Default HTTP timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Site-wide presentation settings.
    pub site: SiteConfig,
    /// Vault namespace settings.
    pub vault: VaultConfig,
    /// Transport endpoints (paths are relative strings from TOML).
    sources: SourcesConfigRaw,
    /// Static pages served outside the vault namespace.
    pub pages: Vec<PageConfig>,

    /// Resolved transport configuration (set after loading).
    #[serde(skip)]
    pub sources_resolved: SourcesConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            site: SiteConfig::default(),
            vault: VaultConfig::default(),
            sources: SourcesConfigRaw::default(),
            pages: default_pages(),
            sources_resolved: SourcesConfig::default(),
            config_path: None,
        }
    }
}

/// Site-wide presentation settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Suffix appended to every document title (`"{page} | {title}"`).
    pub title: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Vault".to_owned(),
        }
    }
}

/// Vault namespace settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct VaultConfig {
    /// URL prefix under which all manifest routes live.
    pub base_path: String,
    /// Label for the vault root in breadcrumbs and the navigation bar.
    pub label: String,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            base_path: "/notes".to_owned(),
            label: "Notes".to_owned(),
        }
    }
}

/// A static page as configured in TOML.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct PageConfig {
    /// Exact URL path (e.g. `/about`).
    pub path: String,
    /// Page title.
    pub title: String,
    /// Pre-rendered HTML fragment.
    pub content: String,
}

/// Raw transport configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct SourcesConfigRaw {
    manifest_url: Option<String>,
    content_base_url: Option<String>,
    dir: Option<String>,
    manifest_file: Option<String>,
    timeout_secs: Option<u64>,
}

/// Resolved transport configuration.
#[derive(Debug, PartialEq, Eq)]
pub struct SourcesConfig {
    /// URL of the manifest document.
    pub manifest_url: String,
    /// URL prefix prepended to every node's `content_path`.
    pub content_base_url: String,
    /// Local vault directory. When set, the HTTP endpoints are not used.
    pub vault_dir: Option<PathBuf>,
    /// Manifest file name inside `vault_dir`.
    pub manifest_file: String,
    /// HTTP timeout in seconds (0 disables the timeout).
    pub timeout_secs: u64,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            manifest_url: "http://127.0.0.1:8000/manifest.json".to_owned(),
            content_base_url: "http://127.0.0.1:8000".to_owned(),
            vault_dir: None,
            manifest_file: "manifest.json".to_owned(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Home and About pages used when no `[[pages]]` are configured.
fn default_pages() -> Vec<PageConfig> {
    vec![
        PageConfig {
            path: "/".to_owned(),
            title: "Home".to_owned(),
            content: concat!(
                "<h1>🏠 Welcome</h1>\n",
                "<p>This is your personal knowledge vault, converted from Obsidian notes.</p>\n",
                "<p>Use the <strong>Notes</strong> tab to explore your content.</p>"
            )
            .to_owned(),
        },
        PageConfig {
            path: "/about".to_owned(),
            title: "About".to_owned(),
            content: concat!(
                "<h1>ℹ️ About</h1>\n",
                "<p>This SPA serves markdown notes converted to HTML.</p>\n",
                "<h2>Features</h2>\n",
                "<ul>\n",
                "<li>Nested directory navigation</li>\n",
                "<li>Breadcrumb trails</li>\n",
                "<li>Deep linking support</li>\n",
                "</ul>"
            )
            .to_owned(),
        },
    ]
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`sources.manifest_url`").
        field: String,
        /// Error message (e.g., "${`VAULT_HOST`} not set").
        message: String,
    },
}

fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `vault.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(url) = &settings.manifest_url {
            self.sources_resolved.manifest_url.clone_from(url);
        }
        if let Some(url) = &settings.content_base_url {
            self.sources_resolved.content_base_url.clone_from(url);
        }
        if let Some(dir) = &settings.vault_dir {
            self.sources_resolved.vault_dir = Some(dir.clone());
        }
    }

    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file and after CLI overrides.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.site.title, "site.title")?;
        self.validate_vault()?;
        self.validate_sources()?;
        self.validate_pages()?;
        Ok(())
    }

    fn validate_vault(&self) -> Result<(), ConfigError> {
        let base = &self.vault.base_path;
        require_non_empty(base, "vault.base_path")?;
        if !base.starts_with('/') {
            return Err(ConfigError::Validation(
                "vault.base_path must start with /".to_owned(),
            ));
        }
        if base.len() > 1 && base.ends_with('/') {
            return Err(ConfigError::Validation(
                "vault.base_path must not end with /".to_owned(),
            ));
        }
        if base == "/" {
            return Err(ConfigError::Validation(
                "vault.base_path cannot be the site root".to_owned(),
            ));
        }
        require_non_empty(&self.vault.label, "vault.label")?;
        Ok(())
    }

    fn validate_sources(&self) -> Result<(), ConfigError> {
        // A local vault directory replaces both HTTP endpoints
        if self.sources_resolved.vault_dir.is_some() {
            return require_non_empty(
                &self.sources_resolved.manifest_file,
                "sources.manifest_file",
            );
        }
        let sources = &self.sources_resolved;
        require_non_empty(&sources.manifest_url, "sources.manifest_url")?;
        require_http_url(&sources.manifest_url, "sources.manifest_url")?;
        require_non_empty(&sources.content_base_url, "sources.content_base_url")?;
        require_http_url(&sources.content_base_url, "sources.content_base_url")?;
        Ok(())
    }

    fn validate_pages(&self) -> Result<(), ConfigError> {
        let base = &self.vault.base_path;
        for page in &self.pages {
            if !page.path.starts_with('/') {
                return Err(ConfigError::Validation(format!(
                    "pages: path {:?} must start with /",
                    page.path
                )));
            }
            if page.path == *base || page.path.starts_with(&format!("{base}/")) {
                return Err(ConfigError::Validation(format!(
                    "pages: path {:?} is inside the vault namespace {base}",
                    page.path
                )));
            }
            require_non_empty(&page.title, "pages.title")?;
        }
        Ok(())
    }

    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref url) = self.sources.manifest_url {
            self.sources.manifest_url = Some(expand::expand_env(url, "sources.manifest_url")?);
        }
        if let Some(ref url) = self.sources.content_base_url {
            self.sources.content_base_url =
                Some(expand::expand_env(url, "sources.content_base_url")?);
        }
        Ok(())
    }

    /// Resolve raw transport settings against the config file directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let defaults = SourcesConfig::default();
        self.sources_resolved = SourcesConfig {
            manifest_url: self
                .sources
                .manifest_url
                .clone()
                .unwrap_or(defaults.manifest_url),
            content_base_url: self
                .sources
                .content_base_url
                .as_deref()
                .map_or(defaults.content_base_url, |url| {
                    url.trim_end_matches('/').to_owned()
                }),
            vault_dir: self.sources.dir.as_deref().map(|d| config_dir.join(d)),
            manifest_file: self
                .sources
                .manifest_file
                .clone()
                .unwrap_or(defaults.manifest_file),
            timeout_secs: self.sources.timeout_secs.unwrap_or(defaults.timeout_secs),
        };
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn assert_validation_error(config: &Config, expected_substrings: &[&str]) {
        let result = config.validate();
        assert!(result.is_err(), "Expected validation to fail");
        let err = result.unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation(_)),
            "Expected ConfigError::Validation, got {err:?}"
        );
        let msg = err.to_string();
        for s in expected_substrings {
            assert!(
                msg.contains(s),
                "Expected error to contain '{s}', got: {msg}"
            );
        }
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.site.title, "Vault");
        assert_eq!(config.vault.base_path, "/notes");
        assert_eq!(config.vault.label, "Notes");
        assert_eq!(config.sources_resolved, SourcesConfig::default());
        let paths: Vec<&str> = config.pages.iter().map(|p| p.path.as_str()).collect();
        assert_eq!(paths, vec!["/", "/about"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_minimal_config_keeps_default_pages() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.vault.base_path, "/notes");
        assert_eq!(config.pages.len(), 2);
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[site]
title = "Garden"

[vault]
base_path = "/kb"
label = "Knowledge"

[sources]
manifest_url = "https://garden.example.com/manifest.json"
content_base_url = "https://garden.example.com/vault/"
timeout_secs = 5

[[pages]]
path = "/"
title = "Start"
content = "<h1>Start</h1>"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(config.site.title, "Garden");
        assert_eq!(config.vault.base_path, "/kb");
        assert_eq!(config.vault.label, "Knowledge");
        assert_eq!(
            config.pages,
            vec![PageConfig {
                path: "/".to_owned(),
                title: "Start".to_owned(),
                content: "<h1>Start</h1>".to_owned(),
            }]
        );
        assert_eq!(
            config.sources_resolved,
            SourcesConfig {
                manifest_url: "https://garden.example.com/manifest.json".to_owned(),
                content_base_url: "https://garden.example.com/vault".to_owned(),
                vault_dir: None,
                manifest_file: "manifest.json".to_owned(),
                timeout_secs: 5,
            }
        );
    }

    #[test]
    fn test_resolve_paths_vault_dir_relative_to_config() {
        let toml = r#"
[sources]
dir = "public"
manifest_file = "index.json"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(
            config.sources_resolved.vault_dir,
            Some(PathBuf::from("/project/public"))
        );
        assert_eq!(config.sources_resolved.manifest_file, "index.json");
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vault.toml");
        std::fs::write(
            &path,
            "[vault]\nbase_path = \"/docs\"\n\n[sources]\ndir = \"site\"\n",
        )
        .unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(config.vault.base_path, "/docs");
        assert_eq!(config.sources_resolved.vault_dir, Some(dir.path().join("site")));
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let err = Config::load(Some(Path::new("/nonexistent/vault.toml")), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vault.toml");
        std::fs::write(&path, "[vault\nbase_path = ").unwrap();

        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_expand_env_vars_in_sources() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("VAULT_CONFIG_TEST_HOST", "vault.internal");
        }
        let toml = r#"
[sources]
manifest_url = "https://${VAULT_CONFIG_TEST_HOST}/manifest.json"
content_base_url = "${VAULT_CONFIG_TEST_UNSET:-https://cdn.example.com}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.expand_env_vars().unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(
            config.sources_resolved.manifest_url,
            "https://vault.internal/manifest.json"
        );
        assert_eq!(
            config.sources_resolved.content_base_url,
            "https://cdn.example.com"
        );
        unsafe {
            std::env::remove_var("VAULT_CONFIG_TEST_HOST");
        }
    }

    #[test]
    fn test_apply_cli_settings_vault_dir() {
        let mut config = Config::default();
        let overrides = CliSettings {
            vault_dir: Some(PathBuf::from("/srv/vault")),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(
            config.sources_resolved.vault_dir,
            Some(PathBuf::from("/srv/vault"))
        );
        // Unchanged
        assert_eq!(
            config.sources_resolved.manifest_url,
            "http://127.0.0.1:8000/manifest.json"
        );
    }

    #[test]
    fn test_apply_cli_settings_urls() {
        let mut config = Config::default();
        let overrides = CliSettings {
            manifest_url: Some("https://a.example.com/m.json".to_owned()),
            content_base_url: Some("https://b.example.com".to_owned()),
            vault_dir: None,
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(
            config.sources_resolved.manifest_url,
            "https://a.example.com/m.json"
        );
        assert_eq!(
            config.sources_resolved.content_base_url,
            "https://b.example.com"
        );
    }

    #[test]
    fn test_validate_empty_site_title() {
        let mut config = Config::default();
        config.site.title = String::new();
        assert_validation_error(&config, &["site.title", "empty"]);
    }

    #[test]
    fn test_validate_base_path_without_leading_slash() {
        let mut config = Config::default();
        config.vault.base_path = "notes".to_owned();
        assert_validation_error(&config, &["vault.base_path", "start with /"]);
    }

    #[test]
    fn test_validate_base_path_trailing_slash() {
        let mut config = Config::default();
        config.vault.base_path = "/notes/".to_owned();
        assert_validation_error(&config, &["vault.base_path", "end with /"]);
    }

    #[test]
    fn test_validate_base_path_site_root() {
        let mut config = Config::default();
        config.vault.base_path = "/".to_owned();
        assert_validation_error(&config, &["vault.base_path", "site root"]);
    }

    #[test]
    fn test_validate_manifest_url_scheme() {
        let mut config = Config::default();
        config.sources_resolved.manifest_url = "ftp://vault/manifest.json".to_owned();
        assert_validation_error(&config, &["sources.manifest_url", "http"]);
    }

    #[test]
    fn test_validate_skips_urls_with_vault_dir() {
        let mut config = Config::default();
        config.sources_resolved.manifest_url = String::new();
        config.sources_resolved.vault_dir = Some(PathBuf::from("/srv/vault"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_page_inside_vault_namespace() {
        let mut config = Config::default();
        config.pages.push(PageConfig {
            path: "/notes/intro".to_owned(),
            title: "Intro".to_owned(),
            content: String::new(),
        });
        assert_validation_error(&config, &["/notes/intro", "vault namespace"]);
    }

    #[test]
    fn test_validate_page_path_relative() {
        let mut config = Config::default();
        config.pages.push(PageConfig {
            path: "contact".to_owned(),
            title: "Contact".to_owned(),
            content: String::new(),
        });
        assert_validation_error(&config, &["contact", "start with /"]);
    }

    #[test]
    fn test_validate_page_sharing_base_prefix_is_allowed() {
        let mut config = Config::default();
        config.pages.push(PageConfig {
            path: "/notes-archive".to_owned(),
            title: "Archive".to_owned(),
            content: String::new(),
        });
        assert!(config.validate().is_ok());
    }
}
