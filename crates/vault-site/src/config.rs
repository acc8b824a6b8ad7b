//! Site settings consumed by the router.

/// Vault namespace: the URL prefix all manifest routes live under.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VaultPaths {
    /// Base path without trailing slash (e.g., "/notes").
    pub base: String,
    /// Label for the vault root in breadcrumbs and the navigation bar.
    pub label: String,
}

impl VaultPaths {
    #[must_use]
    pub fn new(base: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            label: label.into(),
        }
    }

    /// Whether `path` is the base path or lies beneath it.
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        path.strip_prefix(self.base.as_str())
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
    }
}

impl Default for VaultPaths {
    fn default() -> Self {
        Self::new("/notes", "Notes")
    }
}

/// Fixed page outside the vault namespace.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StaticPage {
    /// Exact URL path (e.g., "/about").
    pub path: String,
    pub title: String,
    /// Pre-rendered HTML fragment.
    pub content: String,
}

impl StaticPage {
    #[must_use]
    pub fn new(
        path: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            title: title.into(),
            content: content.into(),
        }
    }
}

/// One link in the navigation bar.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavEntry {
    pub href: String,
    pub label: String,
}

/// Configuration for [`Navigator`](crate::Navigator).
#[derive(Clone, Debug)]
pub struct SiteConfig {
    /// Suffix of every document title (`"{page} | {title}"`).
    pub title: String,
    pub vault: VaultPaths,
    /// Static pages, in navigation bar order.
    pub pages: Vec<StaticPage>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Vault".to_owned(),
            vault: VaultPaths::default(),
            pages: Vec::new(),
        }
    }
}

impl SiteConfig {
    /// Navigation bar entries: every static page, then the vault root.
    #[must_use]
    pub fn nav_entries(&self) -> Vec<NavEntry> {
        self.pages
            .iter()
            .map(|page| NavEntry {
                href: page.path.clone(),
                label: page.title.clone(),
            })
            .chain(std::iter::once(NavEntry {
                href: self.vault.base.clone(),
                label: self.vault.label.clone(),
            }))
            .collect()
    }

    /// Document title for a page.
    #[must_use]
    pub fn page_title(&self, title: &str) -> String {
        format!("{title} | {}", self.title)
    }
}
