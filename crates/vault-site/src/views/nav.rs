use crate::config::{NavEntry, VaultPaths};

/// Whether the navigation entry `href` is active for `path`.
///
/// The site root matches only itself, the vault entry matches the whole
/// vault namespace, and every other entry matches exactly.
#[must_use]
pub fn is_nav_active(href: &str, path: &str, vault: &VaultPaths) -> bool {
    if href == vault.base {
        vault.contains(path)
    } else {
        href == path
    }
}

/// Render the navigation bar with the active entry marked.
#[must_use]
pub fn navigation_bar(entries: &[NavEntry], path: &str, vault: &VaultPaths) -> String {
    entries
        .iter()
        .map(|entry| {
            let class = if is_nav_active(&entry.href, path, vault) {
                r#" class="active""#
            } else {
                ""
            };
            format!(
                r#"<a href="{}" data-link{class}>{}</a>"#,
                html_escape::encode_double_quoted_attribute(&entry.href),
                html_escape::encode_text(&entry.label),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
