use vault_manifest::RouteTable;

use crate::config::VaultPaths;

/// Breadcrumb navigation item.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Breadcrumb {
    /// Display title.
    pub title: String,
    /// Link target, `None` for the current page.
    pub path: Option<String>,
}

impl Breadcrumb {
    fn link(title: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            path: Some(path.into()),
        }
    }

    fn current(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            path: None,
        }
    }
}

/// Build the breadcrumb trail for `path`.
///
/// Paths outside the vault namespace have no trail. The vault root is a
/// single unlinked crumb. Below it, every accumulated prefix that resolves in
/// `routes` contributes one crumb; prefixes missing from the table are
/// skipped.
#[must_use]
pub fn breadcrumbs(path: &str, routes: &RouteTable, vault: &VaultPaths) -> Vec<Breadcrumb> {
    if !vault.contains(path) {
        return Vec::new();
    }
    if path == vault.base {
        return vec![Breadcrumb::current(&vault.label)];
    }

    let segments: Vec<&str> = path[vault.base.len()..]
        .split('/')
        .filter(|s| !s.is_empty())
        .collect();
    let mut crumbs = vec![Breadcrumb::link(&vault.label, &vault.base)];
    let mut accumulated = vault.base.clone();

    for (i, segment) in segments.iter().enumerate() {
        accumulated.push('/');
        accumulated.push_str(segment);

        if let Some(node) = routes.lookup(&accumulated) {
            if i + 1 == segments.len() {
                crumbs.push(Breadcrumb::current(&node.title));
            } else {
                crumbs.push(Breadcrumb::link(&node.title, &accumulated));
            }
        }
    }

    crumbs
}

/// Render crumbs as `<nav class="breadcrumbs">`, empty when there are none.
#[must_use]
pub fn render_breadcrumbs(crumbs: &[Breadcrumb]) -> String {
    if crumbs.is_empty() {
        return String::new();
    }

    let items: Vec<String> = crumbs
        .iter()
        .map(|crumb| {
            let title = html_escape::encode_text(&crumb.title);
            match &crumb.path {
                Some(path) => format!(
                    r#"<a href="{}" data-link>{title}</a>"#,
                    html_escape::encode_double_quoted_attribute(path)
                ),
                None => format!("<span>{title}</span>"),
            }
        })
        .collect();

    format!(r#"<nav class="breadcrumbs">{}</nav>"#, items.join(" / "))
}
