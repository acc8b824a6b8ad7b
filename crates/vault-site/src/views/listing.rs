use std::fmt::Write;

use vault_manifest::{NodeType, RouteNode, RouteTable, route_path};

use crate::config::VaultPaths;

/// A child link in a directory listing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListingEntry {
    pub title: String,
    pub href: String,
    pub node_type: NodeType,
}

/// Children of a directory split into files and subdirectories.
///
/// Both lists keep manifest order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Listing {
    pub files: Vec<ListingEntry>,
    pub directories: Vec<ListingEntry>,
}

/// Build the listing for a directory node.
///
/// Returns `None` for files and for directories without children.
#[must_use]
pub fn files_and_dirs(node: &RouteNode, routes: &RouteTable, vault: &VaultPaths) -> Option<Listing> {
    if !node.is_directory() {
        return None;
    }
    let children = routes.children(node);
    if children.is_empty() {
        return None;
    }

    let mut listing = Listing::default();
    for child in children {
        let entry = ListingEntry {
            title: child.title.clone(),
            href: route_path(&vault.base, &child.slug),
            node_type: child.node_type,
        };
        match child.node_type {
            NodeType::File => listing.files.push(entry),
            NodeType::Directory => listing.directories.push(entry),
        }
    }
    Some(listing)
}

/// Render the two-column files/directories block.
#[must_use]
pub fn render_listing(listing: &Listing) -> String {
    format!(
        concat!(
            r#"<div class="files-dirs-container">"#,
            r#"<div class="files-list"><h3>Files</h3><ul>{}</ul></div>"#,
            r#"<div class="dirs-list"><h3>Directories</h3><ul>{}</ul></div>"#,
            "</div>"
        ),
        render_entries(&listing.files, "📄", "No files"),
        render_entries(&listing.directories, "📁", "No subdirectories"),
    )
}

fn render_entries(entries: &[ListingEntry], glyph: &str, placeholder: &str) -> String {
    if entries.is_empty() {
        return format!(r#"<li class="empty">{placeholder}</li>"#);
    }

    let mut html = String::new();
    for entry in entries {
        let _ = write!(
            html,
            r#"<li><a href="{}" data-link>{glyph} {}</a></li>"#,
            html_escape::encode_double_quoted_attribute(&entry.href),
            html_escape::encode_text(&entry.title),
        );
    }
    html
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use vault_manifest::ManifestNode;

    use super::*;

    fn routes() -> RouteTable {
        let root = ManifestNode::directory("root", "Home")
            .with_child(ManifestNode::directory("nature", "nature"))
            .with_child(ManifestNode::file("b", "B", "/b.html"))
            .with_child(ManifestNode::directory("travel", "travel").with_child(ManifestNode::file(
                "travel/oslo",
                "oslo",
                "/travel/oslo.html",
            )))
            .with_child(ManifestNode::file("a", "A", "/a.html"));
        RouteTable::flatten(&root, "/notes").unwrap()
    }

    #[test]
    fn test_partition_preserves_order() {
        let routes = routes();
        let root = routes.lookup("/notes").unwrap();

        let listing = files_and_dirs(root, &routes, &VaultPaths::default()).unwrap();

        let files: Vec<_> = listing.files.iter().map(|e| e.title.as_str()).collect();
        let dirs: Vec<_> = listing.directories.iter().map(|e| e.href.as_str()).collect();
        assert_eq!(files, vec!["B", "A"]);
        assert_eq!(dirs, vec!["/notes/nature", "/notes/travel"]);
    }

    #[test]
    fn test_file_has_no_listing() {
        let routes = routes();
        let file = routes.lookup("/notes/a").unwrap();

        assert_eq!(files_and_dirs(file, &routes, &VaultPaths::default()), None);
    }

    #[test]
    fn test_childless_directory_has_no_listing() {
        let routes = routes();
        let dir = routes.lookup("/notes/nature").unwrap();

        assert_eq!(files_and_dirs(dir, &routes, &VaultPaths::default()), None);
    }

    #[test]
    fn test_render_with_empty_partition() {
        let routes = routes();
        let travel = routes.lookup("/notes/travel").unwrap();
        let listing = files_and_dirs(travel, &routes, &VaultPaths::default()).unwrap();

        assert_eq!(
            render_listing(&listing),
            concat!(
                r#"<div class="files-dirs-container">"#,
                r#"<div class="files-list"><h3>Files</h3><ul>"#,
                r#"<li><a href="/notes/travel/oslo" data-link>📄 oslo</a></li>"#,
                "</ul></div>",
                r#"<div class="dirs-list"><h3>Directories</h3><ul>"#,
                r#"<li class="empty">No subdirectories</li>"#,
                "</ul></div></div>"
            )
        );
    }

    #[test]
    fn test_render_empty_files_placeholder() {
        let listing = Listing {
            files: Vec::new(),
            directories: vec![ListingEntry {
                title: "d".to_owned(),
                href: "/notes/d".to_owned(),
                node_type: NodeType::Directory,
            }],
        };

        let html = render_listing(&listing);

        assert!(html.contains(r#"<li class="empty">No files</li>"#));
        assert!(html.contains(r#"<li><a href="/notes/d" data-link>📁 d</a></li>"#));
    }
}
