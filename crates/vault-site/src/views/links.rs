//! In-content link rewriting.

use std::sync::LazyLock;

use percent_encoding::percent_decode_str;
use regex::{Captures, Regex};
use vault_manifest::RouteTable;

use crate::config::VaultPaths;

/// Opening `<a ...>` tag; quoted attribute values may contain `>`.
static ANCHOR_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)<a\b(?:[^>"']|"[^"]*"|'[^']*')*>"#).unwrap());

/// One attribute: name plus an optional double-quoted, single-quoted or bare
/// value.
static ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([^\s"'>/=]+)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+)))?"#).unwrap()
});

static URI_SCHEME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z][a-zA-Z0-9+.\-]*:").unwrap());

/// Point links inside fetched content at vault routes.
///
/// Each anchor's href is resolved against the vault: hrefs already in the
/// namespace are used as-is, site-absolute hrefs are moved under the base
/// path, and relative hrefs are joined to the directory of `current_path`.
/// When the result (or its percent-decoded form) is a known route, the href
/// is replaced and `data-link` is added. Every other tag is left untouched.
///
/// Skipped: anchors without an href, external URLs (`scheme:` or `//`),
/// fragment links and anchors that already carry `data-link`.
#[must_use]
pub fn rewrite_links(html: &str, current_path: &str, routes: &RouteTable, vault: &VaultPaths) -> String {
    ANCHOR_TAG
        .replace_all(html, |caps: &Captures| {
            let tag = &caps[0];
            rewrite_tag(tag, current_path, routes, vault).unwrap_or_else(|| tag.to_owned())
        })
        .into_owned()
}

fn rewrite_tag(tag: &str, current_path: &str, routes: &RouteTable, vault: &VaultPaths) -> Option<String> {
    // Skip the `<a` tag name.
    let offset = 2;
    let mut href = None;
    for attr in ATTRIBUTE.captures_iter(&tag[offset..]) {
        let name = &attr[1];
        if name.eq_ignore_ascii_case("data-link") {
            return None;
        }
        if href.is_none() && name.eq_ignore_ascii_case("href") {
            href = Some(attr);
        }
    }

    let attr = href?;
    let raw = attr.get(2).or_else(|| attr.get(3)).or_else(|| attr.get(4))?;
    let href = html_escape::decode_html_entities(raw.as_str());
    if href.is_empty() || href.starts_with("//") || href.starts_with('#') || URI_SCHEME.is_match(&href) {
        return None;
    }

    let candidate = candidate_path(&href, current_path, vault);
    let Some(target) = find_route(candidate, routes) else {
        tracing::debug!(href = %href, current_path, "Link does not resolve to a route");
        return None;
    };

    let whole = attr.get(0)?.range();
    Some(format!(
        r#"{}href="{}" data-link{}"#,
        &tag[..offset + whole.start],
        html_escape::encode_double_quoted_attribute(&target),
        &tag[offset + whole.end..]
    ))
}

fn candidate_path(href: &str, current_path: &str, vault: &VaultPaths) -> String {
    if vault.contains(href) {
        href.to_owned()
    } else if href.starts_with('/') {
        format!("{}{href}", vault.base)
    } else {
        let dir = current_path.rfind('/').map_or("", |i| &current_path[..=i]);
        normalize_path(&format!("{dir}{href}"))
    }
}

/// Collapse `.` and `..` segments; `..` never climbs above `/`.
fn normalize_path(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            _ => segments.push(segment),
        }
    }
    format!("/{}", segments.join("/"))
}

fn find_route(candidate: String, routes: &RouteTable) -> Option<String> {
    if routes.contains(&candidate) {
        return Some(candidate);
    }
    let decoded = percent_decode_str(&candidate).decode_utf8().ok()?;
    routes.contains(&decoded).then(|| decoded.into_owned())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use vault_manifest::ManifestNode;

    use super::*;

    const CURRENT: &str = "/notes/nature/tundra";

    fn routes() -> RouteTable {
        let root = ManifestNode::directory("root", "Home")
            .with_child(ManifestNode::file("intro", "intro", "/intro.html"))
            .with_child(
                ManifestNode::directory("nature", "nature")
                    .with_child(ManifestNode::file("nature/desert", "desert", "/nature/desert.html"))
                    .with_child(ManifestNode::file("nature/tundra", "tundra", "/nature/tundra.html"))
                    .with_child(ManifestNode::file("nature/polar bear", "polar bear", "/nature/polar bear.html"))
                    .with_child(ManifestNode::file("nature/a&b", "a&b", "/nature/a&b.html")),
            );
        RouteTable::flatten(&root, "/notes").unwrap()
    }

    fn rewrite(html: &str) -> String {
        rewrite_links(html, CURRENT, &routes(), &VaultPaths::default())
    }

    #[test]
    fn test_relative_sibling() {
        assert_eq!(
            rewrite(r#"<p>See <a href="desert">desert</a>.</p>"#),
            r#"<p>See <a href="/notes/nature/desert" data-link>desert</a>.</p>"#
        );
    }

    #[test]
    fn test_relative_unknown_left_unmodified() {
        let routes = RouteTable::flatten(&ManifestNode::directory("root", "Home"), "/notes").unwrap();
        let html = r#"<a href="desert">desert</a>"#;

        assert_eq!(rewrite_links(html, CURRENT, &routes, &VaultPaths::default()), html);
    }

    #[test]
    fn test_parent_segments() {
        assert_eq!(
            rewrite(r#"<a href="../intro">i</a>"#),
            r#"<a href="/notes/intro" data-link>i</a>"#
        );
        assert_eq!(
            rewrite(r#"<a href="./desert">d</a>"#),
            r#"<a href="/notes/nature/desert" data-link>d</a>"#
        );
        assert_eq!(rewrite(r#"<a href="..">up</a>"#), r#"<a href="/notes" data-link>up</a>"#);
    }

    #[test]
    fn test_site_absolute_moves_under_base() {
        assert_eq!(
            rewrite(r#"<a href="/nature/desert">d</a>"#),
            r#"<a href="/notes/nature/desert" data-link>d</a>"#
        );
    }

    #[test]
    fn test_vault_absolute_used_as_is() {
        assert_eq!(
            rewrite(r#"<a href="/notes/intro">i</a>"#),
            r#"<a href="/notes/intro" data-link>i</a>"#
        );
    }

    #[test]
    fn test_skipped_links_untouched() {
        for html in [
            r#"<a href="https://example.com/notes/intro">x</a>"#,
            r#"<a href="mailto:me@example.com">x</a>"#,
            r#"<a href="//cdn.example.com/desert">x</a>"#,
            r##"<a href="#desert">x</a>"##,
            r#"<a href="desert" data-link>x</a>"#,
            r#"<a name="desert">x</a>"#,
            r#"<a href="">x</a>"#,
            r#"<a href="../graphics/map.png">x</a>"#,
        ] {
            assert_eq!(rewrite(html), html);
        }
    }

    #[test]
    fn test_percent_encoded_href() {
        assert_eq!(
            rewrite(r#"<a href="polar%20bear">b</a>"#),
            r#"<a href="/notes/nature/polar bear" data-link>b</a>"#
        );
    }

    #[test]
    fn test_entity_encoded_href() {
        assert_eq!(
            rewrite(r#"<a href="a&amp;b">ab</a>"#),
            r#"<a href="/notes/nature/a&amp;b" data-link>ab</a>"#
        );
    }

    #[test]
    fn test_other_attributes_preserved() {
        assert_eq!(
            rewrite(r#"<a class="internal" href='desert' title="Desert">d</a>"#),
            r#"<a class="internal" href="/notes/nature/desert" data-link title="Desert">d</a>"#
        );
        assert_eq!(
            rewrite("<A HREF=desert>d</A>"),
            r#"<A href="/notes/nature/desert" data-link>d</A>"#
        );
    }

    #[test]
    fn test_quoted_gt_inside_attribute() {
        assert_eq!(
            rewrite(r#"<a title="cold > hot" href="desert">d</a>"#),
            r#"<a title="cold > hot" href="/notes/nature/desert" data-link>d</a>"#
        );
        assert_eq!(
            rewrite(r#"<a title='a>b' href=desert>d</a>"#),
            r#"<a title='a>b' href="/notes/nature/desert" data-link>d</a>"#
        );
    }

    #[test]
    fn test_href_text_inside_other_attribute_ignored() {
        assert_eq!(
            rewrite(r#"<a title="see href=desert" href="tundra">t</a>"#),
            r#"<a title="see href=desert" href="/notes/nature/tundra" data-link>t</a>"#
        );
        let html = r#"<a title="data-link" href="desert">d</a>"#;
        assert_eq!(
            rewrite(html),
            r#"<a title="data-link" href="/notes/nature/desert" data-link>d</a>"#
        );
        let html = r#"<a title="href=desert">x</a>"#;
        assert_eq!(rewrite(html), html);
    }

    #[test]
    fn test_multiple_links() {
        let html = r#"<a href="desert">d</a> <abbr>x</abbr> <a href="nowhere">n</a> <a href="tundra">t</a>"#;

        assert_eq!(
            rewrite(html),
            concat!(
                r#"<a href="/notes/nature/desert" data-link>d</a> <abbr>x</abbr> "#,
                r#"<a href="nowhere">n</a> "#,
                r#"<a href="/notes/nature/tundra" data-link>t</a>"#
            )
        );
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path("/notes/a/./b/../c"), "/notes/a/c");
        assert_eq!(normalize_path("/../../x"), "/x");
        assert_eq!(normalize_path("/notes//a/"), "/notes/a");
    }
}
