//! Manifest document model.

use serde::{Deserialize, Serialize};

/// Slug reserved for the tree root.
pub const ROOT_SLUG: &str = "root";

/// Kind of manifest node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    File,
    Directory,
}

impl NodeType {
    /// Name as written in the manifest.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Directory => "directory",
        }
    }
}

/// One entry in the content tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestNode {
    /// File or directory.
    #[serde(rename = "type")]
    pub node_type: NodeType,
    /// Display title.
    pub title: String,
    /// Path relative to the vault root (e.g., "nature/tundra"), or `"root"`.
    pub slug: String,
    /// Location of the node's body content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_path: Option<String>,
    /// Ordered child nodes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ManifestNode>,
}

impl ManifestNode {
    /// Create a file node.
    #[must_use]
    pub fn file(
        slug: impl Into<String>,
        title: impl Into<String>,
        content_path: impl Into<String>,
    ) -> Self {
        Self {
            node_type: NodeType::File,
            title: title.into(),
            slug: slug.into(),
            content_path: Some(content_path.into()),
            children: Vec::new(),
        }
    }

    /// Create a directory node without content.
    #[must_use]
    pub fn directory(slug: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            node_type: NodeType::Directory,
            title: title.into(),
            slug: slug.into(),
            content_path: None,
            children: Vec::new(),
        }
    }

    /// Set the content path.
    #[must_use]
    pub fn with_content_path(mut self, content_path: impl Into<String>) -> Self {
        self.content_path = Some(content_path.into());
        self
    }

    /// Append a child node.
    #[must_use]
    pub fn with_child(mut self, child: ManifestNode) -> Self {
        self.children.push(child);
        self
    }

    /// True for the tree root sentinel.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.slug == ROOT_SLUG
    }

    /// Count this node and all its descendants.
    #[must_use]
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Self::node_count).sum::<usize>()
    }
}

/// Top-level manifest document: `{ "root": ManifestNode }`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub root: ManifestNode,
}

impl Manifest {
    /// Parse a manifest document.
    pub fn parse(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize as indented JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// URL key for a slug under `base`.
///
/// The root sentinel maps to `base` itself; every other slug maps to
/// `<base>/<slug>`.
#[must_use]
pub fn route_path(base: &str, slug: &str) -> String {
    if slug == ROOT_SLUG {
        base.to_owned()
    } else {
        format!("{base}/{}", slug.trim_matches('/'))
    }
}
