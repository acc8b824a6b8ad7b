//! Flattened URL index over the manifest tree.
//!
//! # Architecture
//!
//! Nodes are stored in a flat `Vec<RouteNode>` in pre-order, with child
//! relationships tracked by indices. This provides:
//! - O(1) URL path lookups via `path_index` `HashMap`
//! - child access without cloning subtrees

use std::collections::HashMap;

use crate::error::ManifestLoadError;
use crate::model::{ManifestNode, NodeType, route_path};

/// Maximum nesting depth accepted while flattening.
pub const MAX_DEPTH: usize = 64;

/// A manifest node addressed by its URL key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteNode {
    /// URL key (e.g., "/notes", "/notes/nature/tundra").
    pub path: String,
    /// Slug from the manifest.
    pub slug: String,
    /// Display title.
    pub title: String,
    /// File or directory.
    pub node_type: NodeType,
    /// Location of the body content.
    pub content_path: Option<String>,
}

impl RouteNode {
    #[must_use]
    pub fn is_directory(&self) -> bool {
        self.node_type == NodeType::Directory
    }
}

/// URL path to node mapping, built once per manifest load.
#[derive(Debug, Default)]
pub struct RouteTable {
    base: String,
    nodes: Vec<RouteNode>,
    children: Vec<Vec<usize>>,
    path_index: HashMap<String, usize>,
}

impl RouteTable {
    /// Flatten a manifest tree under `base`.
    ///
    /// Nodes are inserted before their children. The root slug maps to
    /// `base`; every other node maps to `<base>/<slug>`.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestLoadError::TooDeep`] when nesting exceeds
    /// [`MAX_DEPTH`] and [`ManifestLoadError::DuplicateRoute`] when two nodes
    /// share a URL key.
    pub fn flatten(root: &ManifestNode, base: &str) -> Result<Self, ManifestLoadError> {
        let mut table = Self {
            base: base.to_owned(),
            ..Self::default()
        };
        table.insert(root, None, 0)?;
        tracing::debug!(base, routes = table.nodes.len(), "Flattened manifest");
        Ok(table)
    }

    fn insert(
        &mut self,
        node: &ManifestNode,
        parent: Option<usize>,
        depth: usize,
    ) -> Result<(), ManifestLoadError> {
        let path = route_path(&self.base, &node.slug);
        if depth > MAX_DEPTH {
            return Err(ManifestLoadError::TooDeep {
                path,
                max: MAX_DEPTH,
            });
        }
        if self.path_index.contains_key(&path) {
            return Err(ManifestLoadError::DuplicateRoute(path));
        }

        let idx = self.nodes.len();
        self.path_index.insert(path.clone(), idx);
        self.nodes.push(RouteNode {
            path,
            slug: node.slug.clone(),
            title: node.title.clone(),
            node_type: node.node_type,
            content_path: node.content_path.clone(),
        });
        self.children.push(Vec::new());
        if let Some(parent) = parent {
            self.children[parent].push(idx);
        }

        for child in &node.children {
            self.insert(child, Some(idx), depth + 1)?;
        }
        Ok(())
    }

    /// Get node by URL path. Paths must match exactly.
    #[must_use]
    pub fn lookup(&self, path: &str) -> Option<&RouteNode> {
        self.path_index.get(path).map(|&i| &self.nodes[i])
    }

    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.path_index.contains_key(path)
    }

    /// Ordered children of `node`, empty for files and unknown nodes.
    #[must_use]
    pub fn children(&self, node: &RouteNode) -> Vec<&RouteNode> {
        self.path_index
            .get(&node.path)
            .map(|&idx| self.children[idx].iter().map(|&c| &self.nodes[c]).collect())
            .unwrap_or_default()
    }

    /// All nodes in pre-order.
    pub fn iter(&self) -> impl Iterator<Item = &RouteNode> {
        self.nodes.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
