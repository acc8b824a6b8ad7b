//! URL classification.
//!
//! A path resolves, in priority order, to a static page, a manifest node,
//! or not-found. Matching is exact: no prefix matching and no trailing-slash
//! normalization.

use std::collections::HashMap;

use vault_manifest::{RouteNode, RouteTable};

use crate::config::StaticPage;

/// Static pages indexed by path.
#[derive(Debug, Default)]
pub struct StaticPages {
    pages: Vec<StaticPage>,
    index: HashMap<String, usize>,
}

impl StaticPages {
    /// Index `pages`. When two pages share a path the first one wins.
    #[must_use]
    pub fn new(pages: Vec<StaticPage>) -> Self {
        let mut index = HashMap::with_capacity(pages.len());
        for (i, page) in pages.iter().enumerate() {
            index.entry(page.path.clone()).or_insert(i);
        }
        Self { pages, index }
    }

    #[must_use]
    pub fn get(&self, path: &str) -> Option<&StaticPage> {
        self.index.get(path).map(|&i| &self.pages[i])
    }
}

/// Resolution outcome for a URL path.
#[derive(Debug, PartialEq, Eq)]
pub enum Route<'a> {
    Static(&'a StaticPage),
    Node(&'a RouteNode),
    /// Nothing matched; carries the requested path.
    NotFound(String),
}

/// Classify `path` against the static pages and route table.
#[must_use]
pub fn resolve<'a>(path: &str, pages: &'a StaticPages, routes: &'a RouteTable) -> Route<'a> {
    if let Some(page) = pages.get(path) {
        return Route::Static(page);
    }
    match routes.lookup(path) {
        Some(node) => Route::Node(node),
        None => Route::NotFound(path.to_owned()),
    }
}
