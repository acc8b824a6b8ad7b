//! Manifest generation from a ready-to-serve vault directory.
//!
//! Rules:
//! - a directory is a node only if it contains `README.md`; its content is
//!   the `README.html` beside it
//! - `graphics` directories and hidden entries are skipped
//! - `.html` files other than `README.html` become file nodes titled by
//!   their stem
//! - entries are visited in sorted order

use std::fs;
use std::path::{Path, PathBuf};

use crate::model::{Manifest, ManifestNode, ROOT_SLUG};

const README_SOURCE: &str = "README.md";
const README_HTML: &str = "README.html";
const GRAPHICS_DIR: &str = "graphics";
const ROOT_TITLE: &str = "Home";

/// Error returned when a manifest cannot be built.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// Vault directory does not exist.
    #[error("Vault directory not found: {}", .0.display())]
    NotFound(PathBuf),
    /// Vault root has no `README.md`.
    #[error("Vault root is missing README.md: {}", .0.display())]
    MissingRootReadme(PathBuf),
    /// Directory could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Scan `vault_dir` and build its manifest.
pub fn build_manifest(vault_dir: &Path) -> Result<Manifest, BuildError> {
    if !vault_dir.is_dir() {
        return Err(BuildError::NotFound(vault_dir.to_path_buf()));
    }

    let root = build_directory(vault_dir, "")?
        .ok_or_else(|| BuildError::MissingRootReadme(vault_dir.to_path_buf()))?;
    tracing::info!(
        dir = %vault_dir.display(),
        nodes = root.node_count(),
        "Built manifest"
    );
    Ok(Manifest { root })
}

/// Build the node for `dir`, whose path relative to the vault root is `rel`.
fn build_directory(dir: &Path, rel: &str) -> Result<Option<ManifestNode>, BuildError> {
    if !dir.join(README_SOURCE).is_file() {
        tracing::debug!(dir = %dir.display(), "Skipping directory without README.md");
        return Ok(None);
    }

    let mut node = if rel.is_empty() {
        ManifestNode::directory(ROOT_SLUG, ROOT_TITLE)
    } else {
        let name = rel.rsplit('/').next().unwrap_or(rel);
        ManifestNode::directory(rel, name)
    };
    node.content_path = Some(web_path(&join(rel, README_HTML)));

    let read_err = |source| BuildError::Io {
        path: dir.to_path_buf(),
        source,
    };
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_err)? {
        let entry = entry.map_err(read_err)?;
        let path = entry.path();
        // file_type() does not follow symlinks, so linked directories cannot loop
        let file_type = entry.file_type().map_err(|source| BuildError::Io {
            path: path.clone(),
            source,
        })?;
        let Ok(name) = entry.file_name().into_string() else {
            tracing::warn!(path = %path.display(), "Skipping entry with non-UTF-8 name");
            continue;
        };
        entries.push((name, file_type, path));
    }
    entries.sort_by(|a, b| a.0.cmp(&b.0));

    for (name, file_type, path) in entries {
        if name.starts_with('.') {
            continue;
        }

        if file_type.is_dir() {
            if name == GRAPHICS_DIR {
                continue;
            }
            if let Some(child) = build_directory(&path, &join(rel, &name))? {
                node.children.push(child);
            }
        } else if file_type.is_file()
            && name != README_HTML
            && let Some(stem) = name.strip_suffix(".html")
        {
            node.children.push(ManifestNode::file(
                join(rel, stem),
                stem,
                web_path(&join(rel, &name)),
            ));
        }
    }

    Ok(Some(node))
}

fn join(rel: &str, name: &str) -> String {
    if rel.is_empty() {
        name.to_owned()
    } else {
        format!("{rel}/{name}")
    }
}

fn web_path(rel: &str) -> String {
    format!("/{rel}")
}
