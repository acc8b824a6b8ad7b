//! Manifest store for the vault router.
//!
//! The manifest is a JSON tree of directories and files served next to the
//! vault content. This crate parses it, flattens it into a URL-keyed
//! [`RouteTable`], and keeps the current snapshot in a [`ManifestStore`].
//!
//! [`build_manifest`] produces the same document from a vault directory on
//! disk.
//!
//! # Example
//!
//! ```ignore
//! use vault_manifest::ManifestStore;
//! use vault_source::DirSource;
//!
//! let store = ManifestStore::new(DirSource::new("public".into()), "/notes");
//! let state = store.load().await?;
//! let node = state.routes().lookup("/notes/nature/tundra");
//! ```

mod builder;
mod error;
mod model;
mod route_table;
mod store;

pub use builder::{BuildError, build_manifest};
pub use error::ManifestLoadError;
pub use model::{Manifest, ManifestNode, NodeType, ROOT_SLUG, route_path};
pub use route_table::{MAX_DEPTH, RouteNode, RouteTable};
pub use store::{ManifestState, ManifestStore};
