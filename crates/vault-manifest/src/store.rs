//! Manifest loading with atomic snapshot replacement.
//!
//! [`ManifestStore`] owns the parsed tree and its [`RouteTable`]. Each
//! successful [`load`](ManifestStore::load) builds a fresh snapshot and swaps
//! it in under a write lock, so readers always see either the previous
//! complete state or the new one.

use std::sync::{Arc, RwLock};

use vault_source::ManifestSource;

use crate::error::ManifestLoadError;
use crate::model::Manifest;
use crate::route_table::RouteTable;

/// Immutable snapshot of one manifest load.
#[derive(Debug)]
pub struct ManifestState {
    manifest: Manifest,
    routes: RouteTable,
}

impl ManifestState {
    /// Parse and flatten a manifest document.
    pub fn from_json(json: &str, base: &str) -> Result<Self, ManifestLoadError> {
        let manifest = Manifest::parse(json)?;
        let routes = RouteTable::flatten(&manifest.root, base)?;
        Ok(Self { manifest, routes })
    }

    #[must_use]
    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    #[must_use]
    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }
}

/// Owner of the current manifest snapshot.
pub struct ManifestStore<S> {
    source: S,
    base: String,
    current: RwLock<Option<Arc<ManifestState>>>,
}

impl<S: ManifestSource> ManifestStore<S> {
    /// Create an empty store that flattens routes under `base`.
    pub fn new(source: S, base: impl Into<String>) -> Self {
        Self {
            source,
            base: base.into(),
            current: RwLock::new(None),
        }
    }

    /// Fetch, parse and flatten the manifest, then replace the snapshot.
    ///
    /// A failed load leaves the previous snapshot in place.
    pub async fn load(&self) -> Result<Arc<ManifestState>, ManifestLoadError> {
        let json = self.source.fetch_manifest().await?;
        let state = Arc::new(ManifestState::from_json(&json, &self.base)?);

        *self.current.write().unwrap() = Some(Arc::clone(&state));
        tracing::info!(routes = state.routes.len(), "Loaded manifest");
        Ok(state)
    }

    /// Current snapshot, `None` before the first successful load.
    pub fn state(&self) -> Option<Arc<ManifestState>> {
        self.current.read().unwrap().clone()
    }
}
