//! Transport abstraction for the vault router.
//!
//! This crate provides the [`ManifestSource`] and [`ContentSource`] traits
//! that decouple the router core from how the manifest and node bodies are
//! fetched. This enables:
//!
//! - **Unit testing** without network access
//! - **Backend flexibility** (HTTP, local directory, in-memory)
//! - **Clean separation** between route resolution and I/O
//!
//! # Architecture
//!
//! The crate provides:
//! - [`ManifestSource`] / [`ContentSource`] traits returning `Send` futures
//! - [`DirSource`] reading a ready-to-serve vault directory
//! - [`MockSource`] for testing (behind `mock` feature flag)
//!
//! # Example
//!
//! ```ignore
//! use std::path::PathBuf;
//! use vault_source::{DirSource, ManifestSource};
//!
//! let source = DirSource::new(PathBuf::from("public"));
//! let json = source.fetch_manifest().await?;
//! ```

mod fs;
#[cfg(any(test, feature = "mock"))]
mod mock;
mod source;

pub use fs::{DEFAULT_MANIFEST_FILE, DirSource};
#[cfg(any(test, feature = "mock"))]
pub use mock::MockSource;
pub use source::{ContentSource, ManifestSource, SourceError, SourceErrorKind};
