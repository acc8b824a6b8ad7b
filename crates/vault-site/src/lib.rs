//! Client-side routing for a static document vault.
//!
//! Turns the manifest served next to the vault into navigable pages:
//!
//! - [`resolve`] classifies a URL path as a static page, a manifest node or
//!   not-found
//! - [`ContentCache`] fetches node bodies once and keeps them
//! - [`views`] builds breadcrumbs, directory listings and the navigation bar,
//!   and rewrites links inside fetched content
//! - [`Navigator`] drives the render pipeline for every navigation intent and
//!   mounts the result into a [`Host`]
//!
//! # Example
//!
//! ```ignore
//! use vault_site::{MemoryHost, NavigationIntent, Navigator, SiteConfig};
//! use vault_source::DirSource;
//!
//! let source = DirSource::new("public".into());
//! let nav = Navigator::new(SiteConfig::default(), source.clone(), source, MemoryHost::new("/notes"));
//! nav.start().await?;
//! nav.handle(NavigationIntent::LinkClick { href: "/notes/nature".into() }).await;
//! ```

mod config;
mod content_cache;
mod host;
mod navigator;
mod resolver;
pub mod views;

pub use config::{NavEntry, SiteConfig, StaticPage, VaultPaths};
pub use content_cache::{ContentBody, ContentCache};
pub use host::{Host, MemoryHost};
pub use navigator::{NavigationIntent, Navigator, Rendered};
pub use resolver::{Route, StaticPages, resolve};
