//! Navigation controller.
//!
//! [`Navigator`] ties the pieces together: it loads the manifest, resolves
//! the host's current location, fetches node bodies through the content
//! cache, builds the views and mounts the result into the [`Host`].
//!
//! # Concurrency
//!
//! Renders are never cancelled. When a second navigation starts while the
//! first one is still waiting for content, both run to completion and the
//! one that mounts last wins, even if it is the older navigation.
//! [`Navigator::renders_in_flight`] exposes how many renders are pending.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use vault_manifest::{ManifestLoadError, ManifestState, ManifestStore, RouteNode, RouteTable};
use vault_source::{ContentSource, ManifestSource};

use crate::config::{NavEntry, SiteConfig, StaticPage};
use crate::content_cache::ContentCache;
use crate::host::Host;
use crate::resolver::{Route, StaticPages, resolve};
use crate::views::{breadcrumbs, files_and_dirs, navigation_bar, render_breadcrumbs, render_listing, rewrite_links};

const LOADING_HTML: &str = "<p>Loading...</p>";

/// Navigation event produced by the host binding layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NavigationIntent {
    /// Click on an element carrying `data-link`.
    LinkClick { href: String },
    /// Browser back/forward; the host location already changed.
    HistoryPop,
}

/// What a render mounted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rendered {
    Static,
    Node,
    NotFound,
}

/// Routes host navigation through the manifest, content cache and views.
pub struct Navigator<M, C, H> {
    config: SiteConfig,
    pages: StaticPages,
    nav: Vec<NavEntry>,
    manifest: ManifestStore<M>,
    content: ContentCache<C>,
    host: H,
    in_flight: AtomicUsize,
}

impl<M, C, H> Navigator<M, C, H>
where
    M: ManifestSource,
    C: ContentSource,
    H: Host,
{
    pub fn new(config: SiteConfig, manifest_source: M, content_source: C, host: H) -> Self {
        let pages = StaticPages::new(config.pages.clone());
        let nav = config.nav_entries();
        let manifest = ManifestStore::new(manifest_source, config.vault.base.clone());

        Self {
            config,
            pages,
            nav,
            manifest,
            content: ContentCache::new(content_source),
            host,
            in_flight: AtomicUsize::new(0),
        }
    }

    /// Mount a loading placeholder, load the manifest, mount the navigation
    /// bar and render the current location.
    ///
    /// On manifest failure an inline error is mounted and the error returned.
    pub async fn start(&self) -> Result<Rendered, ManifestLoadError> {
        self.host.mount_app(LOADING_HTML);

        if let Err(e) = self.manifest.load().await {
            tracing::error!(error = %e, "Failed to load manifest");
            self.host.mount_app(&format!(
                r#"<p class="error">Failed to load manifest: {}</p>"#,
                html_escape::encode_text(&e.to_string())
            ));
            return Err(e);
        }

        self.mount_nav(&self.host.location());
        Ok(self.render().await)
    }

    /// Handle one navigation intent.
    ///
    /// Returns `None` when the intent did not trigger a render.
    pub async fn handle(&self, intent: NavigationIntent) -> Option<Rendered> {
        match intent {
            NavigationIntent::LinkClick { href } => self.navigate(&href).await,
            NavigationIntent::HistoryPop => Some(self.render().await),
        }
    }

    /// Push `href` onto the history and render it, unless it is the current
    /// location.
    pub async fn navigate(&self, href: &str) -> Option<Rendered> {
        if href == self.host.location() {
            return None;
        }
        self.host.push_history(href);
        Some(self.render().await)
    }

    /// Render the host's current location.
    pub async fn render(&self) -> Rendered {
        let _guard = InFlight::enter(&self.in_flight);
        let path = self.host.location();

        let state = self.manifest.state();
        let empty = RouteTable::default();
        let routes = state.as_deref().map_or(&empty, ManifestState::routes);

        let rendered = match resolve(&path, &self.pages, routes) {
            Route::Static(page) => {
                self.render_static(page);
                Rendered::Static
            }
            Route::Node(node) => {
                self.render_node(&path, node, routes).await;
                Rendered::Node
            }
            Route::NotFound(path) => {
                self.render_not_found(&path);
                Rendered::NotFound
            }
        };

        self.mount_nav(&path);
        tracing::info!(path = %path, ?rendered, "Rendered");
        rendered
    }

    fn render_static(&self, page: &StaticPage) {
        self.host.set_title(&self.config.page_title(&page.title));
        self.host
            .mount_app(&format!(r#"<article class="content">{}</article>"#, page.content));
    }

    async fn render_node(&self, path: &str, node: &RouteNode, routes: &RouteTable) {
        self.host.set_title(&self.config.page_title(&node.title));

        let body = match &node.content_path {
            Some(content_path) => self.content.fetch_body(content_path).await.into_html(),
            None => String::new(),
        };
        let vault = &self.config.vault;
        let body = rewrite_links(&body, path, routes, vault);
        let crumbs = render_breadcrumbs(&breadcrumbs(path, routes, vault));
        let listing = files_and_dirs(node, routes, vault)
            .map(|listing| render_listing(&listing))
            .unwrap_or_default();

        self.host.mount_app(&format!(
            r#"{crumbs}{listing}<article class="content">{body}</article>"#
        ));
    }

    fn render_not_found(&self, path: &str) {
        self.host.set_title(&self.config.page_title("404"));
        self.host.mount_app(&format!(
            concat!(
                "<h1>404 - Page Not Found</h1>",
                "<p>The page you're looking for doesn't exist.</p>",
                r#"<p><a href="/" data-link>← Back to Home</a></p>"#,
                r#"<div class="path-info">Requested: {}</div>"#
            ),
            html_escape::encode_text(path)
        ));
    }

    fn mount_nav(&self, path: &str) {
        self.host
            .mount_nav(&navigation_bar(&self.nav, path, &self.config.vault));
    }

    /// Current path, as reported by the host.
    pub fn current_path(&self) -> String {
        self.host.location()
    }

    pub fn is_rendering(&self) -> bool {
        self.renders_in_flight() > 0
    }

    pub fn renders_in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Current manifest snapshot.
    pub fn manifest(&self) -> Option<Arc<ManifestState>> {
        self.manifest.state()
    }

    pub fn content(&self) -> &ContentCache<C> {
        &self.content
    }

    pub fn host(&self) -> &H {
        &self.host
    }
}

/// Counts a render as in flight until dropped.
struct InFlight<'a>(&'a AtomicUsize);

impl<'a> InFlight<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}
