//! Memoized body fetching.
//!
//! Bodies are cached by content path for the lifetime of the cache and never
//! invalidated. Failures are not cached, so navigating to the same node again
//! retries the fetch.

use std::collections::HashMap;
use std::sync::Mutex;

use vault_source::ContentSource;

/// Result of fetching a node's body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ContentBody {
    /// Body served by the source (or the cache).
    Loaded(String),
    /// Inline error fragment shown in place of the body.
    Failed(String),
}

impl ContentBody {
    /// HTML to mount in the content area.
    #[must_use]
    pub fn html(&self) -> &str {
        match self {
            Self::Loaded(html) | Self::Failed(html) => html,
        }
    }

    #[must_use]
    pub fn into_html(self) -> String {
        match self {
            Self::Loaded(html) | Self::Failed(html) => html,
        }
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }
}

/// Content-path keyed body cache in front of a [`ContentSource`].
pub struct ContentCache<C> {
    source: C,
    bodies: Mutex<HashMap<String, String>>,
}

impl<C: ContentSource> ContentCache<C> {
    pub fn new(source: C) -> Self {
        Self {
            source,
            bodies: Mutex::new(HashMap::new()),
        }
    }

    /// Return the cached body, or fetch and cache it.
    ///
    /// Never fails: transport errors are logged and turned into
    /// [`ContentBody::Failed`].
    pub async fn fetch_body(&self, content_path: &str) -> ContentBody {
        let cached = self.bodies.lock().unwrap().get(content_path).cloned();
        if let Some(body) = cached {
            tracing::debug!(content_path, "Content cache hit");
            return ContentBody::Loaded(body);
        }

        match self.source.fetch_content(content_path).await {
            Ok(body) => {
                self.bodies
                    .lock()
                    .unwrap()
                    .insert(content_path.to_owned(), body.clone());
                ContentBody::Loaded(body)
            }
            Err(e) => {
                tracing::warn!(content_path, error = %e, "Failed to load content");
                ContentBody::Failed(error_fragment(content_path))
            }
        }
    }

    /// Whether `content_path` has a cached body.
    pub fn contains(&self, content_path: &str) -> bool {
        self.bodies.lock().unwrap().contains_key(content_path)
    }

    pub fn len(&self) -> usize {
        self.bodies.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn error_fragment(content_path: &str) -> String {
    format!(
        r#"<p class="error">Failed to load content: {}</p>"#,
        html_escape::encode_text(content_path)
    )
}
