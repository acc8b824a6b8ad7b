//! Host page primitives.
//!
//! The router never touches a DOM directly. A [`Host`] implementation binds
//! it to whatever environment displays the pages: a browser binding layer,
//! or [`MemoryHost`] for headless rendering and tests.

use std::cell::{Cell, RefCell};

/// Location, history and mount points of the host page.
pub trait Host {
    /// Current URL path.
    fn location(&self) -> String;

    /// Push a history entry; `location` returns `path` afterwards.
    fn push_history(&self, path: &str);

    fn set_title(&self, title: &str);

    /// Replace the contents of the application root element.
    fn mount_app(&self, html: &str);

    /// Replace the contents of the navigation element.
    fn mount_nav(&self, html: &str);
}

/// In-memory host that records everything mounted into it.
#[derive(Debug, Default)]
pub struct MemoryHost {
    history: RefCell<Vec<String>>,
    title: RefCell<String>,
    app: RefCell<String>,
    nav: RefCell<String>,
    app_mounts: Cell<usize>,
}

impl MemoryHost {
    /// Create a host whose history starts at `location`.
    #[must_use]
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            history: RefCell::new(vec![location.into()]),
            ..Self::default()
        }
    }

    /// Step back one history entry, as the browser back button does.
    ///
    /// Returns `false` when already at the first entry.
    pub fn back(&self) -> bool {
        let mut history = self.history.borrow_mut();
        if history.len() > 1 {
            history.pop();
            true
        } else {
            false
        }
    }

    #[must_use]
    pub fn history(&self) -> Vec<String> {
        self.history.borrow().clone()
    }

    #[must_use]
    pub fn title(&self) -> String {
        self.title.borrow().clone()
    }

    /// Last HTML mounted into the application root.
    #[must_use]
    pub fn app(&self) -> String {
        self.app.borrow().clone()
    }

    /// Last HTML mounted into the navigation element.
    #[must_use]
    pub fn nav(&self) -> String {
        self.nav.borrow().clone()
    }

    /// Number of application mounts so far.
    #[must_use]
    pub fn app_mounts(&self) -> usize {
        self.app_mounts.get()
    }
}

impl Host for MemoryHost {
    fn location(&self) -> String {
        self.history.borrow().last().cloned().unwrap_or_else(|| "/".to_owned())
    }

    fn push_history(&self, path: &str) {
        self.history.borrow_mut().push(path.to_owned());
    }

    fn set_title(&self, title: &str) {
        *self.title.borrow_mut() = title.to_owned();
    }

    fn mount_app(&self, html: &str) {
        *self.app.borrow_mut() = html.to_owned();
        self.app_mounts.set(self.app_mounts.get() + 1);
    }

    fn mount_nav(&self, html: &str) {
        *self.nav.borrow_mut() = html.to_owned();
    }
}
