//! HTML fragments derived from a resolved route.
//!
//! Everything here is pure: inputs are the current path, the route table and
//! the vault namespace, outputs are data structures and HTML strings. Links
//! meant for in-app navigation carry the boolean `data-link` attribute.

mod breadcrumbs;
mod links;
mod listing;
mod nav;

pub use breadcrumbs::{Breadcrumb, breadcrumbs, render_breadcrumbs};
pub use links::rewrite_links;
pub use listing::{Listing, ListingEntry, files_and_dirs, render_listing};
pub use nav::{is_nav_active, navigation_bar};
