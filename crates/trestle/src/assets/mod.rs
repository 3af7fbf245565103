//! Framework-supplied assets (default output templates).
//!
//! This module contains the default templates the table system renders
//! through when a declaration does not name its own. They are sensible
//! Bootstrap 4 defaults, overridable by registering a user template under
//! the same name.
//!
//! ## Namespacing
//!
//! Framework templates use the `trestle/` prefix (e.g.
//! `trestle/bootstrap4.html`).
//!
//! ## Resolution Priority
//!
//! Framework templates are registered first, so anything added afterwards
//! under the same name wins:
//!
//! 1. User templates (highest)
//! 2. Framework templates (lowest)

mod templates;

pub use templates::FRAMEWORK_TEMPLATES;
