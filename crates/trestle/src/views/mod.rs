//! Page-controller behaviors for table-backed pages.
//!
//! Controllers that list sortable data implement [`SortedView`]: the
//! ordering comes from the query string when present, from the
//! controller's default otherwise, and the active state is contributed to
//! the rendering scope so sort links can read it.

mod ordering;

pub use ordering::{SortedView, DEFAULT_ORDER_BY_FIELD};
