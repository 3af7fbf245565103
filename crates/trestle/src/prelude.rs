//! Convenience re-exports for table-rendering pages.
//!
//! ```rust
//! use trestle::prelude::*;
//! ```

pub use crate::assets::FRAMEWORK_TEMPLATES;
pub use crate::setup::{SetupError, Tables, TablesBuilder};
pub use crate::views::SortedView;

pub use trestle_compose::{
    Block, ComposeError, Composer, Condition, ForEach, Header, NestedTable, RequestInfo,
    RouteResolver, RouteTable, RowAction, Scope, Subtable, TableOptions, TablePlan,
};
pub use trestle_sort::{Dir, QueryParams, SortState};
