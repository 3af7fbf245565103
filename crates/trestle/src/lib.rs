//! # Trestle - Declarative HTML Tables for Server-Side Rendering
//!
//! Trestle renders sortable, actionable, and nestable HTML tables from
//! arbitrary row data inside MiniJinja-based pages, without repeating
//! table boilerplate across templates. Pages declare structure — headers,
//! per-row actions, sub-tables, sort links — and Trestle composes the
//! render plan and emits the markup through overridable output templates.
//!
//! This crate is the facade: it carries the default Bootstrap 4 templates,
//! the [`Tables`] setup builder, and the page-controller ordering behavior.
//! The composition core lives in `trestle-compose`; sort state and link
//! resolution live in `trestle-sort`.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use minijinja::Value;
//! use trestle::prelude::*;
//!
//! let tables = Tables::builder()
//!     .routes(RouteTable::new().route("person-edit", "/people/{}/edit"))
//!     .build()
//!     .unwrap();
//!
//! let block = Block::new()
//!     .header(Header::new().key("first_name").sortable(true))
//!     .header(Header::new().key("last_name"))
//!     .row_action(RowAction::view("person-edit").args(["id"]).classname("fa fa-edit"));
//!
//! let data = Value::from_serialize(&serde_json::json!([
//!     {"id": 1, "first_name": "John", "last_name": "Doe"},
//!     {"id": 2, "first_name": "Jane", "last_name": "Doe"},
//! ]));
//!
//! let html = tables
//!     .render(&data, &block, &TableOptions::new(), &Arc::new(Scope::new()))
//!     .unwrap();
//! assert!(html.contains("/people/1/edit"));
//! ```
//!
//! ## Sorting End to End
//!
//! A page controller implements [`views::SortedView`], orders its data by
//! the resulting state, and contributes the state into the scope; sortable
//! headers then render toggling sort links automatically:
//!
//! ```rust
//! use std::sync::Arc;
//! use trestle::prelude::*;
//! use trestle::views::SortedView;
//!
//! struct PeoplePage;
//! impl SortedView for PeoplePage {
//!     fn default_ordering(&self) -> SortState {
//!         SortState::single("last_name")
//!     }
//! }
//!
//! let params = QueryParams::parse("sort=-age&page=2");
//! let ordering = PeoplePage.ordering(&params);           // orders the query
//! assert_eq!(ordering, SortState::single("-age"));
//!
//! let scope = PeoplePage.contribute_context(&params, Scope::new())
//!     .with("request", RequestInfo::new("/people", params).into_value());
//! let scope = Arc::new(scope);
//! // scope now carries order_by, order_by_field, and request for sortlink().
//! ```
//!
//! ## Sub-Tables
//!
//! A sub-table body is evaluated once per row with the row bound as
//! `tablerow`; nested tables are independent composer invocations with
//! their own identifiers, so nesting is unbounded:
//!
//! ```rust
//! use trestle::prelude::*;
//!
//! let block = Block::new()
//!     .header(Header::new().key("first_name"))
//!     .subtable(Subtable::table(NestedTable::new(
//!         "tablerow.favorite_foods",
//!         Block::new().header(Header::new().key("0").text("Name")),
//!     )));
//! ```

pub mod assets;
pub mod prelude;
mod setup;
pub mod views;

pub use setup::{SetupError, Tables, TablesBuilder};

// Re-export the composition core and sorting types at the crate root.
pub use trestle_compose::{
    attr_or_item, item_or_default, register_filters, relevant, sort_state_value, Block, Captured,
    ComposeError, Composer, Condition, ForEach, Header, NestedTable, Node, RequestInfo,
    RouteError, RouteResolver, RouteTable, RowAction, Scope, Subtable, SubtableBody, TableId,
    TableOptions, TablePlan, DEFAULT_SORTLINK_TEMPLATE, DEFAULT_TABLE_TEMPLATE,
    DEFAULT_TOGGLE_TEXT,
};
pub use trestle_sort::{
    base_key, descending, display_label, is_descending_key, resolve, Dir, QueryParams, SortLink,
    SortState,
};
