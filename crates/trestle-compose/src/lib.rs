//! # Trestle Compose - Declarative Table Composition
//!
//! `trestle-compose` turns a declarative block of table declarations plus a
//! data sequence into rendered HTML, via a MiniJinja environment. It is the
//! core of the Trestle table system; the `trestle` facade crate adds the
//! default Bootstrap 4 templates and page-controller glue.
//!
//! ## Core Concepts
//!
//! - [`Block`]: the declarative body of one table — headers, row actions,
//!   sub-tables, plus the conditionals and loops guarding them
//! - [`relevant`]: the conditional filter — a pure transform pruning a
//!   block to its render-relevant nodes before evaluation
//! - [`Composer`]: evaluates the filtered block once, captures each
//!   declaration with its lexical [`Scope`], and produces a [`TablePlan`]
//!   (or rendered markup through an output template)
//! - [`Scope`]: immutable chain of named bindings; deferred bodies render
//!   against the scope captured when their declaration registered
//! - [`RouteResolver`]: the seam to URL routing for row actions
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use minijinja::{Environment, Value};
//! use trestle_compose::{register_filters, Block, Composer, Header, Scope, TableOptions};
//!
//! let mut env = Environment::new();
//! register_filters(&mut env);
//! env.add_template_owned(
//!     "trestle/bootstrap4.html".to_string(),
//!     "<table>{% for h in tableheaders %}<th>{{ h.text }}</th>{% endfor %}</table>"
//!         .to_string(),
//! )
//! .unwrap();
//!
//! let composer = Composer::new(Arc::new(env));
//! let block = Block::new()
//!     .header(Header::new().key("first_name"))
//!     .header(Header::new().key("last_name"));
//! let data = Value::from_serialize(&serde_json::json!([
//!     {"first_name": "John", "last_name": "Doe"},
//! ]));
//!
//! let html = composer
//!     .render(&data, &block, &TableOptions::new(), &Arc::new(Scope::new()))
//!     .unwrap();
//! assert!(html.contains("<th>First Name</th>"));
//! ```
//!
//! ## Evaluation Model
//!
//! Composition is a single pass per table, not per row:
//!
//! 1. The block is filtered structurally ([`relevant`]) — no condition is
//!    evaluated, so the result can be reused.
//! 2. The filtered block is evaluated once against the table scope;
//!    declarations append themselves, in order, into the plan's
//!    collections. Conditions take their first truthy branch; loops
//!    iterate structure and push a child scope per element.
//! 3. The output template receives the plan and iterates rows × headers,
//!    calling back into deferred bodies per row.

// Internal modules
mod compose;
mod declaration;
mod emit;
mod error;
mod filter;
mod filters;
mod node;
mod plan;
mod request;
mod route;
mod row;
mod scope;

// Error types
pub use error::{ComposeError, RouteError};

// Declaration tree
pub use declaration::{Captured, Header, NestedTable, RowAction, Subtable, SubtableBody};
pub use node::{Block, Condition, ForEach, Node};

// Conditional filter
pub use filter::relevant;

// Composer and plan
pub use compose::Composer;
pub use plan::{
    TableId, TableOptions, TablePlan, DEFAULT_SORTLINK_TEMPLATE, DEFAULT_TABLE_TEMPLATE,
    DEFAULT_TOGGLE_TEXT,
};

// Scope and request collaborators
pub use request::RequestInfo;
pub use scope::Scope;

// Routing seam
pub use route::{RouteResolver, RouteTable};

// Row lookup and template surface
pub use filters::{register_filters, sort_state_value};
pub use row::{attr_or_item, item_or_default};
