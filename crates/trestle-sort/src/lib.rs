//! Sort state and sort-link resolution for request-driven tables.
//!
//! This crate owns the sorting half of the Trestle table system:
//!
//! - [`SortState`]: the active ordering carried by a request. Absent, a
//!   single key, or an ordered tuple of keys, with `-` marking descending
//! - [`resolve`]: the pure sort-link resolver giving direction, label, and
//!   outbound URL for one sortable column header
//! - [`QueryParams`]: ordered, copyable query-string pairs with
//!   delete-by-key and re-encoding
//! - [`Dir`]: ascending/descending
//!
//! Nothing here touches templates or HTML; the composition crate and the
//! page-controller layer build on these types.
//!
//! # Quick Start
//!
//! ```rust
//! use trestle_sort::{resolve, Dir, QueryParams, SortState};
//!
//! // The request carries ?sort=-age&page=2
//! let params = QueryParams::parse("sort=-age&page=2");
//! let state = SortState::single(params.get("sort").unwrap());
//!
//! // Resolve the header link for the "age" column.
//! let link = resolve("age", &state, &params, "sort", None);
//! assert_eq!(link.direction, Some(Dir::Desc));
//! assert_eq!(link.label, "Age");
//! assert_eq!(link.url, "?sort=age&page=2");
//! ```
//!
//! # State Semantics
//!
//! | current state | clicked column | direction shown | next key |
//! |---------------|----------------|-----------------|----------|
//! | (unsorted)    | `age`          | none            | `age`    |
//! | `age`         | `age`          | asc             | `-age`   |
//! | `-age`        | `age`          | desc            | `age`    |
//!
//! A key and its `-`-prefixed counterpart are mutually exclusive in a
//! well-formed state; [`SortState::from_keys`] keeps the first of a
//! conflicting pair.

mod direction;
mod link;
mod params;
mod state;

pub use direction::Dir;
pub use link::{display_label, resolve, SortLink};
pub use params::QueryParams;
pub use state::{base_key, descending, is_descending_key, SortState, DESC_PREFIX};
