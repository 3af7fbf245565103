//! The table render plan: everything one table needs for output.
//!
//! A [`TablePlan`] is produced per table invocation and discarded after
//! rendering. It carries the ordered declaration collections, the data rows
//! untouched, the computed column count, and a process-unique identifier
//! used for collapsible sub-table anchors.

use minijinja::Value;
use uuid::Uuid;

use crate::declaration::{Captured, Header, RowAction, Subtable};
use crate::error::ComposeError;

/// Default output template for a whole table.
pub const DEFAULT_TABLE_TEMPLATE: &str = "trestle/bootstrap4.html";

/// Default output template for a sortable column header link.
pub const DEFAULT_SORTLINK_TEMPLATE: &str = "trestle/bootstrap4_sortlink.html";

/// Default toggle text for the sub-table column.
pub const DEFAULT_TOGGLE_TEXT: &str = "View Details";

/// A process-unique table identifier.
///
/// Useful for wiring collapsible sub-table rows to their toggles; fresh per
/// table invocation, independent across nesting levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TableId(Uuid);

impl TableId {
    pub(crate) fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for TableId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

/// Options accepted by a table declaration.
///
/// Recognized option names mirror the declarative surface: `collapseclass`,
/// `templatename`, `subtabletoggletext`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TableOptions {
    /// Extra class for the collapsible sub-table rows.
    pub collapse_class: Option<String>,
    /// Output template name overriding [`DEFAULT_TABLE_TEMPLATE`].
    pub template_name: Option<String>,
    /// Toggle text overriding [`DEFAULT_TOGGLE_TEXT`].
    pub toggle_text: Option<String>,
}

impl TableOptions {
    /// Creates empty options (all defaults).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the collapsible row class.
    pub fn collapse_class(mut self, classname: impl Into<String>) -> Self {
        self.collapse_class = Some(classname.into());
        self
    }

    /// Sets the output template name.
    pub fn template_name(mut self, name: impl Into<String>) -> Self {
        self.template_name = Some(name.into());
        self
    }

    /// Sets the sub-table toggle text.
    pub fn toggle_text(mut self, text: impl Into<String>) -> Self {
        self.toggle_text = Some(text.into());
        self
    }

    /// Builds options from an option map, rejecting unrecognized names.
    pub fn from_options(
        options: &std::collections::BTreeMap<String, Value>,
    ) -> Result<Self, ComposeError> {
        let mut built = TableOptions::new();
        for (name, value) in options {
            let text = if value.is_undefined() || value.is_none() {
                None
            } else {
                Some(value.to_string())
            };
            match name.as_str() {
                "collapseclass" => built.collapse_class = text,
                "templatename" => built.template_name = text,
                "subtabletoggletext" => built.toggle_text = text,
                _ => {
                    return Err(ComposeError::InvalidOption {
                        tag: "table",
                        option: name.clone(),
                    })
                }
            }
        }
        Ok(built)
    }
}

/// The declaration collections populated by one evaluation pass.
#[derive(Debug, Default)]
pub(crate) struct Declarations {
    pub(crate) headers: Vec<Captured<Header>>,
    pub(crate) row_actions: Vec<Captured<RowAction>>,
    pub(crate) subtables: Vec<Captured<Subtable>>,
}

/// The fully composed description of one table, ready for output
/// generation.
#[derive(Debug)]
pub struct TablePlan {
    /// Process-unique identifier for this table invocation.
    pub id: TableId,
    /// Ordered header declarations with their captured scopes.
    pub headers: Vec<Captured<Header>>,
    /// Ordered row-action declarations.
    pub row_actions: Vec<Captured<RowAction>>,
    /// Ordered sub-table declarations.
    pub subtables: Vec<Captured<Subtable>>,
    /// The data rows, unmodified and in order.
    pub rows: Vec<Value>,
    /// Class for the collapsible sub-table rows, when sub-tables exist.
    pub collapse_class: Option<String>,
    /// Toggle text for the sub-table column.
    pub toggle_text: String,
}

impl TablePlan {
    pub(crate) fn new(
        id: TableId,
        declarations: Declarations,
        rows: Vec<Value>,
        options: &TableOptions,
    ) -> Self {
        Self {
            id,
            headers: declarations.headers,
            row_actions: declarations.row_actions,
            subtables: declarations.subtables,
            rows,
            collapse_class: options.collapse_class.clone(),
            toggle_text: options
                .toggle_text
                .clone()
                .unwrap_or_else(|| DEFAULT_TOGGLE_TEXT.to_string()),
        }
    }

    /// Total column count: one per header, plus one if any row actions
    /// exist, plus one if any sub-tables exist.
    pub fn column_count(&self) -> usize {
        let mut count = self.headers.len();
        if !self.row_actions.is_empty() {
            count += 1;
        }
        if !self.subtables.is_empty() {
            count += 1;
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn table_ids_are_unique() {
        let a = TableId::new();
        let b = TableId::new();
        assert_ne!(a, b);
        assert_ne!(a.to_string(), b.to_string());
    }

    #[test]
    fn options_from_map() {
        let mut map = BTreeMap::new();
        map.insert("collapseclass".to_string(), Value::from("bg-light"));
        map.insert("subtabletoggletext".to_string(), Value::from("More"));
        let options = TableOptions::from_options(&map).unwrap();
        assert_eq!(options.collapse_class.as_deref(), Some("bg-light"));
        assert_eq!(options.toggle_text.as_deref(), Some("More"));
        assert!(options.template_name.is_none());
    }

    #[test]
    fn options_reject_unknown_names() {
        let mut map = BTreeMap::new();
        map.insert("border".to_string(), Value::from("1"));
        let err = TableOptions::from_options(&map).unwrap_err();
        assert!(matches!(
            err,
            ComposeError::InvalidOption { tag: "table", .. }
        ));
    }
}
