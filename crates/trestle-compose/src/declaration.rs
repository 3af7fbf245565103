//! Table declarations: headers, row actions, and sub-tables.
//!
//! A declaration is one structural unit registered while a table block is
//! evaluated. Declarations are immutable once constructed; the scope their
//! deferred body closed over is attached at registration time as a
//! [`Captured`] wrapper (a reference to the live scope, not a copy).
//!
//! Each declaration kind also has a loosely-typed [`Header::from_options`]
//! style constructor for callers driving composition from option maps; an
//! option name outside the recognized set is a configuration error reported
//! immediately, before any rendering begins.

use std::collections::BTreeMap;
use std::sync::Arc;

use minijinja::Value;

use crate::error::ComposeError;
use crate::node::Block;
use crate::plan::TableOptions;
use crate::scope::Scope;

/// A column header declaration.
///
/// Cell content comes from `key` lookup on each row unless a `body`
/// fragment is present, in which case the fragment is rendered per row with
/// the row bound as `tablerow`. The display text derives from the key
/// (underscores to spaces, title-cased) when no explicit `text` is given.
///
/// # Examples
///
/// ```rust
/// use trestle_compose::Header;
///
/// let plain = Header::new().key("first_name");
/// assert_eq!(plain.display_text(), "First Name");
///
/// let sortable = Header::new().key("age").sortable(true);
/// assert!(sortable.sortable);
///
/// let custom = Header::new()
///     .text("Name")
///     .body("<span>{{ tablerow.first_name }} {{ tablerow.last_name }}</span>");
/// assert!(custom.body.is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Header {
    /// Row attribute or key to read cell values from.
    pub key: Option<String>,
    /// Explicit display label.
    pub text: Option<String>,
    /// Whether the header renders a sort link.
    pub sortable: bool,
    /// Optional class name for the header cell.
    pub container_classname: Option<String>,
    /// Deferred fragment rendered as cell content instead of key lookup.
    pub body: Option<String>,
}

impl Header {
    /// Creates an empty header declaration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the row key cell values are read from.
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Sets the explicit display label.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Marks the header as sortable.
    pub fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    /// Sets the header cell class name.
    pub fn container_classname(mut self, classname: impl Into<String>) -> Self {
        self.container_classname = Some(classname.into());
        self
    }

    /// Sets a deferred body fragment used as cell content.
    pub fn body(mut self, fragment: impl Into<String>) -> Self {
        self.body = Some(fragment.into());
        self
    }

    /// The label shown in the header row.
    pub fn display_text(&self) -> String {
        if let Some(text) = &self.text {
            return text.clone();
        }
        match &self.key {
            Some(key) => trestle_sort::display_label(key),
            None => String::new(),
        }
    }

    /// Builds a header from an option map, rejecting unrecognized names.
    ///
    /// Recognized options: `key`, `text`, `sortable`, `container_classname`.
    pub fn from_options(options: &BTreeMap<String, Value>) -> Result<Self, ComposeError> {
        let mut header = Header::new();
        for (name, value) in options {
            match name.as_str() {
                "key" => header.key = non_empty(value),
                "text" => header.text = non_empty(value),
                "sortable" => header.sortable = value.is_true(),
                "container_classname" => header.container_classname = non_empty(value),
                _ => {
                    return Err(ComposeError::InvalidOption {
                        tag: "tableheader",
                        option: name.clone(),
                    })
                }
            }
        }
        Ok(header)
    }
}

/// A per-row action declaration: a link column entry built by reversing a
/// named route with arguments read off the row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowAction {
    /// Identifier of the target route.
    pub view: String,
    /// Row attribute names resolved into route arguments, in order.
    pub args: Vec<String>,
    /// Optional icon/link class name.
    pub classname: Option<String>,
    /// Optional link text.
    pub text: Option<String>,
    /// Whether to append a return-to-this-page `next` parameter.
    pub addnextparam: bool,
}

impl RowAction {
    /// Creates an action targeting the given route.
    pub fn view(view: impl Into<String>) -> Self {
        Self {
            view: view.into(),
            args: Vec::new(),
            classname: None,
            text: None,
            addnextparam: false,
        }
    }

    /// Sets the row attribute names used as route arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the icon/link class name.
    pub fn classname(mut self, classname: impl Into<String>) -> Self {
        self.classname = Some(classname.into());
        self
    }

    /// Sets the link text.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Appends a return-to-this-page parameter to the action link.
    pub fn addnextparam(mut self, add: bool) -> Self {
        self.addnextparam = add;
        self
    }

    /// Builds an action from an option map, rejecting unrecognized names.
    ///
    /// Recognized options: `view`, `args` (space-separated attribute
    /// names), `classname`, `text`, `addnextparam`. A missing `view` is a
    /// configuration error.
    pub fn from_options(options: &BTreeMap<String, Value>) -> Result<Self, ComposeError> {
        let mut view = None;
        let mut args = Vec::new();
        let mut classname = None;
        let mut text = None;
        let mut addnextparam = false;
        for (name, value) in options {
            match name.as_str() {
                "view" => view = non_empty(value),
                "args" => {
                    args = value
                        .to_string()
                        .split(' ')
                        .filter(|arg| !arg.is_empty())
                        .map(str::to_string)
                        .collect();
                }
                "classname" => classname = non_empty(value),
                "text" => text = non_empty(value),
                "addnextparam" => addnextparam = value.is_true(),
                _ => {
                    return Err(ComposeError::InvalidOption {
                        tag: "tablerowaction",
                        option: name.clone(),
                    })
                }
            }
        }
        let view = view.ok_or(ComposeError::MissingArgument("tablerowaction 'view'"))?;
        Ok(Self {
            view,
            args,
            classname,
            text,
            addnextparam,
        })
    }
}

/// A sub-table declaration: a deferred body evaluated once per row of the
/// outer table, with the row bound as `tablerow`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subtable {
    /// The deferred render payload.
    pub body: SubtableBody,
}

impl Subtable {
    /// Creates a sub-table whose body is a template fragment.
    pub fn fragment(source: impl Into<String>) -> Self {
        Self {
            body: SubtableBody::Fragment(source.into()),
        }
    }

    /// Creates a sub-table whose body is a nested table over row data.
    pub fn table(nested: NestedTable) -> Self {
        Self {
            body: SubtableBody::Nested(Box::new(nested)),
        }
    }
}

/// The payload of a [`Subtable`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubtableBody {
    /// A template fragment rendered per row.
    Fragment(String),
    /// A full nested table composed per row.
    Nested(Box<NestedTable>),
}

/// A nested table definition: where its rows come from (a dotted path
/// resolved against the per-row scope, e.g. `tablerow.favorite_foods`),
/// its declaration block, and its options.
///
/// Each per-row render is an independent composer invocation with its own
/// table identifier; nesting depth is unbounded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NestedTable {
    /// Dotted path to the data sequence, resolved per row.
    pub source: String,
    /// The nested table's declaration block.
    pub block: Block,
    /// Options for the nested table.
    pub options: TableOptions,
}

impl NestedTable {
    /// Creates a nested table reading rows from `source`.
    pub fn new(source: impl Into<String>, block: Block) -> Self {
        Self {
            source: source.into(),
            block,
            options: TableOptions::new(),
        }
    }

    /// Sets the nested table's options.
    pub fn options(mut self, options: TableOptions) -> Self {
        self.options = options;
        self
    }
}

/// A declaration plus the lexical scope captured when it registered.
///
/// The scope is held by reference (`Arc`); it stays valid exactly as long
/// as the render plan that owns this capture.
#[derive(Debug, Clone)]
pub struct Captured<D> {
    /// The declaration.
    pub decl: D,
    /// The scope active at declaration time.
    pub scope: Arc<Scope>,
}

impl<D> Captured<D> {
    pub(crate) fn new(decl: D, scope: &Arc<Scope>) -> Self {
        Self {
            decl,
            scope: Arc::clone(scope),
        }
    }
}

fn non_empty(value: &Value) -> Option<String> {
    if value.is_undefined() || value.is_none() {
        return None;
    }
    let text = value.to_string();
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}
