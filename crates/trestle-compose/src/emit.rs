//! Template-facing objects for the output pass.
//!
//! The output template receives headers, row actions, and sub-tables as
//! MiniJinja objects. Each wraps its declaration, the scope captured at
//! registration, and the composer, so the template can ask for per-row
//! values without the composer iterating rows itself:
//!
//! - `header.cell(tablerow, rowloop.index)`: deferred body or key lookup
//! - `action.url(tablerow)`: route reversal plus the optional `next` param
//! - `sub.render(tablerow, rowloop.index)`: fragment or nested table
//!
//! Deferred bodies render with the captured scope flattened underneath the
//! implicit bindings: the row as `tablerow` and 1-based counters under
//! `rowloop`.

use std::collections::BTreeMap;
use std::sync::Arc;

use minijinja::value::{from_args, Object};
use minijinja::{Error, ErrorKind, State, Value};
use serde::Serialize;

use crate::compose::Composer;
use crate::declaration::{Header, RowAction, Subtable, SubtableBody};
use crate::error::ComposeError;
use crate::plan::TablePlan;
use crate::request::RequestInfo;
use crate::row;
use crate::scope::Scope;

/// Name under which deferred fragments render; the `.html` suffix keeps
/// auto-escaping on.
const FRAGMENT_TEMPLATE: &str = "trestle/fragment.html";

#[derive(Serialize)]
struct LoopState {
    index: usize,
    index0: usize,
    first: bool,
    last: bool,
    length: usize,
}

#[derive(Serialize)]
struct RowLoop {
    index: usize,
    index0: usize,
}

/// Jinja-style loop counters for one structural loop iteration.
pub(crate) fn loop_value(index0: usize, length: usize) -> Value {
    Value::from_serialize(&LoopState {
        index: index0 + 1,
        index0,
        first: index0 == 0,
        last: index0 + 1 == length,
        length,
    })
}

pub(crate) fn header_values(plan: &TablePlan, composer: &Composer) -> Value {
    Value::from(
        plan.headers
            .iter()
            .map(|captured| {
                Value::from_object(HeaderCell {
                    decl: captured.decl.clone(),
                    scope: Arc::clone(&captured.scope),
                    composer: composer.clone(),
                })
            })
            .collect::<Vec<Value>>(),
    )
}

pub(crate) fn action_values(
    plan: &TablePlan,
    composer: &Composer,
    request: Option<RequestInfo>,
) -> Value {
    Value::from(
        plan.row_actions
            .iter()
            .map(|captured| {
                Value::from_object(ActionLink {
                    decl: captured.decl.clone(),
                    composer: composer.clone(),
                    request: request.clone(),
                })
            })
            .collect::<Vec<Value>>(),
    )
}

pub(crate) fn subtable_values(plan: &TablePlan, composer: &Composer) -> Value {
    Value::from(
        plan.subtables
            .iter()
            .map(|captured| {
                Value::from_object(SubtablePane {
                    decl: captured.decl.clone(),
                    scope: Arc::clone(&captured.scope),
                    composer: composer.clone(),
                })
            })
            .collect::<Vec<Value>>(),
    )
}

/// One header column as seen by the output template.
#[derive(Debug)]
struct HeaderCell {
    decl: Header,
    scope: Arc<Scope>,
    composer: Composer,
}

impl Object for HeaderCell {
    fn get_value(self: &Arc<Self>, key: &Value) -> Option<Value> {
        match key.as_str()? {
            "key" => Some(Value::from(self.decl.key.clone())),
            "text" => Some(Value::from(self.decl.display_text())),
            "sortable" => Some(Value::from(self.decl.sortable)),
            "container_classname" => Some(Value::from(self.decl.container_classname.clone())),
            "has_body" => Some(Value::from(self.decl.body.is_some())),
            _ => None,
        }
    }

    fn call_method(
        self: &Arc<Self>,
        _state: &State<'_, '_>,
        method: &str,
        args: &[Value],
    ) -> Result<Value, Error> {
        match method {
            "cell" => {
                let (row, index): (Value, Option<usize>) = from_args(args)?;
                match &self.decl.body {
                    Some(source) => {
                        let ctx = row_context(&self.scope, row, index);
                        let html =
                            self.composer
                                .env()
                                .render_named_str(FRAGMENT_TEMPLATE, source, &ctx)?;
                        Ok(Value::from_safe_string(html))
                    }
                    None => match &self.decl.key {
                        Some(key) => Ok(row::attr_or_item(&row, key)),
                        None => Ok(Value::from("")),
                    },
                }
            }
            _ => Err(unknown_method("header", method)),
        }
    }
}

/// One row action as seen by the output template.
#[derive(Debug)]
struct ActionLink {
    decl: RowAction,
    composer: Composer,
    request: Option<RequestInfo>,
}

impl Object for ActionLink {
    fn get_value(self: &Arc<Self>, key: &Value) -> Option<Value> {
        match key.as_str()? {
            "view" => Some(Value::from(self.decl.view.clone())),
            "classname" => Some(Value::from(self.decl.classname.clone())),
            "text" => Some(Value::from(self.decl.text.clone())),
            "addnextparam" => Some(Value::from(self.decl.addnextparam)),
            _ => None,
        }
    }

    fn call_method(
        self: &Arc<Self>,
        _state: &State<'_, '_>,
        method: &str,
        args: &[Value],
    ) -> Result<Value, Error> {
        match method {
            "url" => {
                let (row,): (Value,) = from_args(args)?;
                let resolved: Vec<String> = self
                    .decl
                    .args
                    .iter()
                    .map(|name| row::attr_or_item(&row, name).to_string())
                    .collect();
                let mut url = self
                    .composer
                    .routes()
                    .reverse(&self.decl.view, &resolved)
                    .map_err(|err| ComposeError::from(err).into_jinja())?;
                if self.decl.addnextparam {
                    if let Some(request) = &self.request {
                        url.push(if url.contains('?') { '&' } else { '?' });
                        url.push_str("next=");
                        url.push_str(&urlencoding::encode(&request.full_path()));
                    }
                }
                Ok(Value::from(url))
            }
            _ => Err(unknown_method("action", method)),
        }
    }
}

/// One sub-table as seen by the output template.
#[derive(Debug)]
struct SubtablePane {
    decl: Subtable,
    scope: Arc<Scope>,
    composer: Composer,
}

impl Object for SubtablePane {
    fn call_method(
        self: &Arc<Self>,
        _state: &State<'_, '_>,
        method: &str,
        args: &[Value],
    ) -> Result<Value, Error> {
        match method {
            "render" => {
                let (row, index): (Value, Option<usize>) = from_args(args)?;
                match &self.decl.body {
                    SubtableBody::Fragment(source) => {
                        let ctx = row_context(&self.scope, row, index);
                        let html =
                            self.composer
                                .env()
                                .render_named_str(FRAGMENT_TEMPLATE, source, &ctx)?;
                        Ok(Value::from_safe_string(html))
                    }
                    SubtableBody::Nested(nested) => {
                        let mut child = Scope::child(&self.scope).with("tablerow", row);
                        if let Some(index) = index {
                            child = child.with("rowloop", row_loop_value(index));
                        }
                        let child = Arc::new(child);
                        let data = row::resolve_path(&child, &nested.source);
                        let html = self
                            .composer
                            .render(&data, &nested.block, &nested.options, &child)
                            .map_err(ComposeError::into_jinja)?;
                        Ok(Value::from_safe_string(html))
                    }
                }
            }
            _ => Err(unknown_method("subtable", method)),
        }
    }
}

fn row_context(scope: &Arc<Scope>, row: Value, index: Option<usize>) -> BTreeMap<String, Value> {
    let mut ctx = scope.flatten();
    ctx.insert("tablerow".into(), row);
    if let Some(index) = index {
        ctx.insert("rowloop".into(), row_loop_value(index));
    }
    ctx
}

fn row_loop_value(index: usize) -> Value {
    Value::from_serialize(&RowLoop {
        index,
        index0: index.saturating_sub(1),
    })
}

fn unknown_method(object: &str, method: &str) -> Error {
    Error::new(
        ErrorKind::UnknownMethod,
        format!("{} has no method named {}", object, method),
    )
}
