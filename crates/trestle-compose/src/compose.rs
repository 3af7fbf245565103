//! The table composer: one declarative block + one data sequence in, one
//! render plan (or rendered markup) out.
//!
//! Composition is a single evaluation pass over the filtered block, run
//! once per table, not once per row. Declarations register themselves into
//! an explicit [`Declarations`] accumulator as they are reached; loop
//! constructs iterate structure (repeated headers, configured columns),
//! never the data rows. Row iteration is the output template's job, so the
//! composer's contract ends at producing a complete, internally consistent
//! [`TablePlan`].
//!
//! Sub-tables re-enter [`Composer::render`] while a row is being rendered;
//! every invocation gets its own identifier and scope, so nesting is
//! unbounded and each level self-contained.

use std::fmt;
use std::sync::Arc;

use minijinja::{Environment, Value};

use crate::declaration::Captured;
use crate::emit;
use crate::error::ComposeError;
use crate::filter::relevant;
use crate::node::{Block, Node};
use crate::plan::{Declarations, TableId, TableOptions, TablePlan, DEFAULT_TABLE_TEMPLATE};
use crate::request::RequestInfo;
use crate::route::{RouteResolver, RouteTable};
use crate::row;
use crate::scope::Scope;

/// Composes and renders tables against a MiniJinja environment.
///
/// Cheap to clone: the environment and route resolver are shared. All state
/// for one table render lives in the plan and scopes created by that call;
/// nothing is retained across calls.
#[derive(Clone)]
pub struct Composer {
    env: Arc<Environment<'static>>,
    routes: Arc<dyn RouteResolver>,
}

impl Composer {
    /// Creates a composer with an empty route table.
    pub fn new(env: Arc<Environment<'static>>) -> Self {
        Self {
            env,
            routes: Arc::new(RouteTable::new()),
        }
    }

    /// Creates a composer with the given route resolver.
    pub fn with_routes(
        env: Arc<Environment<'static>>,
        routes: impl RouteResolver + 'static,
    ) -> Self {
        Self::with_shared_routes(env, Arc::new(routes))
    }

    /// Creates a composer sharing an already-wrapped route resolver.
    pub fn with_shared_routes(
        env: Arc<Environment<'static>>,
        routes: Arc<dyn RouteResolver>,
    ) -> Self {
        Self { env, routes }
    }

    /// The template environment used for output and deferred fragments.
    pub fn env(&self) -> &Environment<'static> {
        &self.env
    }

    pub(crate) fn routes(&self) -> &dyn RouteResolver {
        &*self.routes
    }

    /// Composes a render plan without emitting markup.
    ///
    /// Fails fast with [`ComposeError::MissingArgument`] when the data
    /// source is absent, before any scope is established.
    pub fn compose(
        &self,
        data: &Value,
        block: &Block,
        options: &TableOptions,
        scope: &Arc<Scope>,
    ) -> Result<TablePlan, ComposeError> {
        self.compose_inner(data, block, options, scope)
            .map(|(plan, _)| plan)
    }

    /// Composes and renders a table to markup.
    ///
    /// The output template is `options.template_name` or
    /// [`DEFAULT_TABLE_TEMPLATE`]; an unresolvable name surfaces unchanged
    /// as [`ComposeError::TemplateNotFound`].
    pub fn render(
        &self,
        data: &Value,
        block: &Block,
        options: &TableOptions,
        scope: &Arc<Scope>,
    ) -> Result<String, ComposeError> {
        let (plan, table_scope) = self.compose_inner(data, block, options, scope)?;
        self.emit(&plan, options, &table_scope)
    }

    fn compose_inner(
        &self,
        data: &Value,
        block: &Block,
        options: &TableOptions,
        scope: &Arc<Scope>,
    ) -> Result<(TablePlan, Arc<Scope>), ComposeError> {
        if data.is_undefined() || data.is_none() {
            return Err(ComposeError::MissingArgument("table data source"));
        }
        let rows: Vec<Value> = data
            .try_iter()
            .map_err(|_| ComposeError::Operation("table data source is not iterable".to_string()))?
            .collect();

        let id = TableId::new();
        let table_scope = Arc::new(
            Scope::child(scope)
                .with("tableid", Value::from(id.to_string()))
                .with("tabledata", data.clone()),
        );

        let filtered = relevant(block);
        let mut declarations = Declarations::default();
        self.evaluate(&filtered, &table_scope, &mut declarations)?;

        Ok((TablePlan::new(id, declarations, rows, options), table_scope))
    }

    /// Evaluates a filtered block, registering declarations into the
    /// accumulator. Conditions take the first branch whose test resolves
    /// truthy; loops push a child scope per element.
    fn evaluate(
        &self,
        block: &Block,
        scope: &Arc<Scope>,
        acc: &mut Declarations,
    ) -> Result<(), ComposeError> {
        for node in block.iter() {
            match node {
                Node::Header(header) => {
                    acc.headers.push(Captured::new(header.clone(), scope));
                }
                Node::RowAction(action) => {
                    acc.row_actions.push(Captured::new(action.clone(), scope));
                }
                Node::Subtable(subtable) => {
                    acc.subtables.push(Captured::new(subtable.clone(), scope));
                }
                Node::Condition(condition) => {
                    for (test, body) in condition.branches() {
                        let taken = match test {
                            Some(path) => row::resolve_path(scope, path).is_true(),
                            None => true,
                        };
                        if taken {
                            self.evaluate(body, scope, acc)?;
                            break;
                        }
                    }
                }
                Node::ForEach(repeat) => {
                    let source = row::resolve_path(scope, repeat.source());
                    if source.is_undefined() || source.is_none() {
                        continue;
                    }
                    let items: Vec<Value> = source.try_iter().map_err(|_| {
                        ComposeError::Operation(format!(
                            "'{}' is not iterable",
                            repeat.source()
                        ))
                    })?.collect();
                    let length = items.len();
                    for (index0, item) in items.into_iter().enumerate() {
                        let child = Arc::new(
                            Scope::child(scope)
                                .with(repeat.var(), item)
                                .with("loop", emit::loop_value(index0, length)),
                        );
                        self.evaluate(repeat.body(), &child, acc)?;
                    }
                }
                // The filter has already dropped raw nodes; an unfiltered
                // block evaluates the same way with them skipped.
                Node::Raw(_) => {}
            }
        }
        Ok(())
    }

    fn emit(
        &self,
        plan: &TablePlan,
        options: &TableOptions,
        scope: &Arc<Scope>,
    ) -> Result<String, ComposeError> {
        let name = options
            .template_name
            .as_deref()
            .unwrap_or(DEFAULT_TABLE_TEMPLATE);
        let template = self.env.get_template(name)?;

        let request = scope
            .get("request")
            .and_then(|value| RequestInfo::from_value(&value));

        let mut ctx = scope.flatten();
        ctx.insert("tableid".into(), Value::from(plan.id.to_string()));
        ctx.insert("tabledata".into(), Value::from(plan.rows.clone()));
        ctx.insert("tableheaders".into(), emit::header_values(plan, self));
        ctx.insert(
            "tablerowactions".into(),
            emit::action_values(plan, self, request),
        );
        ctx.insert("subtables".into(), emit::subtable_values(plan, self));
        ctx.insert("tablecolspan".into(), Value::from(plan.column_count()));
        ctx.insert(
            "collapseclass".into(),
            Value::from(plan.collapse_class.clone()),
        );
        ctx.insert(
            "subtabletoggletext".into(),
            Value::from(plan.toggle_text.clone()),
        );

        Ok(template.render(&ctx)?)
    }
}

impl fmt::Debug for Composer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Composer").finish_non_exhaustive()
    }
}
