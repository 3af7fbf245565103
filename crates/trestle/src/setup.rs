//! Environment setup for table rendering.
//!
//! [`Tables`] wires everything together: a MiniJinja environment with the
//! table filters and functions registered, the framework templates loaded,
//! user template overrides applied on top, and a route resolver for row
//! actions. Build one per application (or per test) and render tables
//! through it.

use std::fmt;
use std::sync::Arc;

use minijinja::{Environment, Value};

use trestle_compose::{
    register_filters, Block, ComposeError, Composer, RouteResolver, RouteTable, Scope,
    TableOptions, TablePlan,
};

use crate::assets::FRAMEWORK_TEMPLATES;

/// Error type for setup operations.
#[derive(Debug)]
pub enum SetupError {
    /// A template failed to register or compile.
    Template(String),
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetupError::Template(msg) => write!(f, "template error: {}", msg),
        }
    }
}

impl std::error::Error for SetupError {}

impl From<minijinja::Error> for SetupError {
    fn from(err: minijinja::Error) -> Self {
        SetupError::Template(err.to_string())
    }
}

/// The configured table rendering entry point.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use minijinja::Value;
/// use trestle::{Block, Header, Scope, TableOptions, Tables};
///
/// let tables = Tables::builder().build().unwrap();
/// let block = Block::new()
///     .header(Header::new().key("first_name"))
///     .header(Header::new().key("last_name"));
/// let data = Value::from_serialize(&serde_json::json!([
///     {"first_name": "John", "last_name": "Doe"},
/// ]));
///
/// let html = tables
///     .render(&data, &block, &TableOptions::new(), &Arc::new(Scope::new()))
///     .unwrap();
/// assert!(html.contains("<th scope=\"col\">First Name</th>"));
/// ```
#[derive(Debug, Clone)]
pub struct Tables {
    composer: Composer,
}

impl Tables {
    /// Starts building a table setup.
    pub fn builder() -> TablesBuilder {
        TablesBuilder::default()
    }

    /// The composer backing this setup.
    pub fn composer(&self) -> &Composer {
        &self.composer
    }

    /// The template environment backing this setup.
    pub fn env(&self) -> &Environment<'static> {
        self.composer.env()
    }

    /// Composes a render plan without emitting markup.
    pub fn compose(
        &self,
        data: &Value,
        block: &Block,
        options: &TableOptions,
        scope: &Arc<Scope>,
    ) -> Result<TablePlan, ComposeError> {
        self.composer.compose(data, block, options, scope)
    }

    /// Composes and renders a table to markup.
    pub fn render(
        &self,
        data: &Value,
        block: &Block,
        options: &TableOptions,
        scope: &Arc<Scope>,
    ) -> Result<String, ComposeError> {
        self.composer.render(data, block, options, scope)
    }
}

/// Builder for [`Tables`].
#[derive(Default)]
pub struct TablesBuilder {
    routes: Option<Arc<dyn RouteResolver>>,
    templates: Vec<(String, String)>,
}

impl TablesBuilder {
    /// Sets the route resolver used by row actions.
    pub fn routes(mut self, routes: impl RouteResolver + 'static) -> Self {
        self.routes = Some(Arc::new(routes));
        self
    }

    /// Registers a user template, overriding any framework template of the
    /// same name.
    pub fn template(mut self, name: impl Into<String>, source: impl Into<String>) -> Self {
        self.templates.push((name.into(), source.into()));
        self
    }

    /// Builds the configured [`Tables`].
    pub fn build(self) -> Result<Tables, SetupError> {
        let mut env = Environment::new();
        register_filters(&mut env);

        for (name, source) in FRAMEWORK_TEMPLATES {
            env.add_template_owned(name.to_string(), source.to_string())?;
        }
        for (name, source) in self.templates {
            env.add_template_owned(name, source)?;
        }

        let env = Arc::new(env);
        let composer = match self.routes {
            Some(routes) => Composer::with_shared_routes(env, routes),
            None => Composer::with_shared_routes(env, Arc::new(RouteTable::new())),
        };
        Ok(Tables { composer })
    }
}
