//! Request information exposed to table rendering.
//!
//! The composer is request-scoped but never touches the HTTP layer; pages
//! bind a [`RequestInfo`] into the root scope under `request`, and sort
//! links and `addnextparam` actions read it back from there. As a template
//! object it exposes `path` and the `full_path` method.

use std::sync::Arc;

use minijinja::value::Object;
use minijinja::{Error, State, Value};

use trestle_sort::QueryParams;

/// The current request's path and query parameters.
///
/// # Examples
///
/// ```rust
/// use trestle_compose::RequestInfo;
/// use trestle_sort::QueryParams;
///
/// let request = RequestInfo::new("/people", QueryParams::parse("sort=name&page=2"));
/// assert_eq!(request.full_path(), "/people?sort=name&page=2");
/// ```
#[derive(Debug, Clone)]
pub struct RequestInfo {
    path: String,
    query: QueryParams,
}

impl RequestInfo {
    /// Creates request info from a path and its query parameters.
    pub fn new(path: impl Into<String>, query: QueryParams) -> Self {
        Self {
            path: path.into(),
            query,
        }
    }

    /// The request path without the query string.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The query parameters.
    pub fn query(&self) -> &QueryParams {
        &self.query
    }

    /// Path plus re-encoded query string; the value of the `next`
    /// return-to-this-page parameter.
    pub fn full_path(&self) -> String {
        if self.query.is_empty() {
            self.path.clone()
        } else {
            format!("{}?{}", self.path, self.query.urlencode())
        }
    }

    /// Wraps this request info as a scope value under which templates see
    /// `request.path` and `request.full_path()`.
    pub fn into_value(self) -> Value {
        Value::from_object(self)
    }

    /// Recovers request info from a scope value produced by
    /// [`into_value`](Self::into_value).
    pub fn from_value(value: &Value) -> Option<Self> {
        value.downcast_object_ref::<RequestInfo>().cloned()
    }
}

impl Object for RequestInfo {
    fn get_value(self: &Arc<Self>, key: &Value) -> Option<Value> {
        match key.as_str()? {
            "path" => Some(Value::from(self.path.clone())),
            "query" => Some(Value::from(self.query.urlencode())),
            _ => None,
        }
    }

    fn call_method(
        self: &Arc<Self>,
        _state: &State<'_, '_>,
        method: &str,
        _args: &[Value],
    ) -> Result<Value, Error> {
        match method {
            "full_path" => Ok(Value::from(self.full_path())),
            _ => Err(Error::new(
                minijinja::ErrorKind::UnknownMethod,
                format!("request has no method named {}", method),
            )),
        }
    }
}
