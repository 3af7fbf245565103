//! Route resolution for row-action links.
//!
//! The composer never builds URLs itself; it asks a [`RouteResolver`] to
//! reverse a route identifier plus ordered arguments into a path. Failures
//! (unknown identifier, wrong argument count) propagate to the render
//! caller unchanged — there is no retry and no fallback.
//!
//! [`RouteTable`] is the shipped implementation: a name-to-pattern map with
//! `{}` placeholders.

use std::collections::BTreeMap;

use crate::error::RouteError;

/// Reverses route identifiers into URLs.
pub trait RouteResolver: Send + Sync {
    /// Builds the URL for `name` with the given ordered arguments.
    fn reverse(&self, name: &str, args: &[String]) -> Result<String, RouteError>;
}

/// A static route resolver: route name to `{}`-placeholder pattern.
///
/// Arguments are URL-encoded and substituted in order; the argument count
/// must match the placeholder count exactly.
///
/// # Examples
///
/// ```rust
/// use trestle_compose::{RouteResolver, RouteTable};
///
/// let routes = RouteTable::new()
///     .route("person-edit", "/people/{}/edit")
///     .route("home", "/");
///
/// assert_eq!(
///     routes.reverse("person-edit", &["42".to_string()]).unwrap(),
///     "/people/42/edit"
/// );
/// assert!(routes.reverse("person-edit", &[]).is_err());
/// assert!(routes.reverse("nope", &[]).is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    patterns: BTreeMap<String, String>,
}

impl RouteTable {
    /// Creates an empty route table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a route pattern, replacing any previous one of the same
    /// name.
    pub fn route(mut self, name: impl Into<String>, pattern: impl Into<String>) -> Self {
        self.patterns.insert(name.into(), pattern.into());
        self
    }

    /// Returns `true` if a route is registered under the given name.
    pub fn contains(&self, name: &str) -> bool {
        self.patterns.contains_key(name)
    }
}

impl RouteResolver for RouteTable {
    fn reverse(&self, name: &str, args: &[String]) -> Result<String, RouteError> {
        let pattern = self
            .patterns
            .get(name)
            .ok_or_else(|| RouteError::UnknownRoute(name.to_string()))?;

        let expected = pattern.matches("{}").count();
        if expected != args.len() {
            return Err(RouteError::ArgumentCount {
                route: name.to_string(),
                expected,
                got: args.len(),
            });
        }

        let mut url = String::with_capacity(pattern.len());
        let mut parts = pattern.split("{}");
        if let Some(first) = parts.next() {
            url.push_str(first);
        }
        for (part, arg) in parts.zip(args) {
            url.push_str(&urlencoding::encode(arg));
            url.push_str(part);
        }
        Ok(url)
    }
}
