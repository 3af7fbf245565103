//! Rendering scopes: named bindings with lexical nesting.
//!
//! A [`Scope`] is an immutable set of named [`Value`] bindings plus an
//! optional parent link. Declarations capture the scope that was active
//! when they registered (an `Arc`, not a copy), so a deferred body sees
//! loop counters and outer row variables exactly as they were at
//! declaration time. Flattening a scope produces the context map handed to
//! the output template.

use std::collections::BTreeMap;
use std::sync::Arc;

use minijinja::Value;

/// A nested set of named variables visible during one evaluation pass.
///
/// Scopes form a chain: lookups walk from the innermost scope outward, so
/// inner bindings shadow outer ones. Scopes are immutable once built;
/// entering a conditional branch or a loop iteration creates a child scope
/// instead of mutating the current one.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use minijinja::Value;
/// use trestle_compose::Scope;
///
/// let root = Arc::new(Scope::new().with("user", Value::from("ada")));
/// let child = Arc::new(Scope::child(&root).with("row", Value::from(1)));
///
/// assert_eq!(child.get("user"), Some(Value::from("ada")));
/// assert_eq!(child.get("row"), Some(Value::from(1)));
/// assert_eq!(root.get("row"), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Scope {
    vars: BTreeMap<String, Value>,
    parent: Option<Arc<Scope>>,
}

impl Scope {
    /// Creates an empty root scope.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty scope nested under `parent`.
    pub fn child(parent: &Arc<Scope>) -> Self {
        Self {
            vars: BTreeMap::new(),
            parent: Some(Arc::clone(parent)),
        }
    }

    /// Adds a binding, consuming and returning the scope.
    pub fn with(mut self, name: impl Into<String>, value: Value) -> Self {
        self.vars.insert(name.into(), value);
        self
    }

    /// Looks up a binding, walking the scope chain outward.
    pub fn get(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.vars.get(name) {
            return Some(value.clone());
        }
        self.parent.as_ref().and_then(|parent| parent.get(name))
    }

    /// Returns `true` if the name resolves anywhere in the chain.
    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
            || self
                .parent
                .as_ref()
                .is_some_and(|parent| parent.contains(name))
    }

    /// Flattens the chain into a single map, innermost bindings winning.
    pub fn flatten(&self) -> BTreeMap<String, Value> {
        let mut flat = match &self.parent {
            Some(parent) => parent.flatten(),
            None => BTreeMap::new(),
        };
        for (name, value) in &self.vars {
            flat.insert(name.clone(), value.clone());
        }
        flat
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_walks_the_chain() {
        let root = Arc::new(Scope::new().with("a", Value::from(1)));
        let mid = Arc::new(Scope::child(&root).with("b", Value::from(2)));
        let leaf = Scope::child(&mid).with("c", Value::from(3));

        assert_eq!(leaf.get("a"), Some(Value::from(1)));
        assert_eq!(leaf.get("b"), Some(Value::from(2)));
        assert_eq!(leaf.get("c"), Some(Value::from(3)));
        assert_eq!(leaf.get("d"), None);
    }

    #[test]
    fn inner_bindings_shadow_outer() {
        let root = Arc::new(Scope::new().with("x", Value::from("outer")));
        let leaf = Scope::child(&root).with("x", Value::from("inner"));

        assert_eq!(leaf.get("x"), Some(Value::from("inner")));
        assert_eq!(root.get("x"), Some(Value::from("outer")));
    }

    #[test]
    fn flatten_overlays_parent_first() {
        let root = Arc::new(
            Scope::new()
                .with("x", Value::from("outer"))
                .with("y", Value::from("kept")),
        );
        let leaf = Scope::child(&root).with("x", Value::from("inner"));

        let flat = leaf.flatten();
        assert_eq!(flat.get("x"), Some(&Value::from("inner")));
        assert_eq!(flat.get("y"), Some(&Value::from("kept")));
    }

    #[test]
    fn contains_checks_the_whole_chain() {
        let root = Arc::new(Scope::new().with("a", Value::from(1)));
        let leaf = Scope::child(&root);

        assert!(leaf.contains("a"));
        assert!(!leaf.contains("b"));
    }

    #[test]
    fn sibling_children_stay_independent() {
        let root = Arc::new(Scope::new());
        let left = Scope::child(&root).with("side", Value::from("left"));
        let right = Scope::child(&root).with("side", Value::from("right"));

        assert_eq!(left.get("side"), Some(Value::from("left")));
        assert_eq!(right.get("side"), Some(Value::from("right")));
        assert_eq!(root.get("side"), None);
    }
}
