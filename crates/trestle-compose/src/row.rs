//! Row value lookup: attribute-or-item access with soft misses.
//!
//! Rows are arbitrary [`Value`]s: serialized structs, maps, or sequences.
//! Cell extraction needs one lookup rule across all of them: attribute
//! access first, then item access by key, then item access by numeric index
//! for sequence rows. A miss is not an error; it resolves to an empty
//! string, so a row lacking a column simply renders an empty cell.

use minijinja::Value;

/// Looks up `key` on a row value: attribute first, then item by key, then
/// item by numeric index. Returns an empty string on a miss.
///
/// # Examples
///
/// ```rust
/// use minijinja::Value;
/// use trestle_compose::attr_or_item;
///
/// let row = Value::from_serialize(&serde_json::json!({"name": "Ada"}));
/// assert_eq!(attr_or_item(&row, "name"), Value::from("Ada"));
/// assert_eq!(attr_or_item(&row, "missing"), Value::from(""));
///
/// let row = Value::from_serialize(&serde_json::json!(["Pizza", "Salad"]));
/// assert_eq!(attr_or_item(&row, "0"), Value::from("Pizza"));
/// ```
pub fn attr_or_item(row: &Value, key: &str) -> Value {
    let found = lookup(row, key);
    if found.is_undefined() {
        Value::from("")
    } else {
        found
    }
}

/// Mapping lookup by key with an empty-string default.
pub fn item_or_default(row: &Value, key: &Value) -> Value {
    match row.get_item(key) {
        Ok(value) if !value.is_undefined() => value,
        _ => Value::from(""),
    }
}

/// Like [`attr_or_item`] but preserving `undefined` on a miss, for callers
/// that need to distinguish "absent" from "empty".
pub(crate) fn lookup(row: &Value, key: &str) -> Value {
    if let Ok(value) = row.get_attr(key) {
        if !value.is_undefined() {
            return value;
        }
    }
    if let Ok(value) = row.get_item(&Value::from(key)) {
        if !value.is_undefined() {
            return value;
        }
    }
    if let Ok(index) = key.parse::<usize>() {
        if let Ok(value) = row.get_item(&Value::from(index)) {
            if !value.is_undefined() {
                return value;
            }
        }
    }
    Value::UNDEFINED
}

/// Resolves a dotted path (`tablerow.favorite_foods`) against a scope
/// binding and then through nested values. Returns `undefined` when any
/// segment misses.
pub(crate) fn resolve_path(scope: &crate::Scope, path: &str) -> Value {
    let mut parts = path.split('.');
    let head = match parts.next() {
        Some(head) if !head.is_empty() => head,
        _ => return Value::UNDEFINED,
    };
    let mut current = scope.get(head).unwrap_or(Value::UNDEFINED);
    for part in parts {
        if current.is_undefined() {
            return Value::UNDEFINED;
        }
        current = lookup(&current, part);
    }
    current
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Scope;
    use std::sync::Arc;

    fn map_row() -> Value {
        Value::from_serialize(&serde_json::json!({
            "first_name": "John",
            "last_name": "Doe",
            "favorite_foods": ["Pizza", "French Fry"],
        }))
    }

    #[test]
    fn map_lookup_by_name() {
        assert_eq!(attr_or_item(&map_row(), "first_name"), Value::from("John"));
    }

    #[test]
    fn miss_resolves_to_empty_string() {
        assert_eq!(attr_or_item(&map_row(), "age"), Value::from(""));
    }

    #[test]
    fn sequence_lookup_by_numeric_key() {
        let row = Value::from_serialize(&serde_json::json!(["Egg", "Salmon"]));
        assert_eq!(attr_or_item(&row, "0"), Value::from("Egg"));
        assert_eq!(attr_or_item(&row, "1"), Value::from("Salmon"));
        assert_eq!(attr_or_item(&row, "2"), Value::from(""));
    }

    #[test]
    fn item_or_default_on_maps() {
        let row = map_row();
        assert_eq!(
            item_or_default(&row, &Value::from("last_name")),
            Value::from("Doe")
        );
        assert_eq!(item_or_default(&row, &Value::from("nope")), Value::from(""));
    }

    #[test]
    fn item_or_default_on_non_mapping() {
        assert_eq!(
            item_or_default(&Value::from(42), &Value::from("x")),
            Value::from("")
        );
    }

    #[test]
    fn resolve_path_walks_segments() {
        let scope = Arc::new(Scope::new().with("tablerow", map_row()));
        let foods = resolve_path(&scope, "tablerow.favorite_foods");
        assert_eq!(foods.len(), Some(2));

        let first = resolve_path(&scope, "tablerow.favorite_foods.0");
        assert_eq!(first, Value::from("Pizza"));
    }

    #[test]
    fn resolve_path_miss_is_undefined() {
        let scope = Arc::new(Scope::new());
        assert!(resolve_path(&scope, "missing.anything").is_undefined());
        assert!(resolve_path(&scope, "").is_undefined());
    }
}
