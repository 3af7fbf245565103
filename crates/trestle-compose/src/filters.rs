//! MiniJinja filters and functions for table templates.
//!
//! Registered by [`register_filters`] on the environment tables render
//! through:
//!
//! - `get_item(obj, key)`: mapping lookup with an empty-string default
//! - `get_attr_or_item(obj, key)`: attribute access first, then item
//!   lookup, empty string when both miss
//! - `sortlink(key=, text=?, templatename=?)`: renders the sort link for
//!   one column, reading `order_by`, `order_by_field`, and `request` from
//!   the template state; a missing `key` makes it a no-op
//!
//! Unknown `sortlink` keyword arguments are rejected when the call is
//! evaluated, mirroring the eager option validation of the declaration
//! constructors.

use std::collections::BTreeMap;

use minijinja::value::Kwargs;
use minijinja::{Environment, Error, State, Value};

use trestle_sort::SortState;

use crate::plan::DEFAULT_SORTLINK_TEMPLATE;
use crate::request::RequestInfo;
use crate::row;

/// Registers the table filters and functions on an environment.
///
/// # Examples
///
/// ```rust
/// use minijinja::Environment;
/// use trestle_compose::register_filters;
///
/// let mut env = Environment::new();
/// register_filters(&mut env);
///
/// let out = env
///     .render_str(
///         "{{ row | get_attr_or_item('name') }}",
///         minijinja::context! { row => minijinja::Value::from_serialize(
///             &serde_json::json!({"name": "Ada"})
///         ) },
///     )
///     .unwrap();
/// assert_eq!(out, "Ada");
/// ```
pub fn register_filters(env: &mut Environment<'static>) {
    // Mapping lookup with '' default: {{ row | get_item('name') }}
    env.add_filter("get_item", |obj: Value, key: Value| -> Value {
        row::item_or_default(&obj, &key)
    });

    // Attribute-or-item lookup: {{ row | get_attr_or_item(header.key) }}
    env.add_filter("get_attr_or_item", |obj: Value, key: Value| -> Value {
        if key.is_undefined() || key.is_none() {
            return Value::from("");
        }
        match key.as_str() {
            Some(name) => row::attr_or_item(&obj, name),
            None => row::attr_or_item(&obj, &key.to_string()),
        }
    });

    env.add_function("sortlink", sortlink);
}

fn sortlink(state: &State, kwargs: Kwargs) -> Result<Value, Error> {
    let key: Option<Value> = kwargs.get("key")?;
    let text: Option<String> = kwargs.get("text")?;
    let template_name: Option<String> = kwargs.get("templatename")?;
    kwargs.assert_all_used()?;

    let key = match key {
        Some(value) if !value.is_undefined() && !value.is_none() => value.to_string(),
        _ => return Ok(Value::from("")),
    };
    if key.is_empty() {
        return Ok(Value::from(""));
    }

    let order_by = state
        .lookup("order_by")
        .map(|value| sort_state_from_value(&value))
        .unwrap_or_default();
    let field = state
        .lookup("order_by_field")
        .filter(|value| !value.is_undefined() && !value.is_none())
        .map(|value| value.to_string())
        .unwrap_or_else(|| "sort".to_string());
    let params = state
        .lookup("request")
        .and_then(|value| RequestInfo::from_value(&value))
        .map(|request| request.query().clone())
        .unwrap_or_default();

    let link = trestle_sort::resolve(&key, &order_by, &params, &field, text.as_deref());

    let name = template_name.unwrap_or_else(|| DEFAULT_SORTLINK_TEMPLATE.to_string());
    let template = state.env().get_template(&name)?;

    let mut ctx = BTreeMap::new();
    ctx.insert(
        "ordering",
        Value::from(link.direction.map(|dir| dir.as_str())),
    );
    ctx.insert("text", Value::from(link.label));
    ctx.insert("url", Value::from(link.url));
    let html = template.render(&ctx)?;
    Ok(Value::from_safe_string(html))
}

/// Converts a scope-bound `order_by` value back into a [`SortState`]:
/// strings are single keys, sequences are key tuples, none/undefined is
/// unsorted.
pub(crate) fn sort_state_from_value(value: &Value) -> SortState {
    if value.is_undefined() || value.is_none() {
        return SortState::Unsorted;
    }
    if let Some(text) = value.as_str() {
        return if text.is_empty() {
            SortState::Unsorted
        } else {
            SortState::single(text)
        };
    }
    if let Ok(iter) = value.try_iter() {
        return SortState::from_keys(iter.map(|item| item.to_string()));
    }
    SortState::single(value.to_string())
}

/// Converts a [`SortState`] into the value pages bind under `order_by`.
pub fn sort_state_value(state: &SortState) -> Value {
    match state {
        SortState::Unsorted => Value::from(()),
        SortState::Key(key) => Value::from(key.clone()),
        SortState::Keys(keys) => Value::from(keys.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trestle_sort::QueryParams;

    const LINK_TEMPLATE: &str =
        "<a class=\"{{ ordering or 'unsorted' }}\" href=\"{{ url }}\">{{ text }}</a>";

    fn env() -> Environment<'static> {
        let mut env = Environment::new();
        register_filters(&mut env);
        env.add_template_owned(
            DEFAULT_SORTLINK_TEMPLATE.to_string(),
            LINK_TEMPLATE.to_string(),
        )
        .unwrap();
        env
    }

    fn row() -> Value {
        Value::from_serialize(&serde_json::json!({"name": "Ada", "age": 36}))
    }

    #[test]
    fn get_item_filter() {
        let out = env()
            .render_str("{{ row | get_item('name') }}|{{ row | get_item('nope') }}", minijinja::context! { row => row() })
            .unwrap();
        assert_eq!(out, "Ada|");
    }

    #[test]
    fn get_attr_or_item_filter() {
        let out = env()
            .render_str(
                "{{ row | get_attr_or_item('age') }}|{{ foods | get_attr_or_item('0') }}",
                minijinja::context! {
                    row => row(),
                    foods => Value::from_serialize(&serde_json::json!(["Pizza"])),
                },
            )
            .unwrap();
        assert_eq!(out, "36|Pizza");
    }

    #[test]
    fn get_attr_or_item_with_undefined_key() {
        let out = env()
            .render_str(
                "[{{ row | get_attr_or_item(nothing) }}]",
                minijinja::context! { row => row() },
            )
            .unwrap();
        assert_eq!(out, "[]");
    }

    #[test]
    fn sortlink_without_key_is_noop() {
        let out = env()
            .render_str("[{{ sortlink() }}]", minijinja::context! {})
            .unwrap();
        assert_eq!(out, "[]");
    }

    #[test]
    fn sortlink_renders_direction_and_url() {
        let request = RequestInfo::new("/people", QueryParams::parse("sort=-age&page=2"));
        let out = env()
            .render_str(
                "{{ sortlink(key='age') }}",
                minijinja::context! {
                    order_by => "-age",
                    order_by_field => "sort",
                    request => request.into_value(),
                },
            )
            .unwrap();
        assert_eq!(out, "<a class=\"desc\" href=\"?sort=age&amp;page=2\">Age</a>");
    }

    #[test]
    fn sortlink_defaults_field_name() {
        let out = env()
            .render_str("{{ sortlink(key='name') }}", minijinja::context! {})
            .unwrap();
        assert!(out.contains("?sort=name"));
        assert!(out.contains("unsorted"));
    }

    #[test]
    fn sortlink_rejects_unknown_kwargs() {
        let result = env().render_str(
            "{{ sortlink(key='age', colour='red') }}",
            minijinja::context! {},
        );
        assert!(result.is_err());
    }

    #[test]
    fn sortlink_custom_template() {
        let mut env = env();
        env.add_template_owned(
            "plain.html".to_string(),
            "{{ text }}:{{ url }}".to_string(),
        )
        .unwrap();
        let out = env
            .render_str(
                "{{ sortlink(key='age', templatename='plain.html') }}",
                minijinja::context! {},
            )
            .unwrap();
        assert_eq!(out, "Age:?sort=age");
    }

    #[test]
    fn sort_state_value_round_trip() {
        let single = SortState::single("-age");
        assert_eq!(
            sort_state_from_value(&sort_state_value(&single)),
            single
        );

        let multi = SortState::from_keys(["name", "-age"]);
        assert_eq!(sort_state_from_value(&sort_state_value(&multi)), multi);

        assert_eq!(
            sort_state_from_value(&sort_state_value(&SortState::Unsorted)),
            SortState::Unsorted
        );
    }
}
