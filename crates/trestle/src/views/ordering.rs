//! Query-parameter ordering for page controllers.
//!
//! [`SortedView`] lets the ordering of a data query be specified by a query
//! parameter. A page controller implements it (usually just
//! [`default_ordering`](SortedView::default_ordering)), asks it for the
//! active ordering before materializing the data, and lets it contribute
//! `order_by_field` and `order_by` into the rendering scope so sort links
//! can read the state back.

use minijinja::Value;

use trestle_compose::{sort_state_value, Scope};
use trestle_sort::{QueryParams, SortState};

/// Default query parameter carrying the sort key.
pub const DEFAULT_ORDER_BY_FIELD: &str = "sort";

/// Reusable page-controller behavior: read the ordering from the query
/// string, fall back to a default, and expose the state to templates.
///
/// The query value is passed through verbatim as a single key; a
/// comma-delimited multi-key string is opaque here and interpreted by the
/// data layer.
///
/// # Examples
///
/// ```rust
/// use trestle::views::SortedView;
/// use trestle_sort::{QueryParams, SortState};
///
/// struct PeoplePage;
///
/// impl SortedView for PeoplePage {
///     fn default_ordering(&self) -> SortState {
///         SortState::single("last_name")
///     }
/// }
///
/// let page = PeoplePage;
/// let params = QueryParams::parse("sort=name");
/// assert_eq!(page.ordering(&params), SortState::single("name"));
///
/// let params = QueryParams::parse("page=2");
/// assert_eq!(page.ordering(&params), SortState::single("last_name"));
/// ```
pub trait SortedView {
    /// The query parameter name carrying the sort key.
    fn order_by_field(&self) -> &str {
        DEFAULT_ORDER_BY_FIELD
    }

    /// The ordering used when the request does not specify one.
    fn default_ordering(&self) -> SortState {
        SortState::Unsorted
    }

    /// The active ordering: the query value verbatim when present and
    /// non-empty, the default otherwise.
    fn ordering(&self, params: &QueryParams) -> SortState {
        match params.get(self.order_by_field()) {
            Some(raw) if !raw.is_empty() => SortState::single(raw),
            _ => self.default_ordering(),
        }
    }

    /// Binds `order_by_field` and `order_by` into the rendering scope for
    /// the sort-link function.
    fn contribute_context(&self, params: &QueryParams, scope: Scope) -> Scope {
        let ordering = self.ordering(params);
        scope
            .with("order_by_field", Value::from(self.order_by_field()))
            .with("order_by", sort_state_value(&ordering))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Plain;
    impl SortedView for Plain {}

    struct Defaulted;
    impl SortedView for Defaulted {
        fn order_by_field(&self) -> &str {
            "order"
        }
        fn default_ordering(&self) -> SortState {
            SortState::single("-created")
        }
    }

    #[test]
    fn query_value_passes_through_verbatim() {
        let params = QueryParams::parse("sort=name");
        assert_eq!(Plain.ordering(&params), SortState::single("name"));

        // Multi-key strings stay opaque.
        let params = QueryParams::parse("sort=name%2C-age");
        assert_eq!(Plain.ordering(&params), SortState::single("name,-age"));
    }

    #[test]
    fn absent_or_empty_parameter_falls_back() {
        assert_eq!(
            Plain.ordering(&QueryParams::parse("page=2")),
            SortState::Unsorted
        );
        assert_eq!(
            Defaulted.ordering(&QueryParams::parse("order=")),
            SortState::single("-created")
        );
    }

    #[test]
    fn custom_field_name_is_honored() {
        let params = QueryParams::parse("order=name&sort=ignored");
        assert_eq!(Defaulted.ordering(&params), SortState::single("name"));
    }

    #[test]
    fn context_contribution_exposes_field_and_state() {
        let params = QueryParams::parse("sort=-age");
        let scope = Plain.contribute_context(&params, Scope::new());

        assert_eq!(scope.get("order_by_field"), Some(Value::from("sort")));
        assert_eq!(scope.get("order_by"), Some(Value::from("-age")));
    }

    #[test]
    fn context_contribution_with_fallback() {
        let params = QueryParams::new();
        let scope = Defaulted.contribute_context(&params, Scope::new());

        assert_eq!(scope.get("order_by_field"), Some(Value::from("order")));
        assert_eq!(scope.get("order_by"), Some(Value::from("-created")));
    }
}
