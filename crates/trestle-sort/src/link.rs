//! Sort-link resolution for sortable column headers.
//!
//! [`resolve`] is a pure function of the column key, the current
//! [`SortState`], and the request's [`QueryParams`]. It computes the
//! direction indicator for the header, the human label, and the outbound
//! URL whose sort parameter carries the candidate next state. It mutates
//! nothing; it is called once per sortable header per render.

use crate::direction::Dir;
use crate::params::QueryParams;
use crate::state::SortState;

/// The outcome of resolving one sortable column against the current state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortLink {
    /// The column's active direction, or `None` when it is unsorted.
    pub direction: Option<Dir>,
    /// The display label for the header link.
    pub label: String,
    /// The outbound link: `?<field>=<next key>` plus the remaining query
    /// parameters.
    pub url: String,
    /// The candidate sort key the link applies when followed.
    pub next_key: String,
}

/// Resolves the sort link for `column_key`.
///
/// The URL is built from a copy of `params` with `sort_field_name` removed,
/// so the link replaces any existing sort parameter while preserving every
/// other parameter in order. `label` falls back to [`display_label`] of the
/// key.
///
/// # Examples
///
/// ```rust
/// use trestle_sort::{resolve, Dir, QueryParams, SortState};
///
/// let state = SortState::single("-age");
/// let params = QueryParams::parse("page=2");
/// let link = resolve("age", &state, &params, "sort", None);
///
/// assert_eq!(link.direction, Some(Dir::Desc));
/// assert_eq!(link.next_key, "age");
/// assert_eq!(link.url, "?sort=age&page=2");
/// ```
pub fn resolve(
    column_key: &str,
    state: &SortState,
    params: &QueryParams,
    sort_field_name: &str,
    label: Option<&str>,
) -> SortLink {
    let direction = state.direction_of(column_key);
    let next_key = state.next_key(column_key);
    let label = label
        .map(str::to_string)
        .unwrap_or_else(|| display_label(column_key));

    let mut rest = params.clone();
    rest.remove(sort_field_name);

    let mut url = format!(
        "?{}={}",
        urlencoding::encode(sort_field_name),
        urlencoding::encode(&next_key)
    );
    if !rest.is_empty() {
        url.push('&');
        url.push_str(&rest.urlencode());
    }

    SortLink {
        direction,
        label,
        url,
        next_key,
    }
}

/// Derives a display label from a column key: underscores become spaces and
/// each word is capitalized (`first_name` → `First Name`).
pub fn display_label(key: &str) -> String {
    key.replace('_', " ")
        .split(' ')
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsorted_column_sorts_ascending_first() {
        let link = resolve("age", &SortState::Unsorted, &QueryParams::new(), "sort", None);
        assert_eq!(link.direction, None);
        assert_eq!(link.next_key, "age");
        assert_eq!(link.url, "?sort=age");
    }

    #[test]
    fn ascending_column_toggles_to_descending() {
        let state = SortState::single("age");
        let link = resolve("age", &state, &QueryParams::new(), "sort", None);
        assert_eq!(link.direction, Some(Dir::Asc));
        assert_eq!(link.next_key, "-age");
        assert_eq!(link.url, "?sort=-age");
    }

    #[test]
    fn descending_column_toggles_back_to_ascending() {
        let state = SortState::single("-age");
        let link = resolve("age", &state, &QueryParams::new(), "sort", None);
        assert_eq!(link.direction, Some(Dir::Desc));
        assert_eq!(link.next_key, "age");
    }

    #[test]
    fn url_replaces_sort_param_and_keeps_the_rest() {
        let params = QueryParams::parse("sort=name&page=2&q=doe");
        let link = resolve("age", &SortState::single("name"), &params, "sort", None);
        assert_eq!(link.url, "?sort=age&page=2&q=doe");
    }

    #[test]
    fn url_escapes_candidate_key() {
        let link = resolve(
            "full name",
            &SortState::Unsorted,
            &QueryParams::new(),
            "sort",
            None,
        );
        assert_eq!(link.url, "?sort=full%20name");
    }

    #[test]
    fn label_defaults_to_title_cased_key() {
        let link = resolve(
            "first_name",
            &SortState::Unsorted,
            &QueryParams::new(),
            "sort",
            None,
        );
        assert_eq!(link.label, "First Name");
    }

    #[test]
    fn explicit_label_wins() {
        let link = resolve(
            "first_name",
            &SortState::Unsorted,
            &QueryParams::new(),
            "sort",
            Some("Given Name"),
        );
        assert_eq!(link.label, "Given Name");
    }

    #[test]
    fn display_label_examples() {
        assert_eq!(display_label("first_name"), "First Name");
        assert_eq!(display_label("age"), "Age");
        assert_eq!(display_label("lastNAME"), "Lastname");
    }
}
