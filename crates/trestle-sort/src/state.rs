//! Request-scoped sort state.
//!
//! [`SortState`] is the active ordering of a data set as carried by the
//! request: absent, a single column key, or an ordered tuple of keys. A
//! leading `-` marks a key as descending. The state is read once per request
//! and never mutated by table rendering; sort links only compute a candidate
//! next state for their outbound URLs.

use serde::{Deserialize, Serialize};

use crate::direction::Dir;

/// Prefix marking a sort key as descending.
pub const DESC_PREFIX: char = '-';

/// The active column ordering for a data set.
///
/// A single key normalizes to a one-element tuple. Multi-key strings coming
/// from a query parameter (e.g. `"name,-age"`) stay opaque: they are one key
/// as far as this type is concerned, matching how the ordering behavior
/// passes them through to the data layer verbatim.
///
/// Well-formed states never contain both a key and its descending-prefixed
/// counterpart; [`SortState::from_keys`] enforces this by keeping the first
/// of a conflicting pair.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SortState {
    /// No ordering requested.
    #[default]
    Unsorted,
    /// A single sort key, optionally descending-prefixed.
    Key(String),
    /// An ordered tuple of sort keys (multi-column sort).
    Keys(Vec<String>),
}

impl SortState {
    /// Creates a single-key state.
    pub fn single(key: impl Into<String>) -> Self {
        SortState::Key(key.into())
    }

    /// Creates a multi-key state, dropping keys that conflict with an
    /// earlier key on the same column (a key and its `-`-prefixed form are
    /// mutually exclusive; the first occurrence wins).
    pub fn from_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen: Vec<String> = Vec::new();
        let mut kept: Vec<String> = Vec::new();
        for key in keys {
            let key = key.into();
            let base = base_key(&key).to_string();
            if seen.contains(&base) {
                continue;
            }
            seen.push(base);
            kept.push(key);
        }
        if kept.is_empty() {
            SortState::Unsorted
        } else {
            SortState::Keys(kept)
        }
    }

    /// Returns `true` if no ordering is active.
    pub fn is_unsorted(&self) -> bool {
        matches!(self, SortState::Unsorted)
    }

    /// The state normalized to a tuple of keys.
    pub fn keys(&self) -> &[String] {
        match self {
            SortState::Unsorted => &[],
            SortState::Key(key) => std::slice::from_ref(key),
            SortState::Keys(keys) => keys,
        }
    }

    /// Returns `true` if the given raw key (including any `-` prefix) is
    /// present in the state.
    pub fn contains(&self, raw: &str) -> bool {
        self.keys().iter().any(|k| k == raw)
    }

    /// The active direction of `column_key`, if it participates in the
    /// state at all.
    pub fn direction_of(&self, column_key: &str) -> Option<Dir> {
        if self.contains(column_key) {
            Some(Dir::Asc)
        } else if self.contains(&descending(column_key)) {
            Some(Dir::Desc)
        } else {
            None
        }
    }

    /// The candidate key a sort link for `column_key` should emit next.
    ///
    /// An ascending column toggles to descending; a descending or unsorted
    /// column yields the plain (ascending) key — clicking an unsorted column
    /// sorts ascending first.
    pub fn next_key(&self, column_key: &str) -> String {
        match self.direction_of(column_key) {
            Some(Dir::Asc) => descending(column_key),
            _ => column_key.to_string(),
        }
    }
}

/// The descending-prefixed form of a key.
pub fn descending(key: &str) -> String {
    format!("{}{}", DESC_PREFIX, key)
}

/// Strips the descending prefix, if present.
pub fn base_key(raw: &str) -> &str {
    raw.strip_prefix(DESC_PREFIX).unwrap_or(raw)
}

/// Returns `true` if the raw key carries the descending prefix.
pub fn is_descending_key(raw: &str) -> bool {
    raw.starts_with(DESC_PREFIX)
}
