//! Sort direction for table columns.

use serde::{Deserialize, Serialize};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dir {
    /// Ascending order (smallest first).
    #[default]
    Asc,
    /// Descending order (largest first).
    Desc,
}

impl Dir {
    /// Returns `true` if this is ascending order.
    pub fn is_asc(self) -> bool {
        matches!(self, Dir::Asc)
    }

    /// Returns `true` if this is descending order.
    pub fn is_desc(self) -> bool {
        matches!(self, Dir::Desc)
    }

    /// Returns the opposite direction.
    pub fn reversed(self) -> Dir {
        match self {
            Dir::Asc => Dir::Desc,
            Dir::Desc => Dir::Asc,
        }
    }

    /// Returns the display name of this direction.
    pub fn as_str(self) -> &'static str {
        match self {
            Dir::Asc => "asc",
            Dir::Desc => "desc",
        }
    }
}

impl std::fmt::Display for Dir {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dir_predicates() {
        assert!(Dir::Asc.is_asc());
        assert!(!Dir::Asc.is_desc());
        assert!(Dir::Desc.is_desc());
    }

    #[test]
    fn dir_reversed() {
        assert_eq!(Dir::Asc.reversed(), Dir::Desc);
        assert_eq!(Dir::Desc.reversed(), Dir::Asc);
    }

    #[test]
    fn dir_display() {
        assert_eq!(Dir::Asc.to_string(), "asc");
        assert_eq!(Dir::Desc.to_string(), "desc");
    }
}
