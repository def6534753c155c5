//! Sort direction and its attribute/marker encodings.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Direction of a table sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    /// Value stored in the table's direction attribute.
    pub fn as_attr(self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }

    /// Visual class put on the sorted header.
    pub fn marker_class(self) -> &'static str {
        match self {
            Self::Ascending => "sorted-asc",
            Self::Descending => "sorted-desc",
        }
    }

    /// The opposite direction.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    /// Orient an ascending comparison result.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }

    /// Resolve the direction of the next sort.
    ///
    /// A forced direction always wins. Otherwise the stored attribute toggles:
    /// `"asc"` becomes descending, anything else (including unset) ascending.
    pub fn resolve(stored: Option<&str>, forced: Option<SortDirection>) -> Self {
        match forced {
            Some(direction) => direction,
            None if stored == Some(Self::Ascending.as_attr()) => Self::Descending,
            None => Self::Ascending,
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_attr())
    }
}

impl FromStr for SortDirection {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Ascending),
            "desc" | "descending" => Ok(Self::Descending),
            _ => Err(CoreError::InvalidDirection(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_forced_wins() {
        assert_eq!(
            SortDirection::resolve(Some("asc"), Some(SortDirection::Ascending)),
            SortDirection::Ascending
        );
        assert_eq!(
            SortDirection::resolve(None, Some(SortDirection::Descending)),
            SortDirection::Descending
        );
    }

    #[test]
    fn test_resolve_toggles_stored_state() {
        assert_eq!(SortDirection::resolve(None, None), SortDirection::Ascending);
        assert_eq!(
            SortDirection::resolve(Some("asc"), None),
            SortDirection::Descending
        );
        assert_eq!(
            SortDirection::resolve(Some("desc"), None),
            SortDirection::Ascending
        );
        assert_eq!(
            SortDirection::resolve(Some("garbage"), None),
            SortDirection::Ascending
        );
    }

    #[test]
    fn test_from_str() {
        assert_eq!("asc".parse(), Ok(SortDirection::Ascending));
        assert_eq!("Descending".parse(), Ok(SortDirection::Descending));
        assert_eq!(
            "up".parse::<SortDirection>(),
            Err(CoreError::InvalidDirection("up".to_string()))
        );
    }

    #[test]
    fn test_apply_reverses_for_descending() {
        assert_eq!(SortDirection::Ascending.apply(Ordering::Less), Ordering::Less);
        assert_eq!(
            SortDirection::Descending.apply(Ordering::Less),
            Ordering::Greater
        );
        assert_eq!(
            SortDirection::Descending.apply(Ordering::Equal),
            Ordering::Equal
        );
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&SortDirection::Descending).unwrap();
        assert_eq!(json, r#""descending""#);
    }
}
