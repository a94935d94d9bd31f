use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// The direction to sort a list in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortDirection {
    /// Smallest first.
    #[default]
    #[serde(rename = "ASC")]
    Asc,
    /// Largest first.
    #[serde(rename = "DESC")]
    Desc,
}

impl SortDirection {
    /// The wire form, `"ASC"` or `"DESC"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string isn't `ASC` or `DESC`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort direction: {0}")]
pub struct UnknownSortDirection(pub String);

impl FromStr for SortDirection {
    type Err = UnknownSortDirection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ASC" => Ok(SortDirection::Asc),
            "DESC" => Ok(SortDirection::Desc),
            _ => Err(UnknownSortDirection(s.to_string())),
        }
    }
}

/// Which field to sort by and in what direction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortOptions {
    /// The metadata field, e.g. `dc.title`.
    pub field: String,
    /// The direction.
    pub direction: SortDirection,
}

impl SortOptions {
    /// Create new [`SortOptions`].
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }
}
