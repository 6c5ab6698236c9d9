//! Sort comparators used to present query results

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use super::Entry;

/// Display order for result lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Ascending by name
    ByName,
    /// Ascending by level, then by name
    #[default]
    ByLevel,
}

impl SortOrder {
    pub fn compare(self, a: &Entry, b: &Entry) -> Ordering {
        match self {
            SortOrder::ByName => a.name.cmp(&b.name),
            SortOrder::ByLevel => a.level.cmp(&b.level).then_with(|| a.name.cmp(&b.name)),
        }
    }

    /// Stable in-place sort
    pub fn sort(self, entries: &mut [&Entry]) {
        entries.sort_by(|a, b| self.compare(a, b));
    }

    /// Sort and return the list, for chaining off a query
    pub fn sorted(self, mut entries: Vec<&Entry>) -> Vec<&Entry> {
        self.sort(&mut entries);
        entries
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(SortOrder::ByName),
            "level" => Ok(SortOrder::ByLevel),
            other => Err(format!(
                "Unknown sort order: {other}. Expected 'name' or 'level'"
            )),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::ByName => write!(f, "name"),
            SortOrder::ByLevel => write!(f, "level"),
        }
    }
}
