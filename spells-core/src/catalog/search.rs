//! Prefix search over catalog keys

use std::ops::Bound;

use super::{Catalog, Entry};

impl Catalog {
    /// Every entry whose name starts with `partial`
    ///
    /// Matching is exact and case-sensitive, with no trimming. An empty
    /// `partial` matches every entry. Keys sharing a prefix are contiguous in
    /// the ordered map, so this is a range scan rather than a full pass.
    pub fn lookup_prefix(&self, partial: &str) -> Vec<&Entry> {
        self.entries
            .range::<str, _>((Bound::Included(partial), Bound::Unbounded))
            .take_while(|(name, _)| name.starts_with(partial))
            .map(|(_, entry)| entry)
            .collect()
    }
}
