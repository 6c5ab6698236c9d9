//! Catalog store - the name-keyed set of entries and its merge policy

use std::borrow::Cow;
use std::collections::btree_map::{self, BTreeMap};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::{apply, records, source_tag, Entry, Filter, RowParser};
use crate::error::{CatalogError, RowError};

/// Outcome of ingesting one source
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestReport {
    /// Tag the source's class was derived from
    pub tag: String,

    /// Rows whose name was new to the catalog
    pub inserted: usize,

    /// Rows whose name already existed; only their class was kept
    pub merged: usize,

    /// Rows that failed to parse, in source order
    pub rejected: Vec<RowError>,
}

impl IngestReport {
    /// Number of rows that made it into the catalog
    pub fn accepted(&self) -> usize {
        self.inserted + self.merged
    }
}

/// In-memory spell catalog
///
/// Entries are only ever added or extended by ingestion; nothing is removed.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub(super) entries: BTreeMap<String, Entry>,
    defaults: Vec<PathBuf>,
}

impl Catalog {
    /// Create a new empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the sources read by [`Catalog::ingest_defaults`]
    pub fn set_defaults<I, P>(&mut self, sources: I)
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.defaults = sources.into_iter().map(Into::into).collect();
    }

    /// The configured default sources
    pub fn defaults(&self) -> &[PathBuf] {
        &self.defaults
    }

    /// Ingest every default source in order
    ///
    /// Stops at the first source that cannot be read. Sources ingested before
    /// it stay in the catalog.
    pub fn ingest_defaults(&mut self) -> Result<Vec<IngestReport>, CatalogError> {
        let defaults = self.defaults.clone();
        let mut reports = Vec::with_capacity(defaults.len());
        for source in &defaults {
            reports.push(self.ingest(source)?);
        }
        Ok(reports)
    }

    /// Read a source file and merge its rows into the catalog
    ///
    /// The file is read completely before any row is committed, so an
    /// unreadable source leaves the catalog untouched.
    pub fn ingest(&mut self, path: impl AsRef<Path>) -> Result<IngestReport, CatalogError> {
        let path = path.as_ref();
        debug!("Reading spell source {:?}", path);

        let bytes = fs::read(path).map_err(|source| CatalogError::SourceUnavailable {
            path: path.to_path_buf(),
            source,
        })?;

        // Invalid UTF-8 is replaced, not rejected; the affected rows still load
        let text = String::from_utf8_lossy(&bytes);
        if matches!(text, Cow::Owned(_)) {
            warn!("Spell source {:?} is not valid UTF-8; invalid bytes replaced", path);
        }

        Ok(self.ingest_str(&source_tag(path), &text))
    }

    /// Merge rows from in-memory source text tagged with `tag`
    pub fn ingest_str(&mut self, tag: &str, text: &str) -> IngestReport {
        let parser = RowParser::new(tag);
        let mut report = IngestReport {
            tag: tag.to_string(),
            ..IngestReport::default()
        };

        for record in records(text) {
            match parser.parse(&record.fields) {
                Ok(entry) => {
                    if self.merge(entry) {
                        report.inserted += 1;
                    } else {
                        report.merged += 1;
                    }
                }
                Err(kind) => {
                    let err = RowError::new(record.line, kind);
                    warn!(source = tag, "Skipping malformed row: {}", err);
                    report.rejected.push(err);
                }
            }
        }

        info!(
            source = tag,
            inserted = report.inserted,
            merged = report.merged,
            rejected = report.rejected.len(),
            "Ingested spell source"
        );
        report
    }

    /// Insert a new entry, or append its class to the existing one.
    /// Returns true when the name was new.
    fn merge(&mut self, entry: Entry) -> bool {
        match self.entries.entry(entry.name.clone()) {
            btree_map::Entry::Vacant(slot) => {
                slot.insert(entry);
                true
            }
            btree_map::Entry::Occupied(mut slot) => {
                // First writer wins: only the class tag survives
                slot.get_mut().classes.extend(entry.classes);
                false
            }
        }
    }

    /// Exact lookup by name
    pub fn get(&self, name: &str) -> Option<&Entry> {
        self.entries.get(name)
    }

    /// Snapshot of every entry
    pub fn all(&self) -> Vec<&Entry> {
        self.entries.values().collect()
    }

    /// Entries matching every filter
    pub fn apply(&self, filters: &[Filter]) -> Vec<&Entry> {
        apply(self.entries.values(), filters)
    }

    /// Number of distinct spells
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RowErrorKind;
    use pretty_assertions::assert_eq;

    const BARD: &str = "\
1; Bless; 1st-level Enchantment; 1 action; 30 feet; V, S, M; Concentration, up to 1 minute; (a sprinkling of holy water) You bless up to three creatures.
0; Vicious Mockery; Enchantment Cantrip; 1 action; 60 feet; V; Instantaneous; You unleash a string of insults.
";

    const CLERIC: &str = "\
1; Bless; 1st-level Divination; 1 bonus action; Touch; V; 1 hour; Different text entirely.
3; Revivify; 3rd-level Necromancy; 1 action; Touch; V, S, M; Instantaneous; (diamonds worth 300 gp) You touch a creature.
";

    #[test]
    fn test_ingest_inserts_new_names() {
        let mut catalog = Catalog::new();
        let report = catalog.ingest_str("bard", BARD);

        assert_eq!(report.inserted, 2);
        assert_eq!(report.merged, 0);
        assert!(report.rejected.is_empty());
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("Bless").unwrap().classes, vec!["Bard"]);
    }

    #[test]
    fn test_first_writer_wins() {
        let mut catalog = Catalog::new();
        catalog.ingest_str("bard", BARD);
        let before = catalog.get("Bless").unwrap().clone();

        let report = catalog.ingest_str("cleric", CLERIC);
        assert_eq!(report.inserted, 1);
        assert_eq!(report.merged, 1);

        let bless = catalog.get("Bless").unwrap();
        assert_eq!(bless.classes, vec!["Bard", "Cleric"]);
        assert_eq!(
            Entry {
                classes: before.classes.clone(),
                ..bless.clone()
            },
            before
        );
        assert_eq!(bless.school, "Enchantment");
        assert!(bless.concentration);
    }

    #[test]
    fn test_repeat_ingestion_duplicates_class() {
        let mut catalog = Catalog::new();
        catalog.ingest_str("bard", BARD);
        catalog.ingest_str("bard", BARD);

        assert_eq!(catalog.len(), 2);
        assert_eq!(
            catalog.get("Vicious Mockery").unwrap().classes,
            vec!["Bard", "Bard"]
        );
    }

    #[test]
    fn test_malformed_rows_are_skipped() {
        let text = "\
x; Broken; 1st-level Evocation; 1 action; Self; V; Instantaneous; Bad level.
1; Short; 1st-level Evocation; 1 action
2; Fine; 2nd-level Evocation; 1 action; Self; V; Instantaneous; Good row.
";
        let mut catalog = Catalog::new();
        let report = catalog.ingest_str("wizard", text);

        assert_eq!(report.accepted(), 1);
        assert_eq!(
            report.rejected,
            vec![
                RowError::new(
                    1,
                    RowErrorKind::MalformedLevel {
                        value: "x".to_string()
                    }
                ),
                RowError::new(2, RowErrorKind::FieldCount { found: 4 }),
            ]
        );
        assert!(catalog.get("Fine").is_some());
        assert!(catalog.get("Broken").is_none());
    }

    #[test]
    fn test_missing_source_commits_nothing() {
        let mut catalog = Catalog::new();
        let err = catalog
            .ingest("/definitely/not/here/wizard.csv")
            .unwrap_err();

        assert!(matches!(err, CatalogError::SourceUnavailable { .. }));
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_get_is_exact_and_case_sensitive() {
        let mut catalog = Catalog::new();
        catalog.ingest_str("bard", BARD);

        assert!(catalog.get("bless").is_none());
        assert!(catalog.get("Bles").is_none());
        assert!(catalog.get("Bless").is_some());
    }
}
