//! Spells core library exports
//!
//! The catalog store and query engine behind the `spells` shell: record
//! reading and parsing, name-keyed merging, filtering, prefix search and
//! display ordering.

pub mod catalog;
pub mod config;
pub mod error;

pub use catalog::{Catalog, Entry, Filter, FilterList, IngestReport, SortOrder};
pub use error::{CatalogError, RowError, RowErrorKind};
