//! Spells Catalog - name-keyed spell store and query engine
//!
//! # Overview
//!
//! The catalog system allows the shell to:
//! - Ingest `;`-separated spell lists, one class per source
//! - Merge repeated spell names across sources (first writer wins)
//! - Filter the catalog with an ordered list of filter tokens
//! - Search spell names by prefix
//! - Order results by name or by level
//!
//! # Architecture
//!
//! ```text
//! csv/wizard.csv ──► reader ──► parser ──► Catalog (BTreeMap<name, Entry>)
//!                    (rows)     (Entry)        │
//!                                              ├── apply(FilterList) ─┐
//!                                              └── lookup_prefix(..) ─┴─► SortOrder ──► shell
//! ```

mod entry;
mod filter;
mod parser;
mod reader;
mod search;
mod sort;
mod store;

pub use entry::Entry;
pub use filter::{apply, Filter, FilterList};
pub use parser::{class_tag, parse_row, source_tag, RowParser};
pub use reader::{records, Record, Records, SEPARATOR};
pub use sort::SortOrder;
pub use store::{Catalog, IngestReport};
