//! Record parser - turns one raw row into an [`Entry`]
//!
//! Field layout of a spell row:
//!
//! | # | Field | Derivation |
//! |---|-------|------------|
//! | 0 | level | integer 0-9 |
//! | 1 | name | trailing " (Ritual)" sets `ritual` |
//! | 2 | school | text after "level ", or before " Cantrip" |
//! | 3 | casting time | trimmed |
//! | 4 | range | trimmed |
//! | 5 | components | trimmed |
//! | 6 | duration | leading "Concentration, up to " sets `concentration` |
//! | 7 | description | leading "(...)" becomes `material` |
//! | 8 | (optional) | ignored |

use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

use super::Entry;
use crate::error::RowErrorKind;

const RITUAL_MARKER: &str = " (Ritual)";
const LEVEL_MARKER: &str = "level ";
const CANTRIP_MARKER: &str = " Cantrip";
const CONCENTRATION_PREFIX: &str = "Concentration, up to ";

const MIN_FIELDS: usize = 8;
const MAX_FIELDS: usize = 9;
const MAX_LEVEL: u8 = 9;

/// Shortest parenthesised group at the very start of the description
static MATERIAL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\(.*?\)").expect("material pattern is a valid regex"));

/// Parses rows from a single source, stamping each with that source's class
#[derive(Debug, Clone)]
pub struct RowParser {
    class: String,
}

impl RowParser {
    /// Create a parser for rows coming from the source identified by `tag`
    pub fn new(tag: &str) -> Self {
        Self {
            class: class_tag(tag),
        }
    }

    /// The class every parsed entry is tagged with
    pub fn class(&self) -> &str {
        &self.class
    }

    /// Parse one row into an entry
    pub fn parse<S: AsRef<str>>(&self, fields: &[S]) -> Result<Entry, RowErrorKind> {
        if !(MIN_FIELDS..=MAX_FIELDS).contains(&fields.len()) {
            return Err(RowErrorKind::FieldCount {
                found: fields.len(),
            });
        }
        let field = |i: usize| fields[i].as_ref();

        let level = parse_level(field(0))?;
        let (name, ritual) = parse_name(field(1));
        let (duration, concentration) = parse_duration(field(6));
        let (material, description) = parse_description(field(7));

        Ok(Entry {
            level,
            name,
            ritual,
            school: parse_school(field(2)),
            cast_time: field(3).trim().to_string(),
            range: field(4).trim().to_string(),
            components: field(5).trim().to_string(),
            duration,
            concentration,
            material,
            description,
            classes: vec![self.class.clone()],
        })
    }
}

/// Parse a single row tagged with `tag`
pub fn parse_row<S: AsRef<str>>(fields: &[S], tag: &str) -> Result<Entry, RowErrorKind> {
    RowParser::new(tag).parse(fields)
}

/// Source tag for a path: its file name without the extension
pub fn source_tag(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Capitalise the first letter of every word of a source tag
///
/// A word starts after any character that is neither alphanumeric nor `_`.
/// Other characters are left as they are.
pub fn class_tag(tag: &str) -> String {
    let mut class = String::with_capacity(tag.len());
    let mut at_word_start = true;

    for c in tag.chars() {
        if at_word_start {
            class.extend(c.to_uppercase());
        } else {
            class.push(c);
        }
        at_word_start = !(c.is_alphanumeric() || c == '_');
    }

    class
}

fn parse_level(raw: &str) -> Result<u8, RowErrorKind> {
    let trimmed = raw.trim();
    let level: i64 = trimmed
        .parse()
        .map_err(|_| RowErrorKind::MalformedLevel {
            value: trimmed.to_string(),
        })?;

    u8::try_from(level)
        .ok()
        .filter(|parsed| *parsed <= MAX_LEVEL)
        .ok_or(RowErrorKind::LevelOutOfRange { level })
}

fn parse_name(raw: &str) -> (String, bool) {
    let trimmed = raw.trim();
    match trimmed.strip_suffix(RITUAL_MARKER) {
        Some(name) => (name.trim().to_string(), true),
        None => (trimmed.to_string(), false),
    }
}

fn parse_school(raw: &str) -> String {
    let trimmed = raw.trim();
    if let Some((_, school)) = trimmed.split_once(LEVEL_MARKER) {
        school.trim().to_string()
    } else if let Some((school, _)) = trimmed.split_once(CANTRIP_MARKER) {
        school.trim().to_string()
    } else {
        trimmed.to_string()
    }
}

fn parse_duration(raw: &str) -> (String, bool) {
    let trimmed = raw.trim();
    match trimmed.strip_prefix(CONCENTRATION_PREFIX) {
        Some(duration) => (duration.trim().to_string(), true),
        None => (trimmed.to_string(), false),
    }
}

fn parse_description(raw: &str) -> (Option<String>, String) {
    let trimmed = raw.trim();
    match MATERIAL_PATTERN.find(trimmed) {
        Some(material) => (
            Some(material.as_str().to_string()),
            trimmed[material.end()..].trim().to_string(),
        ),
        None => (None, trimmed.to_string()),
    }
}
