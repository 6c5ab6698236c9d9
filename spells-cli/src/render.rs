//! Output rendering for query results

use std::io::{self, Write};

use spells_core::Entry;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

const NAME_STYLE: &str = "\x1b[1;31m";
const RESET: &str = "\x1b[0m";

/// How result lists are written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderOptions {
    /// Bold red spell names
    pub color: bool,
    /// JSON array instead of text
    pub json: bool,
}

/// Write entries in the detailed form, separated by blank lines
pub fn write_entries<W: Write>(
    out: &mut W,
    entries: &[&Entry],
    options: RenderOptions,
) -> io::Result<()> {
    if options.json {
        return write_json(out, entries);
    }

    for (i, entry) in entries.iter().enumerate() {
        if i > 0 {
            writeln!(out)?;
        }
        writeln!(out, "{}", render_entry(entry, options.color))?;
    }
    Ok(())
}

fn render_entry(entry: &Entry, color: bool) -> String {
    let text = entry.to_string();
    if !color {
        return text;
    }
    match text.strip_prefix(entry.name.as_str()) {
        Some(rest) => format!("{NAME_STYLE}{}{RESET}{rest}", entry.name),
        None => text,
    }
}

fn write_json<W: Write>(out: &mut W, entries: &[&Entry]) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, entries)?;
    writeln!(out)
}

/// Table row for the compact listing
#[derive(Tabled)]
struct EntryRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Level")]
    level: String,
    #[tabled(rename = "School")]
    school: String,
    #[tabled(rename = "Casting Time")]
    cast_time: String,
    #[tabled(rename = "Range")]
    range: String,
    #[tabled(rename = "Duration")]
    duration: String,
    #[tabled(rename = "Classes")]
    classes: String,
}

impl From<&Entry> for EntryRow {
    fn from(entry: &Entry) -> Self {
        let duration = if entry.concentration {
            format!("{} (C)", entry.duration)
        } else {
            entry.duration.clone()
        };
        let name = if entry.ritual {
            format!("{} (R)", entry.name)
        } else {
            entry.name.clone()
        };

        Self {
            name,
            level: if entry.is_cantrip() {
                "Cantrip".to_string()
            } else {
                entry.level.to_string()
            },
            school: entry.school.clone(),
            cast_time: entry.cast_time.clone(),
            range: entry.range.clone(),
            duration,
            classes: entry.classes_display(),
        }
    }
}

/// Write entries as a compact table (JSON when requested)
pub fn write_table<W: Write>(
    out: &mut W,
    entries: &[&Entry],
    options: RenderOptions,
) -> io::Result<()> {
    if options.json {
        return write_json(out, entries);
    }

    let rows: Vec<EntryRow> = entries.iter().map(|entry| EntryRow::from(*entry)).collect();
    let table = Table::new(&rows)
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()))
        .to_string();

    writeln!(out, "{table}")
}
