//! Interactive shell over an owned catalog
//!
//! The shell holds the session state: the catalog, the active filter list
//! and the sort order. Each input line is parsed into a [`Command`] and
//! executed against that state, with output going to any `Write` sink.

use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use tracing::{debug, trace};

use spells_core::{Catalog, FilterList, IngestReport, SortOrder};

use crate::command::{Command, FILTER_HELP, HELP, SORT_HELP};
use crate::render::{write_entries, write_table, RenderOptions};

const NO_MATCH: &str = "No spell or command not recognized.";

/// Whether the session continues after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub struct Shell<W: Write> {
    catalog: Catalog,
    filters: FilterList,
    sort: SortOrder,
    render: RenderOptions,
    prompt: Option<String>,
    out: W,
}

impl<W: Write> Shell<W> {
    pub fn new(catalog: Catalog, out: W) -> Self {
        Self {
            catalog,
            filters: FilterList::new(),
            sort: SortOrder::default(),
            render: RenderOptions::default(),
            prompt: None,
            out,
        }
    }

    pub fn with_sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    pub fn with_render(mut self, render: RenderOptions) -> Self {
        self.render = render;
        self
    }

    /// Print `prompt` before reading each line
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn filters(&self) -> &FilterList {
        &self.filters
    }

    pub fn sort(&self) -> SortOrder {
        self.sort
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Read commands until end of input or an exit command
    pub fn run<R: BufRead>(&mut self, input: R) -> Result<()> {
        let mut lines = input.lines();
        loop {
            if let Some(prompt) = &self.prompt {
                write!(self.out, "{prompt}")?;
                self.out.flush()?;
            }

            let Some(line) = lines.next() else {
                debug!("End of input");
                return Ok(());
            };
            let line = line.context("Failed to read command")?;

            if self.handle(&line)? == Flow::Exit {
                return Ok(());
            }
        }
    }

    /// Execute one input line
    pub fn handle(&mut self, line: &str) -> Result<Flow> {
        let command = Command::parse(line);
        trace!(?command, "Handling command");

        match command {
            Command::Empty => {}
            Command::Help => writeln!(self.out, "{HELP}")?,
            Command::Exit => {
                writeln!(self.out, "Goodbye.")?;
                return Ok(Flow::Exit);
            }
            Command::Load(path) => {
                writeln!(self.out, "Loading {path}...")?;
                match self.catalog.ingest(&path) {
                    Ok(report) => self.write_report(&report)?,
                    Err(err) => writeln!(self.out, "Could not load {path}: {err}")?,
                }
            }
            Command::LoadDefaults => self.load_defaults()?,
            Command::SortOptions => {
                writeln!(self.out, "Currently sorting by {}.", self.sort)?;
                writeln!(self.out, "{SORT_HELP}")?;
            }
            Command::Sort(order) => {
                self.sort = order;
                writeln!(self.out, "Now sorting by {order}.")?;
            }
            Command::FilterOptions => {
                writeln!(self.out, "Current filters: {}", self.filters)?;
                writeln!(self.out, "{FILTER_HELP}")?;
            }
            Command::FilterClear => {
                self.filters.clear();
                writeln!(self.out, "Cleared filters.")?;
            }
            Command::FilterShow => writeln!(self.out, "Current filters: {}", self.filters)?,
            Command::FilterAdd(token) => {
                if !self.filters.push(&token).is_recognized() {
                    writeln!(
                        self.out,
                        "Note: '{token}' is not a known filter and matches no spell."
                    )?;
                }
                writeln!(self.out, "Filtering... {}", self.filters)?;
            }
            Command::List => {
                writeln!(self.out, "Filters: {}", self.filters)?;
                let results = self.sort.sorted(self.catalog.apply(&self.filters));
                write_entries(&mut self.out, &results, self.render)?;
            }
            Command::Table => {
                let results = self.sort.sorted(self.catalog.apply(&self.filters));
                write_table(&mut self.out, &results, self.render)?;
            }
            Command::Search(prefix) => {
                let results = self.sort.sorted(self.catalog.lookup_prefix(&prefix));
                if results.is_empty() {
                    writeln!(self.out, "{NO_MATCH}")?;
                } else {
                    write_entries(&mut self.out, &results, self.render)?;
                }
            }
            Command::Invalid(message) => writeln!(self.out, "{message}")?,
        }

        Ok(Flow::Continue)
    }

    fn load_defaults(&mut self) -> Result<()> {
        if self.catalog.defaults().is_empty() {
            writeln!(self.out, "No default spell lists configured.")?;
            return Ok(());
        }

        writeln!(self.out, "Loading default spell lists...")?;
        match self.catalog.ingest_defaults() {
            Ok(reports) => {
                for report in &reports {
                    self.write_report(report)?;
                }
            }
            Err(err) => writeln!(self.out, "Could not load defaults: {err}")?,
        }
        Ok(())
    }

    fn write_report(&mut self, report: &IngestReport) -> Result<()> {
        write!(
            self.out,
            "Loaded {} spells for {} ({} new)",
            report.accepted(),
            report.tag,
            report.inserted
        )?;
        if !report.rejected.is_empty() {
            write!(self.out, ", skipped {} malformed rows", report.rejected.len())?;
        }
        writeln!(self.out, ".")?;
        Ok(())
    }
}
