//! Shell command parsing
//!
//! One command per input line. Anything that is not a known command is a
//! spell name prefix search.

use spells_core::SortOrder;

/// Argument to `load` that ingests the configured defaults
const LOAD_DEFAULTS: &str = "def";

/// Result of parsing one input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Blank line
    Empty,
    Help,
    Exit,
    /// `load <path>`
    Load(String),
    /// `load def`
    LoadDefaults,
    /// `sort` with no argument
    SortOptions,
    Sort(SortOrder),
    /// `filter` with no argument
    FilterOptions,
    FilterClear,
    FilterShow,
    /// `filter <token>`
    FilterAdd(String),
    List,
    Table,
    /// Anything else: a name prefix
    Search(String),
    /// A known command used wrongly, with the message to show
    Invalid(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Command::Empty;
        }

        let (cmd, arg) = trimmed
            .split_once(char::is_whitespace)
            .map(|(c, a)| (c, a.trim()))
            .unwrap_or((trimmed, ""));

        match (cmd, arg) {
            ("help" | "h", "") => Command::Help,
            ("exit" | "quit" | "q" | "x", "") => Command::Exit,
            ("load", "") => Command::Invalid("Usage: load <path> | load def".to_string()),
            ("load", LOAD_DEFAULTS) => Command::LoadDefaults,
            ("load", path) => Command::Load(path.to_string()),
            ("sort", "") => Command::SortOptions,
            ("sort", order) => match order.parse::<SortOrder>() {
                Ok(order) => Command::Sort(order),
                Err(message) => Command::Invalid(message),
            },
            ("filter", "") => Command::FilterOptions,
            ("filter", "clear") => Command::FilterClear,
            ("filter", "list") => Command::FilterShow,
            ("filter", token) => Command::FilterAdd(token.to_string()),
            ("list" | "ls", "") => Command::List,
            ("table", "") => Command::Table,
            _ => Command::Search(trimmed.to_string()),
        }
    }
}

pub const HELP: &str = "\
Commands
  <name>                 show every spell whose name starts with <name>
  list | ls              show spells matching the current filters
  table                  same as list, as a compact table
  filter                 show current filters and filter options
  sort                   show sort options
  load <path>            load a spell list (class taken from the file name)
  load def               load the default spell lists
  help | h               show this help
  exit | quit | q | x    leave the shell";

pub const SORT_HELP: &str = "\
  sort name              sort spells by name
  sort level             sort spells by level, then by name (default)";

pub const FILTER_HELP: &str = "\
Options:
  filter clear                    clear the filter list
  filter list                     show the filter list
  filter 0-9                      only spells of the given level
  filter ritual                   only ritual spells
  filter concentration            only spells that require concentration
  filter bonus                    only spells cast as a bonus action
  filter reaction                 only spells cast as a reaction
  filter school=<School>          only spells of the given school
  filter class=<Class>            only spells castable by the given class";
