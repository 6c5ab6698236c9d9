//! Record reader for `;`-separated spell lists
//!
//! Quoting is lenient: a field that opens with `"` runs until a `"` that is
//! followed by the separator or a line break, `""` inside it yields one `"`,
//! and any other `"` is kept literally. Quoted fields may span lines.
//! Leading spaces and tabs of every field are dropped. Blank lines are skipped.

/// Field separator used by spell sources
pub const SEPARATOR: char = ';';

const QUOTE: char = '"';

/// One row of raw fields and the line it started on (1-based)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub line: usize,
    pub fields: Vec<String>,
}

/// Iterator over the records of an in-memory source
#[derive(Debug, Clone)]
pub struct Records<'a> {
    rest: &'a str,
    line: usize,
}

/// Split source text into records
pub fn records(text: &str) -> Records<'_> {
    Records {
        rest: text.strip_prefix('\u{feff}').unwrap_or(text),
        line: 1,
    }
}

impl<'a> Records<'a> {
    fn skip_blank_lines(&mut self) {
        loop {
            if let Some(rest) = self.rest.strip_prefix("\r\n") {
                self.rest = rest;
            } else if let Some(rest) = self.rest.strip_prefix('\n') {
                self.rest = rest;
            } else {
                break;
            }
            self.line += 1;
        }
    }

    /// Consume a line break at the front of `rest`, if any
    fn take_line_break(&mut self) -> bool {
        if let Some(rest) = self
            .rest
            .strip_prefix("\r\n")
            .or_else(|| self.rest.strip_prefix('\n'))
        {
            self.rest = rest;
            self.line += 1;
            true
        } else {
            false
        }
    }

    /// Read one field. Returns the field and whether it ended the record.
    fn read_field(&mut self) -> (String, bool) {
        self.rest = self.rest.trim_start_matches(|c: char| c == ' ' || c == '\t');

        match self.rest.strip_prefix(QUOTE) {
            Some(rest) => {
                self.rest = rest;
                self.read_quoted()
            }
            None => self.read_unquoted(),
        }
    }

    fn read_unquoted(&mut self) -> (String, bool) {
        match self.rest.find(|c: char| c == SEPARATOR || c == '\n') {
            Some(idx) => {
                let (field, tail) = self.rest.split_at(idx);
                if let Some(rest) = tail.strip_prefix(SEPARATOR) {
                    self.rest = rest;
                    (field.to_string(), false)
                } else {
                    // Line break: drop the '\r' of a CRLF ending
                    let field = field.strip_suffix('\r').unwrap_or(field);
                    self.rest = &tail[1..];
                    self.line += 1;
                    (field.to_string(), true)
                }
            }
            None => {
                let field = self.rest.strip_suffix('\r').unwrap_or(self.rest);
                self.rest = "";
                (field.to_string(), true)
            }
        }
    }

    fn read_quoted(&mut self) -> (String, bool) {
        let mut field = String::new();

        loop {
            let Some(c) = self.rest.chars().next() else {
                // End of input closes an open quote
                return (field, true);
            };

            if c == QUOTE {
                let after = &self.rest[1..];
                if let Some(rest) = after.strip_prefix(QUOTE) {
                    field.push(QUOTE);
                    self.rest = rest;
                } else if let Some(rest) = after.strip_prefix(SEPARATOR) {
                    self.rest = rest;
                    return (field, false);
                } else if after.is_empty() {
                    self.rest = after;
                    return (field, true);
                } else {
                    self.rest = after;
                    if self.take_line_break() {
                        return (field, true);
                    }
                    // Stray quote: keep it
                    field.push(QUOTE);
                }
            } else if self.take_line_break() {
                field.push('\n');
            } else {
                field.push(c);
                self.rest = &self.rest[c.len_utf8()..];
            }
        }
    }
}

impl<'a> Iterator for Records<'a> {
    type Item = Record;

    fn next(&mut self) -> Option<Record> {
        self.skip_blank_lines();
        if self.rest.is_empty() {
            return None;
        }

        let line = self.line;
        let mut fields = Vec::new();
        loop {
            let (field, ended) = self.read_field();
            fields.push(field);
            if ended {
                break;
            }
        }

        Some(Record { line, fields })
    }
}
