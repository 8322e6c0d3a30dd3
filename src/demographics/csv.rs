//! Header-indexed reader for the comma-separated source tables

use crate::core::error::{DataLoadError, DataLoadErrorKind};

/// A parsed table: header row plus data rows, all fields trimmed
#[derive(Debug)]
pub struct CsvTable {
    file: String,
    headers: Vec<String>,
    rows: Vec<(usize, Vec<String>)>,
}

impl CsvTable {
    /// Parse `content`; `file` is only used in error messages
    pub fn parse(file: &str, content: &str) -> Result<Self, DataLoadError> {
        let mut lines = content
            .lines()
            .enumerate()
            .map(|(idx, line)| (idx + 1, line.trim_start_matches('\u{feff}')))
            .filter(|(_, line)| !line.trim().is_empty());

        let headers = match lines.next() {
            Some((_, header)) => split_fields(header),
            None => return Err(DataLoadError::new(file, DataLoadErrorKind::Empty)),
        };

        let mut rows = Vec::new();
        for (line_no, line) in lines {
            let fields = split_fields(line);
            if fields.len() < headers.len() {
                return Err(DataLoadError::malformed(
                    file,
                    line_no,
                    format!("expected {} fields, found {}", headers.len(), fields.len()),
                ));
            }
            rows.push((line_no, fields));
        }

        if rows.is_empty() {
            return Err(DataLoadError::new(file, DataLoadErrorKind::Empty));
        }

        Ok(Self { file: file.to_string(), headers, rows })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a named column
    pub fn column(&self, name: &str) -> Result<usize, DataLoadError> {
        self.headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| {
                DataLoadError::new(&self.file, DataLoadErrorKind::MissingColumn(name.to_string()))
            })
    }

    /// Iterate rows in file order
    pub fn rows(&self) -> impl Iterator<Item = CsvRow<'_>> {
        self.rows.iter().map(move |(line, fields)| CsvRow { file: &self.file, line: *line, fields })
    }
}

#[derive(Debug)]
pub struct CsvRow<'a> {
    file: &'a str,
    line: usize,
    fields: &'a [String],
}

impl<'a> CsvRow<'a> {
    pub fn line(&self) -> usize {
        self.line
    }

    pub fn text(&self, column: usize) -> &'a str {
        &self.fields[column]
    }

    /// Parse a field, reporting the line and column on failure
    pub fn parse<T: std::str::FromStr>(
        &self,
        column: usize,
        what: &str,
    ) -> Result<T, DataLoadError> {
        let raw = self.text(column);
        raw.parse().map_err(|_| {
            DataLoadError::malformed(self.file, self.line, format!("invalid {} '{}'", what, raw))
        })
    }
}

/// Split a single line into trimmed fields; double quotes group commas
pub fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut quoted = false;

    for ch in line.chars() {
        match ch {
            '"' => quoted = !quoted,
            ',' if !quoted => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    fields.push(current.trim().to_string());
    fields
}
