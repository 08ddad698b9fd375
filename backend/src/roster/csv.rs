//! CSV ingestion shared by the roster tables.
//!
//! Uploaded lists come from spreadsheets in the wild: the delimiter varies,
//! headers carry stray case and whitespace, and Excel likes to prepend a
//! UTF-8 BOM. Parsing here is forgiving about all of that but strict about
//! row shape: a ragged row rejects the whole upload, so a half-broken file
//! never half-replaces a table.

use csv::{ReaderBuilder, StringRecord};
use regex::Regex;

use crate::error::{Error, Result};

/// Delimiters we sniff for.
const DELIMITERS: [u8; 4] = [b',', b';', b'\t', b'|'];

/// A parsed upload: normalized headers plus the raw data rows.
#[derive(Debug)]
pub struct CsvTable {
    headers: Vec<String>,
    rows: Vec<StringRecord>,
}

impl CsvTable {
    /// Parse raw upload bytes into a table.
    ///
    /// Fails with a `Schema` error when the header row is unreadable or any
    /// data row does not match the header's column count.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let bytes = strip_bom(bytes);
        let delimiter = sniff_delimiter(header_line(bytes));

        let whitespace =
            Regex::new(r"\s+").map_err(|e| Error::schema(format!("regex error: {e}")))?;

        let mut reader = ReaderBuilder::new().delimiter(delimiter).from_reader(bytes);
        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| Error::schema(format!("unreadable header row: {e}")))?
            .iter()
            .map(|h| normalize_header(&whitespace, h))
            .collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| Error::schema(format!("malformed row: {e}")))?;
            rows.push(record);
        }

        Ok(Self { headers, rows })
    }

    /// Find a column by its normalized name, falling back to the first
    /// header that contains `fragment`. Mirrors how admins actually label
    /// spreadsheet columns ("Name", "Crew name", "Equipment Name", ...).
    pub fn column(&self, exact: &str, fragment: &str) -> Option<usize> {
        self.headers
            .iter()
            .position(|h| h == exact)
            .or_else(|| self.headers.iter().position(|h| h.contains(fragment)))
    }

    pub fn rows(&self) -> &[StringRecord] {
        &self.rows
    }

    /// Trimmed cell value for `column` in `row`.
    pub fn value<'a>(&self, row: &'a StringRecord, column: usize) -> &'a str {
        row.get(column).map(str::trim).unwrap_or_default()
    }
}

/// Pick the delimiter that occurs most often in the header line, defaulting
/// to comma when none of the candidates appears at all.
fn sniff_delimiter(line: &[u8]) -> u8 {
    let count = |d: u8| line.iter().filter(|&&b| b == d).count();
    DELIMITERS
        .iter()
        .copied()
        .max_by_key(|&d| count(d))
        .filter(|&d| count(d) > 0)
        .unwrap_or(b',')
}

fn header_line(bytes: &[u8]) -> &[u8] {
    match bytes.iter().position(|&b| b == b'\n') {
        Some(pos) => &bytes[..pos],
        None => bytes,
    }
}

fn strip_bom(bytes: &[u8]) -> &[u8] {
    bytes.strip_prefix(b"\xef\xbb\xbf").unwrap_or(bytes)
}

fn normalize_header(whitespace: &Regex, raw: &str) -> String {
    whitespace.replace_all(raw.trim(), "").to_lowercase()
}
