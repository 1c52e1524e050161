//! # CSV Text
//!
//! Lexer, value normalizer and header-mapped rows.
//! Pure functions without I/O or state.

pub mod lexer;
pub mod normalize;

use hashbrown::HashMap;

pub use lexer::tokenize_line;
pub use normalize::{clean_value, parse_bool, parse_number};

/// One data row keyed by lowercased header name. Values are cleaned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvRow {
    fields: HashMap<String, String>,
}

impl CsvRow {
    /// Zip headers with raw values. Missing trailing cells become empty
    /// strings, surplus cells are ignored, a repeated header keeps the last column.
    pub fn from_fields(headers: &[String], values: &[String]) -> Self {
        let fields = headers
            .iter()
            .enumerate()
            .map(|(i, h)| (h.clone(), clean_value(values.get(i).map_or("", String::as_str))))
            .collect();
        Self { fields }
    }

    /// Cell under `key`, empty when the column is absent.
    pub fn get(&self, key: &str) -> &str {
        self.fields.get(key).map_or("", String::as_str)
    }

    /// First non-empty cell among historical column names.
    pub fn first_of(&self, aliases: &[&str]) -> &str {
        aliases
            .iter()
            .map(|a| self.get(a))
            .find(|v| !v.is_empty())
            .unwrap_or("")
    }

    /// Non-empty cell as an owned string.
    pub fn optional(&self, key: &str) -> Option<String> {
        let v = self.get(key);
        (!v.is_empty()).then(|| v.to_owned())
    }

    /// Trimmed `id` cell, if any.
    pub fn id(&self) -> Option<&str> {
        let id = self.get("id").trim();
        (!id.is_empty()).then_some(id)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for CsvRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// Parse a whole CSV document into header-mapped rows.
///
/// The first line is the header (cleaned, lowercased); blank lines are
/// skipped. Blank input yields no rows.
pub fn parse_document(text: &str) -> Vec<CsvRow> {
    let trimmed = text.trim_matches(normalize::is_blank);
    let mut lines = trimmed.lines();
    let Some(header_line) = lines.next().filter(|l| !l.is_empty()) else {
        return Vec::new();
    };

    let headers: Vec<String> = tokenize_line(header_line)
        .iter()
        .map(|h| clean_value(h).to_lowercase())
        .collect();

    lines
        .filter(|line| !line.trim().is_empty())
        .map(|line| CsvRow::from_fields(&headers, &tokenize_line(line)))
        .collect()
}
