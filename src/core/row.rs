//! Row type - one parsed CSV record keyed by column name

use std::fmt;

/// Column holding the site URL
pub const URL: &str = "url";
/// Comma-separated primary keywords
pub const PRIMARY_KEYWORDS: &str = "primary_keywords";
/// Comma-separated secondary keywords
pub const SECONDARY_KEYWORDS: &str = "secondary_keywords";
/// Main geographic area
pub const PRIMARY_GEO: &str = "primary_geo";
/// Comma-separated additional geographic areas
pub const SECONDARY_GEO: &str = "secondary_geo";

/// The columns the generator reads, in the order the filter joins them
pub const KNOWN_COLUMNS: [&str; 5] = [
    URL,
    PRIMARY_KEYWORDS,
    SECONDARY_KEYWORDS,
    PRIMARY_GEO,
    SECONDARY_GEO,
];

/// A single record as a column-name to value mapping
///
/// Column order follows the source header. Missing columns read as the
/// empty string through [`Row::get`]; use [`Row::get_opt`] to tell a
/// missing column apart from an empty one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    fields: Vec<(String, String)>,
}

impl Row {
    /// Create an empty row
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a row from (column, value) pairs; later duplicates win
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut row = Self::new();
        for (key, value) in pairs {
            row.insert(key, value);
        }
        row
    }

    /// Set a column value, replacing any existing value for that column
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((key, value)),
        }
    }

    /// Value of a column, or `""` when the column is absent
    pub fn get(&self, key: &str) -> &str {
        self.get_opt(key).unwrap_or("")
    }

    /// Value of a column if the row has it
    pub fn get_opt(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Column names in source order
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    /// (column, value) pairs in source order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Lowercased haystack used by the text filter
    pub(crate) fn search_text(&self) -> String {
        KNOWN_COLUMNS
            .iter()
            .map(|column| self.get(column))
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase()
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.get_opt(URL) {
            Some(url) if !url.is_empty() => write!(f, "{}", url),
            _ => write!(f, "(no url)"),
        }
    }
}
