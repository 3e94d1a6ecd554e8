//! CSV input - extension check and header-keyed parsing
//!
//! The first record is the header; every following record becomes a
//! [`Row`]. Blank lines are skipped and short records are accepted, their
//! missing trailing columns simply absent from the row.

use csv::ReaderBuilder;
use miette::Diagnostic;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::row::Row;

/// Errors raised while reading an input file
#[derive(Debug, Error, Diagnostic)]
pub enum InputError {
    #[error("Please upload a .csv file (got {})", path.display())]
    #[diagnostic(
        code(seoplan::input::not_csv),
        help("Only files with a .csv extension are accepted")
    )]
    NotCsv { path: PathBuf },

    #[error("Error parsing CSV: {message}")]
    #[diagnostic(code(seoplan::input::parse))]
    Parse { message: String },

    #[error("Failed to read {}", path.display())]
    #[diagnostic(code(seoplan::input::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<csv::Error> for InputError {
    fn from(err: csv::Error) -> Self {
        InputError::Parse {
            message: err.to_string(),
        }
    }
}

/// Parsed CSV contents
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedCsv {
    pub headers: Vec<String>,
    pub rows: Vec<Row>,
}

/// Whether a path carries a `.csv` extension (case-insensitive)
pub fn is_csv_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}

/// Validate the extension, then read and parse a CSV file
pub fn load_csv(path: &Path) -> Result<ParsedCsv, InputError> {
    if !is_csv_path(path) {
        return Err(InputError::NotCsv {
            path: path.to_path_buf(),
        });
    }

    let file = File::open(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let parsed = parse_csv(file)?;
    tracing::debug!(
        path = %path.display(),
        columns = parsed.headers.len(),
        rows = parsed.rows.len(),
        "parsed csv"
    );
    Ok(parsed)
}

/// Parse CSV text from any reader
pub fn parse_csv<R: Read>(reader: R) -> Result<ParsedCsv, InputError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = reader.headers()?.iter().map(String::from).collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        // Fields past the header have no column name and are dropped
        let row = Row::from_pairs(
            headers
                .iter()
                .zip(record.iter())
                .map(|(h, v)| (h.as_str(), v)),
        );
        rows.push(row);
    }

    Ok(ParsedCsv { headers, rows })
}
