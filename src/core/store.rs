//! Row store with a derived filtered and sorted view
//!
//! The view is a list of [`RowId`]s (positions in the raw data) and is
//! always rebuilt from scratch: filter the raw rows, then apply the active
//! sort. Nothing patches it incrementally.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::core::row::Row;

/// Stable identity of a row: its position in the loaded data
pub type RowId = usize;

/// Sort direction for the preview view
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(format!("Invalid sort direction: '{}'. Use asc or desc", s)),
        }
    }
}

/// The active sort column and direction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortState {
    pub key: String,
    pub direction: SortDirection,
}

/// Holds the loaded rows and the current filtered view
#[derive(Debug, Clone, Default)]
pub struct RowStore {
    headers: Vec<String>,
    raw: Vec<Row>,
    view: Vec<RowId>,
    filter: String,
    sort: Option<SortState>,
}

impl RowStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all data; the view becomes every row in load order and
    /// any filter or sort is dropped
    pub fn load(&mut self, headers: Vec<String>, rows: Vec<Row>) {
        self.headers = headers;
        self.raw = rows;
        self.filter.clear();
        self.sort = None;
        self.recompute();
    }

    /// Drop all data
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Keep rows whose known columns contain `query` (case-insensitive)
    pub fn apply_filter(&mut self, query: &str) {
        self.filter = query.to_string();
        self.recompute();
    }

    /// Sort by `key`; repeating the last key flips the direction.
    /// Returns the direction now in effect.
    pub fn apply_sort(&mut self, key: &str) -> SortDirection {
        let direction = match &self.sort {
            Some(current) if current.key == key => current.direction.toggled(),
            _ => SortDirection::Asc,
        };
        self.sort = Some(SortState {
            key: key.to_string(),
            direction,
        });
        self.recompute();
        direction
    }

    fn recompute(&mut self) {
        let needle = self.filter.to_lowercase();
        let mut view: Vec<RowId> = self
            .raw
            .iter()
            .enumerate()
            .filter(|(_, row)| needle.is_empty() || row.search_text().contains(&needle))
            .map(|(id, _)| id)
            .collect();

        if let Some(sort) = &self.sort {
            let raw = &self.raw;
            // sort_by is stable, so ties keep load order
            view.sort_by(|&a, &b| {
                let ord = compare_field(&raw[a], &raw[b], &sort.key);
                match sort.direction {
                    SortDirection::Asc => ord,
                    SortDirection::Desc => ord.reverse(),
                }
            });
        }

        self.view = view;
    }

    /// Column names from the source header
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// All loaded rows in load order
    pub fn raw(&self) -> &[Row] {
        &self.raw
    }

    /// Row ids of the current view, in display order
    pub fn view(&self) -> &[RowId] {
        &self.view
    }

    /// Row at a position of the current view
    pub fn row(&self, position: usize) -> Option<&Row> {
        self.view.get(position).and_then(|&id| self.raw.get(id))
    }

    /// Row by stable id
    pub fn row_by_id(&self, id: RowId) -> Option<&Row> {
        self.raw.get(id)
    }

    /// Rows of the current view, in display order
    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.view.iter().filter_map(|&id| self.raw.get(id))
    }

    /// Number of rows in the current view
    pub fn len(&self) -> usize {
        self.view.len()
    }

    pub fn is_empty(&self) -> bool {
        self.view.is_empty()
    }

    /// Number of loaded rows regardless of filter
    pub fn total(&self) -> usize {
        self.raw.len()
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn sort(&self) -> Option<&SortState> {
        self.sort.as_ref()
    }
}

fn compare_field(a: &Row, b: &Row, key: &str) -> Ordering {
    a.get(key).to_lowercase().cmp(&b.get(key).to_lowercase())
}
