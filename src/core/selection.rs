//! Selection tracker for rows chosen for processing
//!
//! Callers address rows by their position in the current view, but the
//! selection records stable [`RowId`]s, so re-sorting the view never moves
//! a selection onto a different row. Filtering resets it (see
//! [`Selection::reset`]).

use std::collections::BTreeSet;

use crate::core::store::RowId;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    chosen: BTreeSet<RowId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select every row of a freshly derived view
    pub fn reset(&mut self, view: &[RowId]) {
        self.select_all(view);
    }

    /// Flip the row at `position`; returns whether it is now selected.
    /// Positions outside the view are ignored.
    pub fn toggle(&mut self, view: &[RowId], position: usize) -> bool {
        let Some(&id) = view.get(position) else {
            return false;
        };
        if self.chosen.remove(&id) {
            false
        } else {
            self.chosen.insert(id);
            true
        }
    }

    pub fn select_all(&mut self, view: &[RowId]) {
        self.chosen = view.iter().copied().collect();
    }

    pub fn select_none(&mut self) {
        self.chosen.clear();
    }

    /// Replace the selection with exactly the given view positions
    pub fn set_positions<I>(&mut self, view: &[RowId], positions: I)
    where
        I: IntoIterator<Item = usize>,
    {
        self.chosen = positions
            .into_iter()
            .filter_map(|p| view.get(p).copied())
            .collect();
    }

    pub fn is_selected(&self, view: &[RowId], position: usize) -> bool {
        view.get(position)
            .is_some_and(|id| self.chosen.contains(id))
    }

    pub fn count(&self) -> usize {
        self.chosen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chosen.is_empty()
    }

    /// True when every row of a non-empty view is selected
    pub fn is_complete(&self, view: &[RowId]) -> bool {
        !view.is_empty() && view.iter().all(|id| self.chosen.contains(id))
    }

    /// Selected row ids in view order
    pub fn selected_ids(&self, view: &[RowId]) -> Vec<RowId> {
        view.iter()
            .copied()
            .filter(|id| self.chosen.contains(id))
            .collect()
    }
}
