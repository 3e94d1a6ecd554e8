//! Wizard controller: the four-step upload/preview/process/export machine
//!
//! [`Wizard`] owns every piece of workflow state and is the only thing
//! that moves between steps. Shells ask [`Wizard::can_advance`] and
//! [`Wizard::allowed_transitions`] to decide which controls to offer; a
//! refused call returns a [`WizardError`] and leaves the state untouched.

use miette::Diagnostic;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

use crate::core::demo;
use crate::core::export::{self, ExportStats};
use crate::core::generator::{ProcessingResult, RandomSource, StubGenerator};
use crate::core::row::Row;
use crate::core::selection::Selection;
use crate::core::store::{RowStore, SortDirection};

/// The wizard's steps, in order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WizardStep {
    #[default]
    Upload,
    Preview,
    Process,
    Export,
}

impl WizardStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            WizardStep::Upload => "Upload",
            WizardStep::Preview => "Preview",
            WizardStep::Process => "Process",
            WizardStep::Export => "Export",
        }
    }

    pub fn all() -> &'static [WizardStep] {
        &[
            WizardStep::Upload,
            WizardStep::Preview,
            WizardStep::Process,
            WizardStep::Export,
        ]
    }

    /// Zero-based position in the step sequence
    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn next(&self) -> Option<WizardStep> {
        match self {
            WizardStep::Upload => Some(WizardStep::Preview),
            WizardStep::Preview => Some(WizardStep::Process),
            WizardStep::Process => Some(WizardStep::Export),
            WizardStep::Export => None,
        }
    }

    pub fn previous(&self) -> Option<WizardStep> {
        match self {
            WizardStep::Upload => None,
            WizardStep::Preview => Some(WizardStep::Upload),
            WizardStep::Process => Some(WizardStep::Preview),
            WizardStep::Export => Some(WizardStep::Process),
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Why a forward transition is not available
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockReason {
    NoRows,
    EmptySelection,
    NotProcessed,
    FinalStep,
}

impl fmt::Display for BlockReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            BlockReason::NoRows => "no rows loaded",
            BlockReason::EmptySelection => "no rows selected",
            BlockReason::NotProcessed => "results have not been generated",
            BlockReason::FinalStep => "export is the final step",
        };
        write!(f, "{}", msg)
    }
}

/// Errors for refused wizard operations
#[derive(Debug, Error, Diagnostic, PartialEq, Eq)]
pub enum WizardError {
    #[error("Cannot advance from {from}: {reason}")]
    #[diagnostic(code(seoplan::wizard::blocked))]
    Blocked { from: WizardStep, reason: BlockReason },

    #[error("{step} is the first step")]
    #[diagnostic(code(seoplan::wizard::no_previous))]
    NoPrevious { step: WizardStep },

    #[error("'{action}' belongs to the {expected} step (current: {current})")]
    #[diagnostic(code(seoplan::wizard::wrong_step))]
    WrongStep {
        action: &'static str,
        expected: WizardStep,
        current: WizardStep,
    },
}

/// Application state for one wizard session
#[derive(Debug, Default)]
pub struct Wizard {
    step: WizardStep,
    store: RowStore,
    selection: Selection,
    to_process: Vec<Row>,
    results: Option<Vec<ProcessingResult>>,
    latency: Duration,
}

impl Wizard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wizard that pauses for `latency` before generating results
    pub fn with_latency(latency: Duration) -> Self {
        Self {
            latency,
            ..Self::default()
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn store(&self) -> &RowStore {
        &self.store
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Rows committed for processing
    pub fn to_process(&self) -> &[Row] {
        &self.to_process
    }

    pub fn results(&self) -> Option<&[ProcessingResult]> {
        self.results.as_deref()
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }

    // =====================================================================
    // Transitions
    // =====================================================================

    /// Whether the next step is reachable right now
    pub fn can_advance(&self) -> Result<WizardStep, BlockReason> {
        match self.step {
            WizardStep::Upload if self.store.total() == 0 => Err(BlockReason::NoRows),
            WizardStep::Upload => Ok(WizardStep::Preview),
            WizardStep::Preview if self.selection.is_empty() => Err(BlockReason::EmptySelection),
            WizardStep::Preview => Ok(WizardStep::Process),
            WizardStep::Process if self.results.is_none() => Err(BlockReason::NotProcessed),
            WizardStep::Process => Ok(WizardStep::Export),
            WizardStep::Export => Err(BlockReason::FinalStep),
        }
    }

    /// Steps reachable from the current one
    pub fn allowed_transitions(&self) -> Vec<WizardStep> {
        let mut steps = Vec::new();
        if let Ok(next) = self.can_advance() {
            steps.push(next);
        }
        if let Some(previous) = self.step.previous() {
            steps.push(previous);
        }
        if self.step == WizardStep::Export {
            steps.push(WizardStep::Upload);
        }
        steps.sort();
        steps.dedup();
        steps
    }

    /// Move to the next step if its guard passes
    pub fn advance(&mut self) -> Result<WizardStep, WizardError> {
        let next = self.can_advance().map_err(|reason| WizardError::Blocked {
            from: self.step,
            reason,
        })?;

        if next == WizardStep::Process {
            let snapshot: Vec<Row> = self.selected_rows().into_iter().cloned().collect();
            self.to_process = snapshot;
            self.results = None;
        }

        tracing::debug!(from = %self.step, to = %next, "wizard advanced");
        self.step = next;
        Ok(next)
    }

    /// Move exactly one step back
    ///
    /// Leaving Process for Preview drops the committed rows and any
    /// results; going back from Export keeps the results.
    pub fn back(&mut self) -> Result<WizardStep, WizardError> {
        let previous = self
            .step
            .previous()
            .ok_or(WizardError::NoPrevious { step: self.step })?;

        if self.step == WizardStep::Process {
            self.to_process.clear();
            self.results = None;
        }

        tracing::debug!(from = %self.step, to = %previous, "wizard went back");
        self.step = previous;
        Ok(previous)
    }

    /// Reset everything and return to Upload; only offered on Export
    pub fn start_over(&mut self) -> Result<(), WizardError> {
        self.expect_step("start over", WizardStep::Export)?;
        let latency = self.latency;
        *self = Self::with_latency(latency);
        tracing::debug!("wizard reset");
        Ok(())
    }

    // =====================================================================
    // Upload
    // =====================================================================

    /// Replace the loaded rows and select all of them
    ///
    /// Accepted in Upload and, to swap data sets, in Preview.
    pub fn load(&mut self, headers: Vec<String>, rows: Vec<Row>) -> Result<usize, WizardError> {
        if !matches!(self.step, WizardStep::Upload | WizardStep::Preview) {
            return Err(WizardError::WrongStep {
                action: "load rows",
                expected: WizardStep::Upload,
                current: self.step,
            });
        }

        self.store.load(headers, rows);
        self.selection.reset(self.store.view());
        tracing::info!(rows = self.store.total(), "rows loaded");
        Ok(self.store.total())
    }

    /// Load the built-in demo records
    pub fn load_demo(&mut self) -> Result<usize, WizardError> {
        self.load(demo::demo_headers(), demo::demo_rows())
    }

    // =====================================================================
    // Preview
    // =====================================================================

    /// Filter the view; the selection resets to every visible row
    pub fn apply_filter(&mut self, query: &str) -> Result<usize, WizardError> {
        self.expect_step("filter", WizardStep::Preview)?;
        self.store.apply_filter(query);
        self.selection.reset(self.store.view());
        tracing::debug!(query, visible = self.store.len(), "filter applied");
        Ok(self.store.len())
    }

    /// Sort the view by a column, toggling direction on repeat
    pub fn apply_sort(&mut self, key: &str) -> Result<SortDirection, WizardError> {
        self.expect_step("sort", WizardStep::Preview)?;
        let direction = self.store.apply_sort(key);
        tracing::debug!(key, %direction, "sort applied");
        Ok(direction)
    }

    /// Flip the row at a view position; returns its new state
    pub fn toggle(&mut self, position: usize) -> Result<bool, WizardError> {
        self.expect_step("toggle row", WizardStep::Preview)?;
        Ok(self.selection.toggle(self.store.view(), position))
    }

    pub fn select_all(&mut self) -> Result<(), WizardError> {
        self.expect_step("select all", WizardStep::Preview)?;
        self.selection.select_all(self.store.view());
        Ok(())
    }

    pub fn select_none(&mut self) -> Result<(), WizardError> {
        self.expect_step("select none", WizardStep::Preview)?;
        self.selection.select_none();
        Ok(())
    }

    /// Replace the selection with the given view positions
    pub fn set_selection<I>(&mut self, positions: I) -> Result<(), WizardError>
    where
        I: IntoIterator<Item = usize>,
    {
        self.expect_step("select rows", WizardStep::Preview)?;
        self.selection.set_positions(self.store.view(), positions);
        Ok(())
    }

    pub fn is_selected(&self, position: usize) -> bool {
        self.selection.is_selected(self.store.view(), position)
    }

    /// Selected rows in view order
    pub fn selected_rows(&self) -> Vec<&Row> {
        self.selection
            .selected_ids(self.store.view())
            .into_iter()
            .filter_map(|id| self.store.row_by_id(id))
            .collect()
    }

    pub fn selected_count(&self) -> usize {
        self.selection.count()
    }

    pub fn is_selection_complete(&self) -> bool {
        self.selection.is_complete(self.store.view())
    }

    // =====================================================================
    // Process / Export
    // =====================================================================

    /// Generate results for the committed rows
    ///
    /// Sleeps for the configured latency first. Running it again replaces
    /// earlier results.
    pub fn process<S: RandomSource>(
        &mut self,
        generator: &mut StubGenerator<S>,
    ) -> Result<&[ProcessingResult], WizardError> {
        self.expect_step("generate", WizardStep::Process)?;

        if !self.latency.is_zero() {
            std::thread::sleep(self.latency);
        }

        let results = generator.generate_all(&self.to_process);
        tracing::info!(sites = results.len(), "strategies generated");
        Ok(self.results.insert(results).as_slice())
    }

    /// Totals shown on the export step
    pub fn export_stats(&self) -> ExportStats {
        export::stats(self.results().unwrap_or_default())
    }

    fn expect_step(&self, action: &'static str, expected: WizardStep) -> Result<(), WizardError> {
        if self.step == expected {
            Ok(())
        } else {
            Err(WizardError::WrongStep {
                action,
                expected,
                current: self.step,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::row::{PRIMARY_GEO, URL};

    fn rows(urls: &[&str]) -> Vec<Row> {
        urls.iter()
            .map(|u| Row::from_pairs([(URL, *u), (PRIMARY_GEO, "Austin")]))
            .collect()
    }

    fn wizard_in_preview(urls: &[&str]) -> Wizard {
        let mut wizard = Wizard::new();
        wizard.load(vec![URL.to_string()], rows(urls)).unwrap();
        wizard.advance().unwrap();
        wizard
    }

    #[test]
    fn test_step_order() {
        assert_eq!(WizardStep::Upload.next(), Some(WizardStep::Preview));
        assert_eq!(WizardStep::Export.next(), None);
        assert_eq!(WizardStep::Upload.previous(), None);
        assert_eq!(WizardStep::Export.previous(), Some(WizardStep::Process));
        assert_eq!(WizardStep::Process.index(), 2);
    }

    #[test]
    fn test_load_selects_everything() {
        let mut wizard = Wizard::new();
        wizard.load(Vec::new(), rows(&["a", "b", "c"])).unwrap();
        assert_eq!(wizard.selected_count(), 3);
        assert!(wizard.is_selection_complete());
        assert_eq!(wizard.store().view(), &[0, 1, 2]);
    }

    #[test]
    fn test_upload_blocked_without_rows() {
        let mut wizard = Wizard::new();
        wizard.load(vec![URL.to_string()], Vec::new()).unwrap();
        assert_eq!(wizard.can_advance(), Err(BlockReason::NoRows));

        let err = wizard.advance().unwrap_err();
        assert_eq!(
            err,
            WizardError::Blocked {
                from: WizardStep::Upload,
                reason: BlockReason::NoRows
            }
        );
        assert_eq!(wizard.step(), WizardStep::Upload);
    }

    #[test]
    fn test_empty_filter_result_blocks_processing() {
        let mut wizard = wizard_in_preview(&["a", "b"]);
        assert_eq!(wizard.apply_filter("nothing-matches").unwrap(), 0);
        assert_eq!(wizard.selected_count(), 0);
        assert!(!wizard.is_selection_complete());
        assert_eq!(wizard.can_advance(), Err(BlockReason::EmptySelection));
        assert!(wizard.advance().is_err());
        assert_eq!(wizard.step(), WizardStep::Preview);
    }

    #[test]
    fn test_filter_resets_partial_selection() {
        let mut wizard = wizard_in_preview(&["alpha", "beta", "alphabet"]);
        wizard.select_none().unwrap();
        wizard.toggle(0).unwrap();
        assert_eq!(wizard.selected_count(), 1);

        wizard.apply_filter("alpha").unwrap();
        assert_eq!(wizard.selected_count(), 2);
        assert!(wizard.is_selection_complete());
    }

    #[test]
    fn test_advance_snapshots_selected_rows() {
        let mut wizard = wizard_in_preview(&["a", "b", "c"]);
        wizard.toggle(1).unwrap();
        wizard.advance().unwrap();

        assert_eq!(wizard.step(), WizardStep::Process);
        let urls: Vec<&str> = wizard.to_process().iter().map(|r| r.get(URL)).collect();
        assert_eq!(urls, vec!["a", "c"]);
    }

    #[test]
    fn test_sort_after_partial_selection_keeps_rows() {
        let mut wizard = wizard_in_preview(&["b", "a", "c"]);
        wizard.toggle(0).unwrap(); // deselect "b"
        wizard.apply_sort(URL).unwrap();

        // view is now a, b, c and "b" is still the unselected one
        assert!(wizard.is_selected(0));
        assert!(!wizard.is_selected(1));
        assert!(wizard.is_selected(2));

        wizard.advance().unwrap();
        let urls: Vec<&str> = wizard.to_process().iter().map(|r| r.get(URL)).collect();
        assert_eq!(urls, vec!["a", "c"]);
    }

    #[test]
    fn test_snapshot_is_decoupled_from_preview() {
        let mut wizard = wizard_in_preview(&["a", "b"]);
        wizard.advance().unwrap();
        wizard.back().unwrap();
        assert!(wizard.to_process().is_empty());

        wizard.apply_filter("b").unwrap();
        wizard.advance().unwrap();
        assert_eq!(wizard.to_process().len(), 1);
    }

    #[test]
    fn test_export_requires_results() {
        let mut wizard = wizard_in_preview(&["a"]);
        wizard.advance().unwrap();
        assert_eq!(wizard.can_advance(), Err(BlockReason::NotProcessed));

        let mut generator = StubGenerator::seeded(1);
        let results = wizard.process(&mut generator).unwrap();
        assert_eq!(results.len(), 1);

        assert_eq!(wizard.advance().unwrap(), WizardStep::Export);
        assert_eq!(wizard.can_advance(), Err(BlockReason::FinalStep));
    }

    #[test]
    fn test_process_only_in_process_step() {
        let mut wizard = wizard_in_preview(&["a"]);
        let mut generator = StubGenerator::seeded(1);
        let err = wizard.process(&mut generator).unwrap_err();
        assert!(matches!(err, WizardError::WrongStep { .. }));
        assert!(wizard.results().is_none());
    }

    #[test]
    fn test_preview_actions_refused_elsewhere() {
        let mut wizard = Wizard::new();
        wizard.load_demo().unwrap();
        assert!(wizard.apply_filter("x").is_err());
        assert!(wizard.apply_sort(URL).is_err());
        assert!(wizard.toggle(0).is_err());
        assert_eq!(wizard.selected_count(), 2);
    }

    #[test]
    fn test_back_moves_one_step() {
        let mut wizard = wizard_in_preview(&["a"]);
        wizard.advance().unwrap();
        wizard.process(&mut StubGenerator::seeded(3)).unwrap();
        wizard.advance().unwrap();

        assert_eq!(wizard.back().unwrap(), WizardStep::Process);
        assert!(wizard.results().is_some());
        assert_eq!(wizard.back().unwrap(), WizardStep::Preview);
        assert!(wizard.results().is_none());
        assert_eq!(wizard.back().unwrap(), WizardStep::Upload);
        assert_eq!(
            wizard.back().unwrap_err(),
            WizardError::NoPrevious {
                step: WizardStep::Upload
            }
        );
        // Rows survive going back to upload
        assert_eq!(wizard.store().total(), 1);
    }

    #[test]
    fn test_start_over_only_from_export() {
        let mut wizard = wizard_in_preview(&["a"]);
        assert!(wizard.start_over().is_err());

        wizard.advance().unwrap();
        wizard.process(&mut StubGenerator::seeded(3)).unwrap();
        wizard.advance().unwrap();
        wizard.start_over().unwrap();

        assert_eq!(wizard.step(), WizardStep::Upload);
        assert_eq!(wizard.store().total(), 0);
        assert!(wizard.results().is_none());
        assert!(wizard.to_process().is_empty());
    }

    #[test]
    fn test_start_over_keeps_latency() {
        let mut wizard = Wizard::with_latency(Duration::from_millis(1));
        wizard.load_demo().unwrap();
        wizard.advance().unwrap();
        wizard.advance().unwrap();
        wizard.process(&mut StubGenerator::seeded(3)).unwrap();
        wizard.advance().unwrap();
        wizard.start_over().unwrap();
        assert_eq!(wizard.latency(), Duration::from_millis(1));
    }

    #[test]
    fn test_allowed_transitions() {
        let mut wizard = Wizard::new();
        assert!(wizard.allowed_transitions().is_empty());

        wizard.load_demo().unwrap();
        assert_eq!(wizard.allowed_transitions(), vec![WizardStep::Preview]);

        wizard.advance().unwrap();
        assert_eq!(
            wizard.allowed_transitions(),
            vec![WizardStep::Upload, WizardStep::Process]
        );

        wizard.select_none().unwrap();
        assert_eq!(wizard.allowed_transitions(), vec![WizardStep::Upload]);
    }

    #[test]
    fn test_load_refused_after_preview() {
        let mut wizard = wizard_in_preview(&["a"]);
        wizard.advance().unwrap();
        let err = wizard.load(Vec::new(), rows(&["x"])).unwrap_err();
        assert!(matches!(err, WizardError::WrongStep { .. }));
        assert_eq!(wizard.to_process().len(), 1);
    }

    #[test]
    fn test_demo_scenario() {
        let mut wizard = Wizard::new();
        wizard.load_demo().unwrap();
        wizard.advance().unwrap();
        wizard.select_all().unwrap();
        wizard.advance().unwrap();
        wizard.process(&mut StubGenerator::seeded(7)).unwrap();
        wizard.advance().unwrap();

        let json = export::to_json(wizard.results().unwrap()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let entries = value.as_array().unwrap();
        assert_eq!(entries.len(), 2);
        for entry in entries {
            assert_eq!(entry["architecture"]["homepage"].as_array().unwrap().len(), 1);
        }

        let stats = wizard.export_stats();
        assert_eq!(stats.sites, 2);
        assert_eq!(stats.pages, 17);
        assert_eq!(stats.outlines, 17);
    }
}
