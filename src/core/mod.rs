//! Core module - row storage, selection, generation and export

pub mod config;
pub mod demo;
pub mod export;
pub mod generator;
pub mod input;
pub mod row;
pub mod selection;
pub mod store;
pub mod wizard;

pub use config::Config;
pub use export::{ExportError, ExportFormat, ExportStats};
pub use generator::{ProcessingResult, RandomSource, RngSource, StubGenerator};
pub use input::{InputError, ParsedCsv};
pub use row::Row;
pub use selection::Selection;
pub use store::{RowId, RowStore, SortDirection, SortState};
pub use wizard::{BlockReason, Wizard, WizardError, WizardStep};
