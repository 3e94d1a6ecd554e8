//! Shared utilities for CLI commands

use console::style;
use miette::Result;
use std::path::PathBuf;

use crate::core::input::load_csv;
use crate::core::store::SortDirection;
use crate::core::wizard::Wizard;

/// Where the rows come from
#[derive(clap::Args, Debug, Clone)]
pub struct SourceArgs {
    /// CSV file with a header row (url, primary_keywords, ...)
    #[arg(required_unless_present = "demo")]
    pub file: Option<PathBuf>,

    /// Use the built-in demo records instead of a file
    #[arg(long, conflicts_with = "file")]
    pub demo: bool,
}

/// Filter and sort options shared by preview and run
#[derive(clap::Args, Debug, Clone)]
pub struct ViewArgs {
    /// Keep rows whose url, keywords or geo columns contain this text
    #[arg(long)]
    pub filter: Option<String>,

    /// Sort by one column, optionally with direction (e.g. url, primary_geo:desc).
    /// Rows with equal values keep their file order.
    #[arg(long, value_parser = parse_sort_spec)]
    pub sort: Option<SortSpec>,
}

/// A `--sort` argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub key: String,
    pub direction: SortDirection,
}

pub fn parse_sort_spec(s: &str) -> Result<SortSpec, String> {
    let (key, direction) = match s.split_once(':') {
        Some((key, dir)) => (key, dir.parse::<SortDirection>()?),
        None => (s, SortDirection::Asc),
    };
    let key = key.trim();
    if key.is_empty() {
        return Err("Sort column cannot be empty".to_string());
    }
    Ok(SortSpec {
        key: key.to_string(),
        direction,
    })
}

/// Load rows from the source into a wizard sitting on the Upload step
pub fn load_source(wizard: &mut Wizard, source: &SourceArgs) -> Result<usize> {
    if source.demo {
        return Ok(wizard.load_demo()?);
    }

    let path = source
        .file
        .as_ref()
        .ok_or_else(|| miette::miette!("CSV file required. Usage: seoplan run sites.csv"))?;
    let parsed = load_csv(path)?;
    Ok(wizard.load(parsed.headers, parsed.rows)?)
}

/// Apply filter and sort to a wizard on the Preview step
pub fn apply_view(wizard: &mut Wizard, view: &ViewArgs) -> Result<()> {
    if let Some(query) = &view.filter {
        wizard.apply_filter(query)?;
    }

    if let Some(spec) = &view.sort {
        // Sorting toggles, so a second call lands on the other direction
        if wizard.apply_sort(&spec.key)? != spec.direction {
            wizard.apply_sort(&spec.key)?;
        }
    }
    Ok(())
}

/// Print a status line to stderr unless quiet
pub fn status(quiet: bool, message: impl std::fmt::Display) {
    if !quiet {
        eprintln!("{} {}", style("→").blue(), message);
    }
}
