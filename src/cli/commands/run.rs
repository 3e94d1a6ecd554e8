//! `seoplan run` command - Drive the whole wizard without prompts
//!
//! Loads rows, applies filter/sort/selection, generates strategies and
//! writes the export to stdout or a file. Progress goes to stderr so the
//! export can be piped.

use console::style;
use miette::Result;
use std::path::PathBuf;
use std::time::Duration;

use crate::cli::commands::utils::{apply_view, load_source, status, SourceArgs, ViewArgs};
use crate::cli::GlobalOpts;
use crate::core::export::{self, ExportFormat};
use crate::core::generator::StubGenerator;
use crate::core::wizard::Wizard;
use crate::core::Config;

#[derive(clap::Args, Debug)]
pub struct RunArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub view: ViewArgs,

    /// Process only these rows (1-based positions in the filtered view, comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub rows: Option<Vec<usize>>,

    /// Export format: json, csv, md (default from config, else json)
    #[arg(long, short = 'F', value_parser = parse_export_format)]
    pub format: Option<ExportFormat>,

    /// Write the export to a file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Seed for reproducible business types and word counts
    #[arg(long)]
    pub seed: Option<u64>,

    /// Pause before generating, in milliseconds
    #[arg(long)]
    pub latency_ms: Option<u64>,
}

pub(crate) fn parse_export_format(s: &str) -> std::result::Result<ExportFormat, String> {
    s.parse()
}

pub fn run(args: RunArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let latency = args
        .latency_ms
        .map(Duration::from_millis)
        .unwrap_or_else(|| config.latency());
    let format = args.format.unwrap_or_else(|| config.export_format());

    let mut wizard = Wizard::with_latency(latency);

    // Upload
    let loaded = load_source(&mut wizard, &args.source)?;
    status(global.quiet, format!("Loaded {} row(s)", style(loaded).cyan()));
    wizard.advance()?;

    // Preview
    apply_view(&mut wizard, &args.view)?;
    if let Some(rows) = &args.rows {
        let visible = wizard.store().len();
        let mut positions = Vec::with_capacity(rows.len());
        for &row in rows {
            if row == 0 || row > visible {
                return Err(miette::miette!(
                    help = "Row numbers are 1-based positions in the filtered view",
                    "Row {} is out of range (1-{})",
                    row,
                    visible
                ));
            }
            positions.push(row - 1);
        }
        wizard.set_selection(positions)?;
    }
    status(
        global.quiet,
        format!(
            "{} of {} row(s) selected",
            style(wizard.selected_count()).cyan(),
            wizard.store().len()
        ),
    );
    wizard.advance()?;

    // Process
    let seed = args.seed.or(config.seed);
    let results = match seed {
        Some(seed) => wizard.process(&mut StubGenerator::seeded(seed))?,
        None => wizard.process(&mut StubGenerator::from_os_rng())?,
    };
    status(
        global.quiet,
        format!("Generated strategies for {} site(s)", style(results.len()).cyan()),
    );
    wizard.advance()?;

    // Export
    let results = wizard.results().unwrap_or_default();
    let stats = wizard.export_stats();
    status(
        global.quiet,
        format!(
            "{} site(s), {} page(s), {} content outline(s)",
            stats.sites, stats.pages, stats.outlines
        ),
    );

    match &args.output {
        Some(path) => {
            if export::write_export(results, format, path)? {
                status(global.quiet, format!("Export written to: {}", path.display()));
            } else {
                eprintln!("{} No content outlines to export", style("!").yellow());
            }
        }
        None => match export::render(results, format)? {
            Some(content) => print!("{}", content),
            None => eprintln!("{} No content outlines to export", style("!").yellow()),
        },
    }

    Ok(())
}
