//! `seoplan wizard` command - Interactive four-step wizard
//!
//! Each step shows its surface and a menu built from the actions the
//! [`Wizard`] currently allows; actions whose guard fails are simply not
//! offered.

use console::style;
use dialoguer::{theme::ColorfulTheme, Input, MultiSelect, Select};
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;
use std::time::Duration;

use crate::cli::commands::utils::SourceArgs;
use crate::cli::helpers::selection_summary;
use crate::cli::table::{links_table, outlines_table, pages_table, preview_table, results_table, TableConfig};
use crate::cli::GlobalOpts;
use crate::core::export::{self, ExportFormat};
use crate::core::generator::{RandomSource, StubGenerator};
use crate::core::input::load_csv;
use crate::core::row::KNOWN_COLUMNS;
use crate::core::wizard::{Wizard, WizardStep};
use crate::core::Config;

#[derive(clap::Args, Debug)]
pub struct WizardArgs {
    /// CSV file to load before the first prompt
    pub file: Option<PathBuf>,

    /// Start with the built-in demo records loaded
    #[arg(long, conflicts_with = "file")]
    pub demo: bool,

    /// Seed for reproducible business types and word counts
    #[arg(long)]
    pub seed: Option<u64>,

    /// Pause before generating, in milliseconds
    #[arg(long)]
    pub latency_ms: Option<u64>,
}

/// Menu entries; which ones appear depends on the step and its guards
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    LoadFile,
    LoadDemo,
    Filter,
    Sort,
    ChooseRows,
    SelectAll,
    SelectNone,
    Generate,
    ViewDetails,
    Download(ExportFormat),
    Next,
    Back,
    StartOver,
    Quit,
}

impl Action {
    fn label(&self) -> String {
        match self {
            Action::LoadFile => "Load a CSV file".to_string(),
            Action::LoadDemo => "Load demo data".to_string(),
            Action::Filter => "Filter rows".to_string(),
            Action::Sort => "Sort by column".to_string(),
            Action::ChooseRows => "Choose rows".to_string(),
            Action::SelectAll => "Select all".to_string(),
            Action::SelectNone => "Select none".to_string(),
            Action::Generate => "Generate SEO strategy".to_string(),
            Action::ViewDetails => "View details".to_string(),
            Action::Download(format) => format!("Download {}", format_label(*format)),
            Action::Next => "Continue →".to_string(),
            Action::Back => "← Back".to_string(),
            Action::StartOver => "Start over".to_string(),
            Action::Quit => "Quit".to_string(),
        }
    }
}

fn format_label(format: ExportFormat) -> &'static str {
    match format {
        ExportFormat::Json => "JSON",
        ExportFormat::Csv => "CSV",
        ExportFormat::Markdown => "Markdown",
    }
}

struct Session<S> {
    wizard: Wizard,
    generator: StubGenerator<S>,
    config: Config,
    theme: ColorfulTheme,
    table: TableConfig,
}

pub fn run(args: WizardArgs, _global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let latency = args
        .latency_ms
        .map(Duration::from_millis)
        .unwrap_or_else(|| config.latency());

    let mut wizard = Wizard::with_latency(latency);
    if args.demo || args.file.is_some() {
        let source = SourceArgs {
            file: args.file.clone(),
            demo: args.demo,
        };
        crate::cli::commands::utils::load_source(&mut wizard, &source)?;
    }

    match args.seed.or(config.seed) {
        Some(seed) => Session::new(wizard, StubGenerator::seeded(seed), config).run(),
        None => Session::new(wizard, StubGenerator::from_os_rng(), config).run(),
    }
}

impl<S: RandomSource> Session<S> {
    fn new(wizard: Wizard, generator: StubGenerator<S>, config: Config) -> Self {
        Self {
            wizard,
            generator,
            config,
            theme: ColorfulTheme::default(),
            table: TableConfig::default(),
        }
    }

    fn run(mut self) -> Result<()> {
        loop {
            self.show_step();
            let actions = self.actions();
            let labels: Vec<String> = actions.iter().map(Action::label).collect();

            let choice = Select::with_theme(&self.theme)
                .with_prompt("What next?")
                .items(&labels)
                .default(0)
                .interact()
                .into_diagnostic()?;

            if actions[choice] == Action::Quit {
                println!("{}", style("Bye.").dim());
                return Ok(());
            }
            self.perform(actions[choice])?;
        }
    }

    fn show_step(&self) {
        let step = self.wizard.step();
        let progress: Vec<String> = WizardStep::all()
            .iter()
            .map(|s| {
                if *s == step {
                    style(format!("[{}]", s)).cyan().bold().to_string()
                } else if s.index() < step.index() {
                    style(s.to_string()).green().to_string()
                } else {
                    style(s.to_string()).dim().to_string()
                }
            })
            .collect();

        let arrow = style(" → ").dim().to_string();
        println!();
        println!("{}", progress.join(arrow.as_str()));
        println!("{}", style("─".repeat(50)).dim());

        let store = self.wizard.store();
        match step {
            WizardStep::Upload => {
                if store.total() > 0 {
                    println!("{} {} row(s) loaded", style("✓").green(), style(store.total()).cyan());
                } else {
                    println!("Load a CSV with columns: {}", KNOWN_COLUMNS.join(", "));
                }
            }
            WizardStep::Preview => {
                println!("{}", preview_table(&self.wizard, &self.table));
                if !store.filter().is_empty() {
                    println!("Filter: {}", style(store.filter()).yellow());
                }
                println!("{}", style(selection_summary(self.wizard.selected_count(), store.len())).dim());
            }
            WizardStep::Process => match self.wizard.results() {
                None => println!(
                    "Ready to process {} site(s)",
                    style(self.wizard.to_process().len()).cyan()
                ),
                Some(results) => {
                    println!("{} Processed {} site(s)", style("✓").green(), results.len());
                    println!("{}", results_table(results));
                }
            },
            WizardStep::Export => {
                let stats = self.wizard.export_stats();
                println!("  Websites:         {}", style(stats.sites).cyan());
                println!("  Pages planned:    {}", style(stats.pages).cyan());
                println!("  Content outlines: {}", style(stats.outlines).cyan());
            }
        }
        println!();
    }

    fn actions(&self) -> Vec<Action> {
        let can_advance = self.wizard.can_advance().is_ok();
        let mut actions = Vec::new();

        match self.wizard.step() {
            WizardStep::Upload => {
                actions.extend([Action::LoadFile, Action::LoadDemo]);
                if can_advance {
                    actions.insert(0, Action::Next);
                }
            }
            WizardStep::Preview => {
                if can_advance {
                    actions.push(Action::Next);
                }
                actions.extend([Action::Filter, Action::Sort]);
                if !self.wizard.store().is_empty() {
                    actions.extend([Action::ChooseRows, Action::SelectAll, Action::SelectNone]);
                }
                actions.extend([Action::LoadFile, Action::Back]);
            }
            WizardStep::Process => {
                if self.wizard.results().is_none() {
                    actions.push(Action::Generate);
                } else {
                    if can_advance {
                        actions.push(Action::Next);
                    }
                    actions.extend([Action::ViewDetails, Action::Generate]);
                }
                actions.push(Action::Back);
            }
            WizardStep::Export => {
                actions.extend(ExportFormat::all().iter().map(|f| Action::Download(*f)));
                actions.extend([Action::Back, Action::StartOver]);
            }
        }

        actions.push(Action::Quit);
        actions
    }

    fn perform(&mut self, action: Action) -> Result<()> {
        match action {
            Action::LoadFile => self.load_file()?,
            Action::LoadDemo => {
                let count = self.wizard.load_demo()?;
                println!("{} Loaded {} demo row(s)", style("✓").green(), count);
            }
            Action::Filter => {
                let query: String = Input::with_theme(&self.theme)
                    .with_prompt("Filter (url, keywords, geo; empty clears)")
                    .with_initial_text(self.wizard.store().filter())
                    .allow_empty(true)
                    .interact_text()
                    .into_diagnostic()?;
                self.wizard.apply_filter(query.trim())?;
            }
            Action::Sort => self.sort()?,
            Action::ChooseRows => self.choose_rows()?,
            Action::SelectAll => self.wizard.select_all()?,
            Action::SelectNone => self.wizard.select_none()?,
            Action::Generate => {
                if !self.wizard.latency().is_zero() {
                    println!("{}", style("Generating...").dim());
                }
                self.wizard.process(&mut self.generator)?;
            }
            Action::ViewDetails => self.view_details()?,
            Action::Download(format) => self.download(format)?,
            Action::Next => {
                self.wizard.advance()?;
            }
            Action::Back => {
                self.wizard.back()?;
            }
            Action::StartOver => self.wizard.start_over()?,
            Action::Quit => {}
        }
        Ok(())
    }

    fn load_file(&mut self) -> Result<()> {
        let path: String = Input::with_theme(&self.theme)
            .with_prompt("Path to CSV file")
            .interact_text()
            .into_diagnostic()?;

        // A bad file is reported and leaves the loaded rows as they were
        match load_csv(PathBuf::from(path.trim()).as_path()) {
            Ok(parsed) => {
                let count = self.wizard.load(parsed.headers, parsed.rows)?;
                println!("{} Loaded {} row(s)", style("✓").green(), count);
            }
            Err(e) => {
                tracing::debug!(error = %e, "csv load failed");
                println!("{} {}", style("✗").red(), e);
            }
        }
        Ok(())
    }

    fn sort(&mut self) -> Result<()> {
        let mut columns: Vec<String> = self.wizard.store().headers().to_vec();
        if columns.is_empty() {
            columns = KNOWN_COLUMNS.iter().map(|c| c.to_string()).collect();
        }

        let choice = Select::with_theme(&self.theme)
            .with_prompt("Sort by (choosing the same column again reverses it)")
            .items(&columns)
            .default(0)
            .interact()
            .into_diagnostic()?;

        let direction = self.wizard.apply_sort(&columns[choice])?;
        println!("Sorted by {} ({})", style(&columns[choice]).cyan(), direction);
        Ok(())
    }

    fn choose_rows(&mut self) -> Result<()> {
        let store = self.wizard.store();
        let items: Vec<String> = store.rows().map(|row| row.to_string()).collect();
        let defaults: Vec<bool> = (0..items.len()).map(|i| self.wizard.is_selected(i)).collect();

        let chosen = MultiSelect::with_theme(&self.theme)
            .with_prompt("Rows to process (space toggles, enter confirms)")
            .items(&items)
            .defaults(&defaults)
            .interact()
            .into_diagnostic()?;

        self.wizard.set_selection(chosen)?;
        Ok(())
    }

    fn view_details(&self) -> Result<()> {
        let Some(results) = self.wizard.results() else {
            return Ok(());
        };
        let sites: Vec<String> = results
            .iter()
            .map(|r| format!("{} ({})", r.url.as_deref().unwrap_or("(no url)"), r.business_type))
            .collect();

        let choice = Select::with_theme(&self.theme)
            .with_prompt("Which site?")
            .items(&sites)
            .default(0)
            .interact()
            .into_diagnostic()?;
        let result = &results[choice];

        println!();
        println!("{}", style("Pages & Keywords").bold());
        println!("{}", pages_table(result));
        println!("{}", style("Content Outlines").bold());
        println!("{}", outlines_table(result));
        println!("{}", style("Internal Links").bold());
        println!("{}", links_table(result));
        Ok(())
    }

    fn download(&self, format: ExportFormat) -> Result<()> {
        let results = self.wizard.results().unwrap_or_default();
        let default_path = self.config.output_path(format);

        let path: String = Input::with_theme(&self.theme)
            .with_prompt(format!("Save {} to", format_label(format)))
            .default(default_path.display().to_string())
            .interact_text()
            .into_diagnostic()?;
        let path = PathBuf::from(path.trim());

        if export::write_export(results, format, &path)? {
            println!("{} Saved {}", style("✓").green(), style(path.display()).yellow());
        } else {
            println!("{} No content outlines to export", style("!").yellow());
        }
        Ok(())
    }
}
