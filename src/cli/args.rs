//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand};

use crate::cli::commands::{
    completions::CompletionsArgs, preview::PreviewArgs, run::RunArgs, template::TemplateArgs,
    wizard::WizardArgs,
};

#[derive(Parser)]
#[command(name = "seoplan")]
#[command(author, version, about = "SEO strategy planner for website lists")]
#[command(long_about = "Load a CSV of website records, filter and select rows, generate a placeholder SEO strategy per site, and export it as JSON, CSV or Markdown.")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output (debug logging on stderr)
    #[arg(long, short = 'v', global = true, conflicts_with = "quiet")]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the rows of a CSV (or the demo data) after filtering and sorting
    Preview(PreviewArgs),

    /// Run every wizard step non-interactively and export the result
    Run(RunArgs),

    /// Interactive four-step wizard: upload, preview, process, export
    Wizard(WizardArgs),

    /// Print a CSV template with the expected columns
    Template(TemplateArgs),

    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}
