//! `seoplan preview` command - Show the filtered and sorted rows

use console::style;
use miette::Result;

use crate::cli::commands::utils::{apply_view, load_source, SourceArgs, ViewArgs};
use crate::cli::helpers::selection_summary;
use crate::cli::table::{preview_table, TableConfig};
use crate::cli::GlobalOpts;
use crate::core::wizard::Wizard;

#[derive(clap::Args, Debug)]
pub struct PreviewArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub view: ViewArgs,

    /// Show every column of the file instead of url/keywords/geo
    #[arg(long)]
    pub all_columns: bool,

    /// Maximum characters per cell
    #[arg(long, default_value = "40")]
    pub width: usize,
}

pub fn run(args: PreviewArgs, global: &GlobalOpts) -> Result<()> {
    let mut wizard = Wizard::new();
    let loaded = load_source(&mut wizard, &args.source)?;
    wizard.advance()?;
    apply_view(&mut wizard, &args.view)?;

    let config = TableConfig {
        max_width: args.width,
        all_columns: args.all_columns,
    };
    println!("{}", preview_table(&wizard, &config));

    if !global.quiet {
        let store = wizard.store();
        println!(
            "{}",
            style(selection_summary(wizard.selected_count(), store.len())).dim()
        );
        if store.len() != loaded {
            println!(
                "{}",
                style(format!("{} of {} rows match the filter", store.len(), loaded)).dim()
            );
        }
    }

    Ok(())
}
