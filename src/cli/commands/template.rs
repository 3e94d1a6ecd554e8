//! `seoplan template` command - Print a starter CSV

use console::style;
use miette::Result;

use crate::core::demo::{demo_headers, demo_rows};
use crate::core::export::escape_csv;

#[derive(clap::Args, Debug)]
pub struct TemplateArgs {}

pub fn run(_args: TemplateArgs) -> Result<()> {
    let headers = demo_headers();
    println!("{}", headers.join(","));

    if let Some(example) = demo_rows().first() {
        let values: Vec<String> = headers.iter().map(|h| escape_csv(example.get(h))).collect();
        println!("{}", values.join(","));
    }

    eprintln!(
        "{} Save as sites.csv, then run: {}",
        style("→").blue(),
        style("seoplan run sites.csv -F md").yellow()
    );
    Ok(())
}
