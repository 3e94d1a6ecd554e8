//! seoplan: SEO strategy planner
//!
//! Loads website records from CSV, lets the user filter, sort and select
//! them, generates a placeholder SEO strategy per site (page architecture,
//! internal links, content outlines, keyword sets) and exports the result
//! as JSON, CSV or Markdown.

pub mod cli;
pub mod core;
