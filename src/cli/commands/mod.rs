//! CLI command implementations

pub mod utils;

pub mod completions;
pub mod preview;
pub mod run;
pub mod template;
pub mod wizard;
