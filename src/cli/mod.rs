//! CLI module - argument parsing, command dispatch and terminal rendering

pub mod args;
pub mod commands;
pub mod helpers;
pub mod table;

pub use args::{Cli, Commands, GlobalOpts};
