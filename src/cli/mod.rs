//! Command-line interface for resttest.
//!
//! - `args`: CLI argument definitions (clap derive)
//! - `run`: entry point and command dispatch
//! - `commands`: command implementations

pub mod args;
mod commands;
mod run;

pub use args::{Cli, Commands};
pub use run::run;
