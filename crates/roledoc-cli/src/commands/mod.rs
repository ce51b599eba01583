//! Command implementations for the roledoc CLI.
//!
//! Each module handles one subcommand and returns the process exit code.

pub mod completions;
pub mod generate;
