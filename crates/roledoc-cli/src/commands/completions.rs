//! Shell completion generation command.
//!
//! Generates shell completion scripts for bash, zsh, fish, and `PowerShell`.

use clap::Command;
use clap_complete::{Shell, generate};
use roledoc_core::cli::ExitCode;
use std::io;
use tracing::debug;

/// Generates shell completion script for the specified shell.
///
/// Prints the completion script to stdout, which can be sourced or saved
/// to the appropriate location for the shell.
///
/// # Examples
///
/// ```no_run
/// use clap::Command;
/// use clap_complete::Shell;
/// use roledoc_cli::commands::completions;
///
/// let mut cmd = Command::new("roledoc");
/// completions::generate_completions(Shell::Bash, &mut cmd);
/// ```
pub fn generate_completions(shell: Shell, cmd: &mut Command) {
    generate_completions_to(shell, cmd, &mut io::stdout());
}

/// Generates the completion script into any writer.
pub fn generate_completions_to(shell: Shell, cmd: &mut Command, out: &mut dyn io::Write) {
    debug!("generating {shell} completions");
    let name = cmd.get_name().to_string();
    generate(shell, cmd, name, out);
}

/// Runs the completions command.
pub fn run(shell: Shell, cmd: &mut Command) -> ExitCode {
    generate_completions(shell, cmd);
    ExitCode::SUCCESS
}
