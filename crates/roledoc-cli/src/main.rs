//! roledoc: documentation generator for Ansible roles.
//!
//! Reads a role directory and produces a Markdown or plain-text document
//! describing its metadata, default variables, tasks, and layout.
//!
//! # Architecture
//!
//! The CLI is organized around subcommands:
//! - `generate` - Document a role
//! - `completions` - Generate shell completions
//!
//! # Examples
//!
//! ```bash
//! # Print Markdown documentation
//! roledoc generate roles/msxml
//!
//! # Write plain text to a file
//! roledoc generate roles/msxml --format text --output README.txt
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use colored::Colorize;
use roledoc_cli::commands;
use roledoc_core::cli::ExitCode;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// roledoc - Documentation generator for Ansible roles.
///
/// Loads a role, extracts its metadata and task names, and renders a single
/// document in Markdown or plain text.
#[derive(Parser, Debug)]
#[command(name = "roledoc")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Log output format
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,
}

/// Format of log lines written to stderr.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate documentation for a role.
    ///
    /// Reads the role's defaults, metadata, tasks, and directory layout and
    /// renders them as one document. Malformed files inside the role are
    /// reported as warnings and their sections read "(unavailable)".
    ///
    /// # Examples
    ///
    /// ```bash
    /// # Markdown to stdout
    /// roledoc generate roles/msxml
    ///
    /// # Plain text to a file
    /// roledoc generate roles/msxml --format text --output README.txt
    ///
    /// # Choose the format from a menu
    /// roledoc generate roles/msxml --interactive
    /// ```
    Generate {
        /// Root directory of the role
        role_path: PathBuf,

        /// Output format: markdown (md) or text (txt)
        ///
        /// Defaults to markdown.
        #[arg(short, long)]
        format: Option<String>,

        /// Write the document to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Prompt for the output format when --format is not given
        #[arg(short, long)]
        interactive: bool,
    },

    /// Generate shell completions.
    ///
    /// Generates completion scripts for various shells that can be
    /// sourced or saved to enable tab completion for this CLI.
    Completions {
        /// Target shell for completion generation
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    let cli = Cli::parse();

    if !io::stderr().is_terminal() {
        colored::control::set_override(false);
    }

    let exit_code = match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{} {}", "error:".red().bold(), roledoc_cli::error_line(&err));
            roledoc_cli::exit_code(&err)
        }
    };

    std::process::exit(exit_code.as_i32());
}

fn run(cli: Cli) -> Result<ExitCode> {
    init_logging(cli.verbose, cli.quiet, cli.log_format)?;
    execute_command(cli.command)
}

/// Initializes logging infrastructure.
///
/// The level comes from the flags only: `warn` by default, `debug` with
/// `--verbose`, `error` with `--quiet`. Logs always go to stderr.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
fn init_logging(verbose: bool, quiet: bool, format: LogFormat) -> Result<()> {
    let level = if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    };
    let registry = tracing_subscriber::registry().with(EnvFilter::new(level));

    match format {
        LogFormat::Text => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(io::stderr().is_terminal())
                    .with_writer(io::stderr),
            )
            .try_init()?,
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(io::stderr),
            )
            .try_init()?,
    }

    Ok(())
}

/// Executes the specified CLI command.
///
/// Routes commands to their respective handlers and returns an exit code.
///
/// # Errors
///
/// Returns an error if command execution fails.
fn execute_command(command: Commands) -> Result<ExitCode> {
    match command {
        Commands::Generate {
            role_path,
            format,
            output,
            interactive,
        } => commands::generate::run(role_path, format, output, interactive),
        Commands::Completions { shell } => {
            use clap::CommandFactory;
            let mut cmd = Cli::command();
            Ok(commands::completions::run(shell, &mut cmd))
        }
    }
}
