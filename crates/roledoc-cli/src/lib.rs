//! roledoc CLI library.
//!
//! This library provides the command implementations behind the `roledoc`
//! binary so they can be tested without spawning a process.

use roledoc_core::Error;
use roledoc_core::cli::ExitCode;

pub mod commands;
pub mod output;

/// Maps a command failure to the process exit code.
///
/// The first [`roledoc_core::Error`] in the cause chain decides the code;
/// anything else exits with [`ExitCode::ERROR`].
///
/// # Examples
///
/// ```
/// use roledoc_cli::exit_code;
/// use roledoc_core::{Error, cli::ExitCode};
///
/// let err = anyhow::Error::from(Error::UnsupportedFormat { format: "pdf".into() });
/// assert_eq!(exit_code(&err), ExitCode::INVALID_INPUT);
/// ```
#[must_use]
pub fn exit_code(err: &anyhow::Error) -> ExitCode {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<Error>())
        .map_or(ExitCode::ERROR, ExitCode::for_error)
}

/// Formats a failure as a single line.
///
/// Causes are joined with `: `. A cause whose message is already part of the
/// line is skipped, so errors that embed their source are not repeated.
#[must_use]
pub fn error_line(err: &anyhow::Error) -> String {
    let mut line = String::new();
    for cause in err.chain() {
        let message = cause.to_string();
        if line.contains(&message) {
            continue;
        }
        if !line.is_empty() {
            line.push_str(": ");
        }
        line.push_str(&message);
    }
    line.replace('\n', " ")
}
