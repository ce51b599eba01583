//! CLI-facing types shared by the renderer and the command-line driver.
//!
//! # Examples
//!
//! ```
//! use roledoc_core::cli::{DocFormat, ExitCode};
//!
//! let format: DocFormat = "text".parse().unwrap();
//! assert_eq!(format, DocFormat::Text);
//!
//! let code = ExitCode::SUCCESS;
//! assert_eq!(code.as_i32(), 0);
//! ```

use crate::Error;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Output format of a rendered role document.
///
/// Parsing is case-insensitive and accepts the short aliases `md` and `txt`.
/// Anything else is rejected with [`Error::UnsupportedFormat`].
///
/// # Examples
///
/// ```
/// use roledoc_core::cli::DocFormat;
///
/// assert_eq!("Markdown".parse::<DocFormat>().unwrap(), DocFormat::Markdown);
/// assert_eq!("txt".parse::<DocFormat>().unwrap(), DocFormat::Text);
/// assert!("html".parse::<DocFormat>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DocFormat {
    /// Headers, bullet lists, and fenced code blocks
    #[default]
    Markdown,
    /// Indentation and underline rules only
    Text,
}

impl DocFormat {
    /// All supported formats, in prompt order.
    pub const ALL: [Self; 2] = [Self::Markdown, Self::Text];

    /// Returns the canonical name of the format.
    ///
    /// # Examples
    ///
    /// ```
    /// use roledoc_core::cli::DocFormat;
    ///
    /// assert_eq!(DocFormat::Markdown.as_str(), "markdown");
    /// assert_eq!(DocFormat::Text.as_str(), "text");
    /// ```
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Markdown => "markdown",
            Self::Text => "text",
        }
    }

    /// Conventional file extension for documents in this format.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Markdown => "md",
            Self::Text => "txt",
        }
    }
}

impl fmt::Display for DocFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "markdown" | "md" => Ok(Self::Markdown),
            "text" | "txt" => Ok(Self::Text),
            _ => Err(Error::UnsupportedFormat {
                format: s.to_string(),
            }),
        }
    }
}

/// CLI exit code with semantic meaning.
///
/// # Examples
///
/// ```
/// use roledoc_core::cli::ExitCode;
///
/// assert!(ExitCode::SUCCESS.is_success());
/// assert!(!ExitCode::INVALID_INPUT.is_success());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExitCode(i32);

impl ExitCode {
    /// Successful execution (exit code 0).
    pub const SUCCESS: Self = Self(0);

    /// General error (exit code 1).
    pub const ERROR: Self = Self(1);

    /// Invalid role path or format (exit code 2).
    pub const INVALID_INPUT: Self = Self(2);

    /// Output could not be written (exit code 3).
    pub const IO_ERROR: Self = Self(3);

    /// Creates an exit code from an integer value.
    #[must_use]
    pub const fn from_i32(code: i32) -> Self {
        Self(code)
    }

    /// Returns the exit code as an integer.
    #[must_use]
    pub const fn as_i32(&self) -> i32 {
        self.0
    }

    /// Checks if the exit code represents success.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.0 == 0
    }

    /// Maps a fatal error to the exit code reported to the shell.
    ///
    /// # Examples
    ///
    /// ```
    /// use roledoc_core::{Error, cli::ExitCode};
    ///
    /// let err = Error::UnsupportedFormat { format: "pdf".to_string() };
    /// assert_eq!(ExitCode::for_error(&err), ExitCode::INVALID_INPUT);
    /// ```
    #[must_use]
    pub const fn for_error(error: &Error) -> Self {
        match error {
            Error::NotARole { .. } | Error::UnsupportedFormat { .. } => Self::INVALID_INPUT,
            Error::OutputWrite { .. } => Self::IO_ERROR,
            Error::MalformedMetadata { .. } | Error::Template { .. } => Self::ERROR,
        }
    }
}

impl Default for ExitCode {
    fn default() -> Self {
        Self::SUCCESS
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code.0
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
