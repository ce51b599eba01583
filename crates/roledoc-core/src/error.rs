//! Error types for roledoc.
//!
//! Fatal conditions (missing role root, unsupported format, unwritable
//! destination) abort a run. Content problems in a single YAML file are
//! reported as [`Error::MalformedMetadata`] and recovered locally by
//! converting them into a [`Diagnostic`].
//!
//! # Examples
//!
//! ```
//! use roledoc_core::{Error, Result};
//!
//! fn check_format(name: &str) -> Result<()> {
//!     if name != "markdown" {
//!         return Err(Error::UnsupportedFormat {
//!             format: name.to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//!
//! let err = check_format("html").unwrap_err();
//! assert!(err.is_unsupported_format());
//! ```

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Main error type for roledoc.
///
/// All crates in the workspace report failures through this type.
#[derive(Error, Debug)]
pub enum Error {
    /// The role root does not exist or is not a directory.
    ///
    /// Raised before any subdirectory is read.
    #[error("not a role directory: {path} ({reason})")]
    NotARole {
        /// Path that was given as the role root
        path: String,
        /// Why the path was rejected
        reason: String,
    },

    /// A metadata, defaults, vars, or task file could not be parsed.
    ///
    /// Never fatal on its own: extractors convert it into a [`Diagnostic`]
    /// and degrade the affected section.
    #[error("malformed metadata in {file}: {message}")]
    MalformedMetadata {
        /// Role-relative path of the offending file
        file: String,
        /// Parser or I/O message
        message: String,
    },

    /// The requested output format is not one of the supported formats.
    #[error("unsupported output format: '{format}' (expected: markdown or text)")]
    UnsupportedFormat {
        /// The format value as given by the caller
        format: String,
    },

    /// The rendered document could not be written to its destination.
    #[error("failed to write output file {path}: {source}")]
    OutputWrite {
        /// Destination path
        path: String,
        /// Underlying filesystem error
        #[source]
        source: std::io::Error,
    },

    /// Template registration or rendering failed.
    #[error("template error: {message}")]
    Template {
        /// Description of the template failure
        message: String,
    },
}

impl Error {
    /// Returns `true` if the role root was rejected.
    ///
    /// # Examples
    ///
    /// ```
    /// use roledoc_core::Error;
    ///
    /// let err = Error::NotARole {
    ///     path: "/missing".to_string(),
    ///     reason: "path does not exist".to_string(),
    /// };
    /// assert!(err.is_not_a_role());
    /// ```
    #[must_use]
    pub const fn is_not_a_role(&self) -> bool {
        matches!(self, Self::NotARole { .. })
    }

    /// Returns `true` if this is a malformed metadata error.
    #[must_use]
    pub const fn is_malformed_metadata(&self) -> bool {
        matches!(self, Self::MalformedMetadata { .. })
    }

    /// Returns `true` if the output format was rejected.
    ///
    /// # Examples
    ///
    /// ```
    /// use roledoc_core::Error;
    ///
    /// let err = Error::UnsupportedFormat {
    ///     format: "html".to_string(),
    /// };
    /// assert!(err.is_unsupported_format());
    /// assert!(!err.is_not_a_role());
    /// ```
    #[must_use]
    pub const fn is_unsupported_format(&self) -> bool {
        matches!(self, Self::UnsupportedFormat { .. })
    }

    /// Returns `true` if writing the output file failed.
    #[must_use]
    pub const fn is_output_write(&self) -> bool {
        matches!(self, Self::OutputWrite { .. })
    }

    /// Returns `true` if this is a template error.
    #[must_use]
    pub const fn is_template_error(&self) -> bool {
        matches!(self, Self::Template { .. })
    }

    /// Converts a malformed metadata error into a recoverable [`Diagnostic`].
    ///
    /// Every other variant is fatal and yields `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use roledoc_core::Error;
    ///
    /// let err = Error::MalformedMetadata {
    ///     file: "meta/main.yml".to_string(),
    ///     message: "invalid indentation".to_string(),
    /// };
    /// let diagnostic = err.into_diagnostic().unwrap();
    /// assert_eq!(diagnostic.file, "meta/main.yml");
    /// ```
    #[must_use]
    pub fn into_diagnostic(self) -> Option<Diagnostic> {
        match self {
            Self::MalformedMetadata { file, message } => Some(Diagnostic { file, message }),
            _ => None,
        }
    }
}

/// A non-fatal problem with one role source file.
///
/// Diagnostics are collected while extracting a role so the renderer can mark
/// the affected section as unavailable instead of dropping it silently.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Diagnostic {
    /// Role-relative path of the file the problem belongs to
    pub file: String,
    /// Human-readable description
    pub message: String,
}

impl Diagnostic {
    /// Creates a new diagnostic.
    #[must_use]
    pub fn new(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.file, self.message)
    }
}

/// Result type alias for roledoc operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_a_role_detection() {
        let err = Error::NotARole {
            path: "/tmp/nope".to_string(),
            reason: "path does not exist".to_string(),
        };
        assert!(err.is_not_a_role());
        assert!(!err.is_unsupported_format());
        assert!(!err.is_output_write());
    }

    #[test]
    fn test_output_write_keeps_source() {
        use std::error::Error as _;

        let err = Error::OutputWrite {
            path: "/readonly/README.md".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.is_output_write());
        assert!(err.source().is_some());
        assert!(err.to_string().contains("denied"));
    }

    #[test]
    fn test_error_display() {
        let err = Error::UnsupportedFormat {
            format: "html".to_string(),
        };
        let display = format!("{err}");
        assert!(display.contains("unsupported output format"));
        assert!(display.contains("html"));
    }

    #[test]
    fn test_into_diagnostic() {
        let err = Error::MalformedMetadata {
            file: "defaults/main.yml".to_string(),
            message: "did not find expected key".to_string(),
        };
        assert!(err.is_malformed_metadata());

        let diagnostic = err.into_diagnostic().unwrap();
        assert_eq!(diagnostic.to_string(), "defaults/main.yml: did not find expected key");
    }

    #[test]
    fn test_fatal_errors_have_no_diagnostic() {
        let err = Error::Template {
            message: "unclosed block".to_string(),
        };
        assert!(err.is_template_error());
        assert!(err.into_diagnostic().is_none());
    }

    #[test]
    fn test_result_alias() {
        #[allow(clippy::unnecessary_wraps)]
        fn returns_ok() -> Result<i32> {
            Ok(42)
        }

        fn returns_err() -> Result<i32> {
            Err(Error::UnsupportedFormat {
                format: "pdf".to_string(),
            })
        }

        assert_eq!(returns_ok().unwrap(), 42);
        assert!(returns_err().is_err());
    }
}
