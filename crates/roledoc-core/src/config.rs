//! Generation settings for a single roledoc run.
//!
//! # Examples
//!
//! ```
//! use roledoc_core::{GenerateConfig, cli::DocFormat};
//!
//! let config = GenerateConfig::new("roles/msxml")
//!     .with_format(DocFormat::Text)
//!     .with_output("README.txt");
//!
//! assert_eq!(config.format, DocFormat::Text);
//! assert!(config.writes_to_file());
//! ```

use crate::cli::DocFormat;
use std::path::PathBuf;

/// Settings for documenting one role.
///
/// Built by the command-line driver from parsed arguments. The renderer only
/// ever sees the resolved [`DocFormat`], never raw user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateConfig {
    /// Root directory of the role to document.
    pub role_path: PathBuf,

    /// Output format.
    ///
    /// Default: [`DocFormat::Markdown`]
    pub format: DocFormat,

    /// Destination file.
    ///
    /// `None` prints the document to standard output.
    /// Default: None
    pub output: Option<PathBuf>,
}

impl GenerateConfig {
    /// Creates a configuration for the given role with default settings.
    #[must_use]
    pub fn new(role_path: impl Into<PathBuf>) -> Self {
        Self {
            role_path: role_path.into(),
            format: DocFormat::default(),
            output: None,
        }
    }

    /// Sets the output format.
    #[must_use]
    pub const fn with_format(mut self, format: DocFormat) -> Self {
        self.format = format;
        self
    }

    /// Sets the destination file.
    #[must_use]
    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = Some(output.into());
        self
    }

    /// Returns `true` when the document goes to a file rather than stdout.
    #[must_use]
    pub const fn writes_to_file(&self) -> bool {
        self.output.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GenerateConfig::new("roles/common");
        assert_eq!(config.role_path, PathBuf::from("roles/common"));
        assert_eq!(config.format, DocFormat::Markdown);
        assert!(config.output.is_none());
        assert!(!config.writes_to_file());
    }

    #[test]
    fn test_builder_methods() {
        let config = GenerateConfig::new("roles/common")
            .with_format(DocFormat::Text)
            .with_output("/tmp/common.txt");

        assert_eq!(config.format, DocFormat::Text);
        assert_eq!(config.output, Some(PathBuf::from("/tmp/common.txt")));
    }
}
