//! Generate command implementation.
//!
//! Runs the full pipeline for one role: load, extract, summarize, render, and
//! deliver the document to stdout or a file.

use crate::output;
use anyhow::{Context, Result};
use roledoc_core::GenerateConfig;
use roledoc_core::cli::{DocFormat, ExitCode};
use roledoc_introspector::inspect_role;
use roledoc_render::{DocumentRenderer, RenderedDocument};
use std::path::PathBuf;
use tracing::{debug, info};

/// Runs the generate command.
///
/// The format is resolved and validated before the role is touched, so an
/// unknown format fails without reading anything.
///
/// # Arguments
///
/// * `role_path` - Root directory of the role
/// * `format` - Format name as given on the command line
/// * `output` - Destination file, or `None` for stdout
/// * `interactive` - Prompt for the format when `format` is not given
///
/// # Errors
///
/// Returns an error if the format is unsupported, the role cannot be loaded,
/// rendering fails, or the document cannot be written.
pub fn run(
    role_path: PathBuf,
    format: Option<String>,
    output: Option<PathBuf>,
    interactive: bool,
) -> Result<ExitCode> {
    let format = resolve_format(format.as_deref(), interactive)?;

    let mut config = GenerateConfig::new(role_path).with_format(format);
    if let Some(path) = output {
        config = config.with_output(path);
    }

    execute(&config)
}

/// Documents a role and delivers the result as configured.
///
/// # Errors
///
/// Returns an error if the role cannot be loaded, rendering fails, or the
/// document cannot be written.
pub fn execute(config: &GenerateConfig) -> Result<ExitCode> {
    let document = document_role(config)?;

    match &config.output {
        Some(path) => {
            output::write_document(path, document.as_str())?;
            info!(
                path = %path.display(),
                format = %document.format(),
                "documentation written"
            );
        }
        None => output::print_document(document.as_str())?,
    }

    Ok(ExitCode::SUCCESS)
}

/// Loads a role and renders its document without writing it anywhere.
///
/// # Errors
///
/// Returns [`roledoc_core::Error::NotARole`] if the role root is unusable or
/// [`roledoc_core::Error::Template`] if rendering fails. Malformed files
/// inside the role are not errors.
pub fn document_role(config: &GenerateConfig) -> roledoc_core::Result<RenderedDocument> {
    debug!(
        role = %config.role_path.display(),
        format = %config.format,
        "generating documentation"
    );

    let inspection = inspect_role(&config.role_path)?;
    let diagnostics = inspection.diagnostics().count();
    if diagnostics > 0 {
        debug!(diagnostics, "role has degraded sections");
    }

    DocumentRenderer::new()?.render_inspection(&inspection, config.format)
}

/// Resolves the output format from the command line.
///
/// An explicit format always wins. Without one, interactive mode asks the
/// user and non-interactive mode falls back to Markdown.
///
/// # Errors
///
/// Returns [`roledoc_core::Error::UnsupportedFormat`] for an unknown format
/// name, or an error if the prompt cannot be shown.
pub fn resolve_format(format: Option<&str>, interactive: bool) -> Result<DocFormat> {
    match format {
        Some(name) => Ok(name.parse()?),
        None if interactive => prompt_format(),
        None => Ok(DocFormat::default()),
    }
}

/// Asks the user to pick an output format.
///
/// # Errors
///
/// Returns an error if user input cannot be read.
fn prompt_format() -> Result<DocFormat> {
    use dialoguer::Select;

    let items: Vec<&str> = DocFormat::ALL.iter().map(DocFormat::as_str).collect();
    let selection = Select::new()
        .with_prompt("Output format")
        .items(&items)
        .default(0)
        .interact()
        .context("failed to read format selection")?;

    Ok(DocFormat::ALL[selection])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn sample_role(temp: &TempDir) -> PathBuf {
        let root = temp.path().join("msxml");
        fs::create_dir_all(root.join("defaults")).unwrap();
        fs::create_dir_all(root.join("tasks")).unwrap();
        fs::write(root.join("defaults/main.yml"), "msxml_version: '6.0'\n").unwrap();
        fs::write(
            root.join("tasks/main.yml"),
            "- name: Check MSXML\n  win_shell: echo ok\n",
        )
        .unwrap();
        root
    }

    #[test]
    fn test_resolve_format_explicit() {
        assert_eq!(resolve_format(Some("text"), false).unwrap(), DocFormat::Text);
        assert_eq!(resolve_format(Some("MD"), true).unwrap(), DocFormat::Markdown);
    }

    #[test]
    fn test_resolve_format_default_is_markdown() {
        assert_eq!(resolve_format(None, false).unwrap(), DocFormat::Markdown);
    }

    #[test]
    fn test_resolve_format_unsupported() {
        let err = resolve_format(Some("html"), false).unwrap_err();
        let core = err.downcast_ref::<roledoc_core::Error>().unwrap();
        assert!(core.is_unsupported_format());
    }

    #[test]
    fn test_document_role() {
        let temp = TempDir::new().unwrap();
        let config = GenerateConfig::new(sample_role(&temp));

        let document = document_role(&config).unwrap();

        assert!(document.as_str().contains("msxml_version: '6.0'"));
        assert!(document.as_str().contains("- Check MSXML"));
    }

    #[test]
    fn test_execute_writes_file() {
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("README.txt");
        let config = GenerateConfig::new(sample_role(&temp))
            .with_format(DocFormat::Text)
            .with_output(&output);

        let code = execute(&config).unwrap();

        assert_eq!(code, ExitCode::SUCCESS);
        let written = fs::read_to_string(&output).unwrap();
        assert!(written.starts_with("ANSIBLE ROLE: MSXML\n"));
    }

    #[test]
    fn test_unsupported_format_checked_before_loading() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("does-not-exist");
        let out = temp.path().join("README.md");

        let err = run(missing, Some("pdf".to_string()), Some(out.clone()), false).unwrap_err();

        let core = err.downcast_ref::<roledoc_core::Error>().unwrap();
        assert!(core.is_unsupported_format());
        assert!(!out.exists());
    }

    #[test]
    fn test_missing_role_is_not_a_role() {
        let temp = TempDir::new().unwrap();
        let config = GenerateConfig::new(temp.path().join("nope"));

        let err = document_role(&config).unwrap_err();
        assert!(err.is_not_a_role());
    }
}
