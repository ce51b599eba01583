//! Reading role YAML files into opaque values.
//!
//! Every data file of a role (defaults, vars, meta, tasks, handlers) goes
//! through [`read_yaml`]. Any failure is reported as
//! [`Error::MalformedMetadata`] so callers can degrade the affected section
//! instead of aborting the run.

use roledoc_core::{Diagnostic, Error, Result};
use serde::Serialize;
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Maximum data file size to read in bytes (1MB).
pub const MAX_FILE_SIZE: u64 = 1024 * 1024;

/// Load state of a single source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceState {
    /// The file does not exist in the role.
    #[default]
    Missing,
    /// The file was read and parsed.
    Loaded,
    /// The file exists but could not be read or parsed.
    Malformed,
}

impl SourceState {
    /// Returns `true` if the file existed but could not be used.
    #[must_use]
    pub const fn is_malformed(self) -> bool {
        matches!(self, Self::Malformed)
    }
}

/// Reads and parses one YAML file of the role.
///
/// `relative` is the role-relative path used in error messages. A file that
/// holds no document (blank, comments, or a bare `---`) yields `Value::Null`.
///
/// # Errors
///
/// Returns [`Error::MalformedMetadata`] if the file cannot be read, exceeds
/// [`MAX_FILE_SIZE`], or is not valid YAML.
pub(crate) fn read_yaml(path: &Path, relative: &str) -> Result<Value> {
    let metadata = fs::metadata(path).map_err(|e| malformed(relative, format!("failed to read: {e}")))?;
    if metadata.len() > MAX_FILE_SIZE {
        return Err(malformed(
            relative,
            format!(
                "file too large ({} bytes exceeds {MAX_FILE_SIZE} limit)",
                metadata.len()
            ),
        ));
    }

    let content =
        fs::read_to_string(path).map_err(|e| malformed(relative, format!("failed to read: {e}")))?;

    if !has_document(&content) {
        debug!(file = relative, "empty YAML document");
        return Ok(Value::Null);
    }

    serde_yaml::from_str(&content).map_err(|e| malformed(relative, e.to_string()))
}

/// Builds a malformed metadata error for `relative`.
pub(crate) fn malformed(relative: &str, message: impl Into<String>) -> Error {
    Error::MalformedMetadata {
        file: relative.to_string(),
        message: message.into(),
    }
}

/// Records a recoverable error as a diagnostic.
///
/// Fatal errors never reach this point; they are dropped from the record but
/// still logged.
pub(crate) fn record(error: Error, diagnostics: &mut Vec<Diagnostic>) {
    match error.into_diagnostic() {
        Some(diagnostic) => {
            warn!(file = %diagnostic.file, "{}", diagnostic.message);
            diagnostics.push(diagnostic);
        }
        None => warn!("unexpected error while reading role data"),
    }
}

fn has_document(content: &str) -> bool {
    content.lines().map(str::trim).any(|line| {
        !line.is_empty() && !line.starts_with('#') && line != "---" && line != "..."
    })
}

/// Renders a scalar for display; `None` for null, sequences, and mappings.
pub(crate) fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        Value::Tagged(tagged) => scalar_string(&tagged.value),
        Value::Null | Value::Sequence(_) | Value::Mapping(_) => None,
    }
}

/// Renders any value on a single line.
///
/// Sequences are joined with `, ` and mappings become `key: value` pairs.
pub(crate) fn inline_string(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Sequence(items) => items.iter().map(inline_string).collect::<Vec<_>>().join(", "),
        Value::Mapping(map) => map
            .iter()
            .map(|(k, v)| format!("{}: {}", inline_string(k), inline_string(v)))
            .collect::<Vec<_>>()
            .join(", "),
        other => scalar_string(other).unwrap_or_default(),
    }
}

/// Serializes a value back to YAML text without the trailing newline.
pub(crate) fn to_yaml(relative: &str, value: &Value) -> Result<String> {
    serde_yaml::to_string(value)
        .map(|text| text.trim_end().to_string())
        .map_err(|e| malformed(relative, e.to_string()))
}

/// Looks up a string key in a mapping.
pub(crate) fn lookup<'a>(map: &'a Mapping, key: &str) -> Option<&'a Value> {
    map.get(key).filter(|value| !value.is_null())
}
