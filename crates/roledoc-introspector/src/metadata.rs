//! Metadata extractor: defaults, vars, and galaxy metadata of a role.
//!
//! Values are kept opaque. A variable's value is its YAML serialization, so
//! `msxml_version: '6.0'` documents exactly as declared, quotes included.
//!
//! Malformed files never abort extraction. The affected file degrades to an
//! empty mapping, its state becomes [`SourceState::Malformed`], and a
//! [`Diagnostic`] is recorded.

use crate::manifest::{RoleManifest, StandardDir};
use crate::source::{self, SourceState};
use roledoc_core::{Diagnostic, Result};
use serde::Serialize;
use serde_yaml::{Mapping, Value};
use tracing::debug;

/// Keys accepted for the minimum engine version, in lookup order.
const MIN_VERSION_KEYS: [&str; 2] = ["min_ansible_version", "min_version"];

/// One top-level variable of a defaults or vars file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Variable {
    /// Variable name
    pub name: String,
    /// Raw YAML of the value, e.g. `'6.0'`
    pub value: String,
    /// YAML lines declaring this variable alone, e.g. `["msxml_version: '6.0'"]`
    pub lines: Vec<String>,
}

/// Variables declared in one file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VariableSet {
    /// Role-relative path of the file, `None` when the file is absent
    pub file: Option<String>,
    /// Load state of the file
    pub state: SourceState,
    /// Variables in declaration order
    pub variables: Vec<Variable>,
}

impl VariableSet {
    /// Returns `true` if no variable was extracted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Raw value of a variable by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.variables
            .iter()
            .find(|v| v.name == name)
            .map(|v| v.value.as_str())
    }
}

/// A platform the role declares support for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Platform {
    /// Platform name, e.g. `Windows`
    pub name: String,
    /// Declared versions, possibly empty
    pub versions: Vec<String>,
}

/// Recognized galaxy metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RoleInfo {
    /// Role author
    pub author: Option<String>,
    /// Free-form role description
    pub description: Option<String>,
    /// License identifier
    pub license: Option<String>,
    /// Minimum engine version
    pub min_version: Option<String>,
    /// Supported platforms
    pub platforms: Vec<Platform>,
}

impl RoleInfo {
    /// Returns `true` if no recognized key was found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.author.is_none()
            && self.description.is_none()
            && self.license.is_none()
            && self.min_version.is_none()
            && self.platforms.is_empty()
    }
}

/// A role dependency from `meta/main.*`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dependency {
    /// Role name or source
    pub name: String,
    /// Remaining keys as `key: value`
    pub details: Vec<String>,
}

/// Everything the extractor learned from a role's data files.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MetadataRecord {
    /// Variables from `defaults/main.*`
    pub defaults: VariableSet,
    /// Variables from every YAML file in `vars/`
    pub vars: Vec<VariableSet>,
    /// Galaxy metadata
    pub info: RoleInfo,
    /// Load state of `meta/main.*`
    pub meta_state: SourceState,
    /// Declared dependencies
    pub dependencies: Vec<Dependency>,
    /// Recoverable problems, one per malformed file
    pub diagnostics: Vec<Diagnostic>,
}

/// Extracts defaults, vars, and galaxy metadata from a role.
///
/// Missing files produce empty sections. Malformed files produce empty
/// sections flagged [`SourceState::Malformed`] plus a diagnostic.
///
/// # Examples
///
/// ```no_run
/// use roledoc_introspector::{extract_metadata, load_manifest};
///
/// let manifest = load_manifest("roles/msxml")?;
/// let metadata = extract_metadata(&manifest);
/// println!("{:?}", metadata.defaults.get("msxml_version"));
/// # Ok::<(), roledoc_core::Error>(())
/// ```
#[must_use]
pub fn extract_metadata(manifest: &RoleManifest) -> MetadataRecord {
    let mut diagnostics = Vec::new();

    let defaults = manifest
        .main_file(StandardDir::Defaults)
        .map(|file| load_variables(manifest, StandardDir::Defaults, file, &mut diagnostics))
        .unwrap_or_default();

    let vars: Vec<VariableSet> = manifest
        .yaml_files(StandardDir::Vars)
        .into_iter()
        .map(|file| load_variables(manifest, StandardDir::Vars, file, &mut diagnostics))
        .collect();

    let (info, dependencies, meta_state) = match manifest.main_file(StandardDir::Meta) {
        None => (RoleInfo::default(), Vec::new(), SourceState::Missing),
        Some(file) => {
            let relative = RoleManifest::relative_path(StandardDir::Meta, file);
            let parsed = source::read_yaml(&manifest.path_of(StandardDir::Meta, file), &relative)
                .and_then(|value| parse_meta(&relative, &value));
            match parsed {
                Ok((info, dependencies)) => (info, dependencies, SourceState::Loaded),
                Err(e) => {
                    source::record(e, &mut diagnostics);
                    (RoleInfo::default(), Vec::new(), SourceState::Malformed)
                }
            }
        }
    };

    debug!(
        defaults = defaults.variables.len(),
        vars_files = vars.len(),
        dependencies = dependencies.len(),
        "extracted role metadata"
    );

    MetadataRecord {
        defaults,
        vars,
        info,
        meta_state,
        dependencies,
        diagnostics,
    }
}

fn load_variables(
    manifest: &RoleManifest,
    dir: StandardDir,
    file: &str,
    diagnostics: &mut Vec<Diagnostic>,
) -> VariableSet {
    let relative = RoleManifest::relative_path(dir, file);
    let parsed = source::read_yaml(&manifest.path_of(dir, file), &relative)
        .and_then(|value| parse_variables(&relative, &value));

    match parsed {
        Ok(variables) => VariableSet {
            file: Some(relative),
            state: SourceState::Loaded,
            variables,
        },
        Err(e) => {
            source::record(e, diagnostics);
            VariableSet {
                file: Some(relative),
                state: SourceState::Malformed,
                variables: Vec::new(),
            }
        }
    }
}

/// Flattens a variables document to its top-level keys.
fn parse_variables(relative: &str, value: &Value) -> Result<Vec<Variable>> {
    let map = match value {
        Value::Null => return Ok(Vec::new()),
        Value::Mapping(map) => map,
        other => {
            return Err(source::malformed(
                relative,
                format!("expected a mapping of variables, found {}", kind(other)),
            ));
        }
    };

    map.iter()
        .map(|(key, value)| {
            let mut single = Mapping::new();
            single.insert(key.clone(), value.clone());
            let declaration = source::to_yaml(relative, &Value::Mapping(single))?;

            Ok(Variable {
                name: source::inline_string(key),
                value: source::to_yaml(relative, value)?,
                lines: declaration.lines().map(str::to_string).collect(),
            })
        })
        .collect()
}

/// Reads recognized keys from a meta document.
///
/// Keys are looked up in `galaxy_info` when present, otherwise at the top
/// level. Dependencies always live at the top level.
fn parse_meta(relative: &str, value: &Value) -> Result<(RoleInfo, Vec<Dependency>)> {
    let map = match value {
        Value::Null => return Ok((RoleInfo::default(), Vec::new())),
        Value::Mapping(map) => map,
        other => {
            return Err(source::malformed(
                relative,
                format!("expected a mapping, found {}", kind(other)),
            ));
        }
    };

    let info_map = source::lookup(map, "galaxy_info")
        .and_then(Value::as_mapping)
        .unwrap_or(map);
    let text = |key: &str| {
        source::lookup(info_map, key)
            .map(source::inline_string)
            .filter(|value| !value.trim().is_empty())
    };

    let info = RoleInfo {
        author: text("author"),
        description: text("description"),
        license: text("license"),
        min_version: MIN_VERSION_KEYS.iter().find_map(|key| text(*key)),
        platforms: source::lookup(info_map, "platforms")
            .and_then(Value::as_sequence)
            .map(|items| items.iter().filter_map(parse_platform).collect())
            .unwrap_or_default(),
    };

    let dependencies = source::lookup(map, "dependencies")
        .and_then(Value::as_sequence)
        .map(|items| items.iter().filter_map(parse_dependency).collect())
        .unwrap_or_default();

    Ok((info, dependencies))
}

fn parse_platform(value: &Value) -> Option<Platform> {
    match value {
        Value::Mapping(map) => Some(Platform {
            name: source::lookup(map, "name").map_or_else(|| "N/A".to_string(), source::inline_string),
            versions: match source::lookup(map, "versions") {
                Some(Value::Sequence(items)) => items.iter().map(source::inline_string).collect(),
                Some(other) => vec![source::inline_string(other)],
                None => Vec::new(),
            },
        }),
        other => source::scalar_string(other).map(|name| Platform {
            name,
            versions: Vec::new(),
        }),
    }
}

fn parse_dependency(value: &Value) -> Option<Dependency> {
    const NAME_KEYS: [&str; 3] = ["role", "name", "src"];

    match value {
        Value::Mapping(map) => {
            let name_key = NAME_KEYS.iter().find(|key| source::lookup(map, key).is_some())?;
            let name = source::lookup(map, name_key).map(source::inline_string)?;
            let details = map
                .iter()
                .filter(|(key, _)| key.as_str() != Some(*name_key))
                .map(|(key, value)| {
                    format!("{}: {}", source::inline_string(key), source::inline_string(value))
                })
                .collect();
            Some(Dependency { name, details })
        }
        other => source::scalar_string(other).map(|name| Dependency {
            name,
            details: Vec::new(),
        }),
    }
}

const fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yaml(text: &str) -> Value {
        serde_yaml::from_str(text).unwrap()
    }

    #[test]
    fn test_parse_variables_keeps_raw_values_and_order() {
        let value = yaml("msxml_version: '6.0'\ninstall_dir: C:\\\\MSXML\nretries: 3\n");
        let vars = parse_variables("defaults/main.yml", &value).unwrap();

        let names: Vec<_> = vars.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, ["msxml_version", "install_dir", "retries"]);
        assert_eq!(vars[0].value, "'6.0'");
        assert_eq!(vars[0].lines, ["msxml_version: '6.0'"]);
        assert_eq!(vars[2].value, "3");
    }

    #[test]
    fn test_parse_variables_nested_value_is_opaque() {
        let value = yaml("features:\n  ssl: true\n  port: 443\n");
        let vars = parse_variables("defaults/main.yml", &value).unwrap();

        assert_eq!(vars.len(), 1);
        assert_eq!(vars[0].lines, ["features:", "  ssl: true", "  port: 443"]);
    }

    #[test]
    fn test_parse_variables_rejects_sequence() {
        let value = yaml("- a\n- b\n");
        let err = parse_variables("vars/main.yml", &value).unwrap_err();
        assert!(err.is_malformed_metadata());
        assert!(err.to_string().contains("found a sequence"));
    }

    #[test]
    fn test_parse_meta_galaxy_info() {
        let value = yaml(
            r"
galaxy_info:
  author: A&ECoding
  description: Install MSXML
  license: MIT
  min_ansible_version: 2.9
  company: ignored
  platforms:
    - name: Windows
      versions:
        - 2016
        - 2019
dependencies:
  - common
  - role: iis
    when: install_iis
",
        );

        let (info, deps) = parse_meta("meta/main.yml", &value).unwrap();
        assert_eq!(info.author.as_deref(), Some("A&ECoding"));
        assert_eq!(info.license.as_deref(), Some("MIT"));
        assert_eq!(info.min_version.as_deref(), Some("2.9"));
        assert_eq!(info.description.as_deref(), Some("Install MSXML"));
        assert_eq!(
            info.platforms,
            [Platform {
                name: "Windows".to_string(),
                versions: vec!["2016".to_string(), "2019".to_string()],
            }]
        );

        assert_eq!(deps.len(), 2);
        assert_eq!(deps[0].name, "common");
        assert_eq!(deps[1].name, "iis");
        assert_eq!(deps[1].details, ["when: install_iis"]);
    }

    #[test]
    fn test_parse_meta_top_level_keys() {
        let value = yaml("author: A&ECoding\nmin_version: '2.10'\nunknown: 1\n");
        let (info, deps) = parse_meta("meta/main.yml", &value).unwrap();

        assert_eq!(info.author.as_deref(), Some("A&ECoding"));
        assert_eq!(info.min_version.as_deref(), Some("2.10"));
        assert!(info.license.is_none());
        assert!(deps.is_empty());
    }

    #[test]
    fn test_parse_meta_blank_values_are_omitted() {
        let value = yaml("galaxy_info:\n  author: ''\n  license: '  '\n  description: Installs MSXML\n");
        let (info, _) = parse_meta("meta/main.yml", &value).unwrap();

        assert!(info.author.is_none());
        assert!(info.license.is_none());
        assert_eq!(info.description.as_deref(), Some("Installs MSXML"));
    }

    #[test]
    fn test_parse_variables_quoted_version_kept_verbatim() {
        let value = yaml("pkg_version: '2.10'\n");
        let vars = parse_variables("defaults/main.yml", &value).unwrap();

        assert_eq!(vars[0].value, "'2.10'");
        assert_eq!(vars[0].lines, ["pkg_version: '2.10'"]);
    }

    #[test]
    fn test_parse_meta_empty_document() {
        let (info, deps) = parse_meta("meta/main.yml", &Value::Null).unwrap();
        assert!(info.is_empty());
        assert!(deps.is_empty());
    }

    #[test]
    fn test_parse_platform_plain_string() {
        let platform = parse_platform(&Value::from("EL")).unwrap();
        assert_eq!(platform.name, "EL");
        assert!(platform.versions.is_empty());
    }

    #[test]
    fn test_variable_set_get() {
        let set = VariableSet {
            file: Some("defaults/main.yml".to_string()),
            state: SourceState::Loaded,
            variables: parse_variables("defaults/main.yml", &yaml("a: 1\n")).unwrap(),
        };
        assert_eq!(set.get("a"), Some("1"));
        assert_eq!(set.get("b"), None);
    }
}
