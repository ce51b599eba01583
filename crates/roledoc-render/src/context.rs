//! Template context for role documents.
//!
//! [`DocumentContext`] is the single value handed to the templates. It is
//! derived from the introspection results without touching the filesystem, so
//! the same inputs always produce the same context. Every field is serialized
//! even when empty, which keeps strict-mode templates happy: optional sections
//! are `null` and lists are `[]`.

use crate::tree::render_tree;
use roledoc_introspector::{
    MetadataRecord, RoleInfo, RoleManifest, SourceState, StandardDir, TaskCatalog, TaskSummary,
    VariableSet,
};
use serde::Serialize;

/// Data rendered into a role document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentContext {
    /// Role name
    pub name: String,
    /// Plain-text title, e.g. `ANSIBLE ROLE: MSXML`
    pub text_title: String,
    /// `=` rule as wide as `text_title`
    pub text_title_rule: String,
    /// Role description from the metadata file
    pub description: Option<String>,
    /// General information block
    pub general: GeneralSection,
    /// Defaults, `None` when absent or empty
    pub defaults: Option<VariablesSection>,
    /// One section per vars file with content
    pub vars: Vec<VariablesSection>,
    /// Main task list, `None` when there is no tasks file
    pub tasks: Option<TaskSection>,
    /// Other task files with content
    pub task_files: Vec<TaskSection>,
    /// Handlers, `None` when there is no handlers file
    pub handlers: Option<TaskSection>,
    /// Files in `templates/`
    pub templates: Vec<String>,
    /// Role structure, one tree entry per line
    pub tree: Vec<String>,
    /// Role dependencies
    pub dependencies: Vec<DependencyEntry>,
}

/// General information about the role.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GeneralSection {
    /// The metadata file exists but could not be parsed
    pub unavailable: bool,
    /// Labelled fields in fixed order
    pub fields: Vec<Field>,
}

/// A labelled value, optionally with sub-items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    /// Label such as `Author`
    pub label: String,
    /// Inline value, `None` for list-only fields
    pub value: Option<String>,
    /// Sub-items listed under the label
    pub items: Vec<String>,
}

/// Variables of one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariablesSection {
    /// File name inside its directory, e.g. `main.yml`
    pub file: String,
    /// The file exists but could not be parsed
    pub unavailable: bool,
    /// `key: value` YAML lines, in file order
    pub lines: Vec<String>,
}

/// Named entries of one task list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskSection {
    /// File name inside its directory
    pub file: String,
    /// The file exists but could not be parsed
    pub unavailable: bool,
    /// Entries in declaration order
    pub entries: Vec<TaskEntry>,
}

/// A numbered task name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskEntry {
    /// 1-based position
    pub position: usize,
    /// Display name
    pub name: String,
}

/// A dependency with its extra settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyEntry {
    /// Dependency role name
    pub name: String,
    /// `key: value` settings
    pub details: Vec<String>,
}

impl DocumentContext {
    /// Builds the context for one role.
    #[must_use]
    pub fn build(manifest: &RoleManifest, metadata: &MetadataRecord, tasks: &TaskCatalog) -> Self {
        let name = manifest.name().to_string();
        let text_title = format!("ANSIBLE ROLE: {}", name.to_uppercase());
        let text_title_rule = "=".repeat(text_title.chars().count());

        Self {
            name,
            text_title,
            text_title_rule,
            description: metadata.info.description.clone(),
            general: general_section(&metadata.info, metadata.meta_state),
            defaults: variables_section(&metadata.defaults),
            vars: metadata.vars.iter().filter_map(variables_section).collect(),
            tasks: task_section(&tasks.main),
            task_files: tasks.task_files.iter().filter_map(task_section).collect(),
            handlers: task_section(&tasks.handlers),
            templates: manifest
                .files(StandardDir::Templates)
                .map(<[String]>::to_vec)
                .unwrap_or_default(),
            tree: render_tree(manifest),
            dependencies: metadata
                .dependencies
                .iter()
                .map(|dep| DependencyEntry {
                    name: dep.name.clone(),
                    details: dep.details.clone(),
                })
                .collect(),
        }
    }
}

fn general_section(info: &RoleInfo, state: SourceState) -> GeneralSection {
    if state.is_malformed() {
        return GeneralSection {
            unavailable: true,
            fields: Vec::new(),
        };
    }

    let labelled = [
        ("Author", &info.author),
        ("License", &info.license),
        ("Minimum Ansible Version", &info.min_version),
    ];
    let mut fields: Vec<Field> = labelled
        .into_iter()
        .filter_map(|(label, value)| {
            value.as_ref().map(|value| Field {
                label: label.to_string(),
                value: Some(value.clone()),
                items: Vec::new(),
            })
        })
        .collect();

    if !info.platforms.is_empty() {
        fields.push(Field {
            label: "Supported Platforms".to_string(),
            value: None,
            items: info
                .platforms
                .iter()
                .map(|platform| {
                    if platform.versions.is_empty() {
                        platform.name.clone()
                    } else {
                        format!("{} ({})", platform.name, platform.versions.join(", "))
                    }
                })
                .collect(),
        });
    }

    GeneralSection {
        unavailable: false,
        fields,
    }
}

/// File name part of a role-relative path such as `vars/main.yml`.
fn file_name(relative: Option<&str>) -> String {
    relative
        .map(|path| path.rsplit_once('/').map_or(path, |(_, name)| name))
        .unwrap_or_default()
        .to_string()
}

fn variables_section(set: &VariableSet) -> Option<VariablesSection> {
    match set.state {
        SourceState::Missing => None,
        SourceState::Loaded if set.is_empty() => None,
        state => Some(VariablesSection {
            file: file_name(set.file.as_deref()),
            unavailable: state.is_malformed(),
            lines: set
                .variables
                .iter()
                .flat_map(|variable| variable.lines.iter().cloned())
                .collect(),
        }),
    }
}

fn task_section(summary: &TaskSummary) -> Option<TaskSection> {
    match summary.state {
        SourceState::Missing => None,
        SourceState::Loaded if summary.is_empty() => None,
        state => Some(TaskSection {
            file: file_name(summary.file.as_deref()),
            unavailable: state.is_malformed(),
            entries: summary
                .iter()
                .map(|task| TaskEntry {
                    position: task.position,
                    name: task.name.clone(),
                })
                .collect(),
        }),
    }
}
