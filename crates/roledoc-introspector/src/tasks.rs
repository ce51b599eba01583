//! Task summarizer: ordered task names of a role.
//!
//! Only the `name` field of each entry is read. Task actions are never
//! interpreted. Entries without a name get a positional placeholder, so the
//! same file always yields the same summary.

use crate::manifest::{RoleManifest, StandardDir};
use crate::source::{self, SourceState};
use roledoc_core::{Diagnostic, Result};
use serde::Serialize;
use serde_yaml::Value;
use tracing::debug;

/// One entry of a task list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskDescriptor {
    /// 1-based position in the source file
    pub position: usize,
    /// Declared name, or a placeholder such as `Unnamed task #3`
    pub name: String,
    /// `false` when `name` is a placeholder
    pub named: bool,
}

/// Ordered task names of one task file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TaskSummary {
    /// Role-relative path of the file, `None` when the file is absent
    pub file: Option<String>,
    /// Load state of the file
    pub state: SourceState,
    /// Entries in declaration order
    pub tasks: Vec<TaskDescriptor>,
}

impl TaskSummary {
    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns `true` if the file has no entries (or is absent).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Iterates over the entries in declaration order.
    pub fn iter(&self) -> std::slice::Iter<'_, TaskDescriptor> {
        self.tasks.iter()
    }

    /// Display names in declaration order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.tasks.iter().map(|t| t.name.as_str()).collect()
    }
}

impl<'a> IntoIterator for &'a TaskSummary {
    type Item = &'a TaskDescriptor;
    type IntoIter = std::slice::Iter<'a, TaskDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Task summaries of every task list in a role.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TaskCatalog {
    /// `tasks/main.*`
    pub main: TaskSummary,
    /// Other YAML files in `tasks/`, by name
    pub task_files: Vec<TaskSummary>,
    /// `handlers/main.*`
    pub handlers: TaskSummary,
    /// Recoverable problems, one per malformed file
    pub diagnostics: Vec<Diagnostic>,
}

/// Summarizes the main task list of a role.
///
/// An absent tasks file yields an empty summary in state
/// [`SourceState::Missing`]. A malformed one yields an empty summary in state
/// [`SourceState::Malformed`]; the problem is logged but not returned. Use
/// [`collect_tasks`] to get the recorded [`Diagnostic`]s.
///
/// # Examples
///
/// ```no_run
/// use roledoc_introspector::{load_manifest, summarize_tasks};
///
/// let manifest = load_manifest("roles/msxml")?;
/// for task in &summarize_tasks(&manifest) {
///     println!("{}. {}", task.position, task.name);
/// }
/// # Ok::<(), roledoc_core::Error>(())
/// ```
#[must_use]
pub fn summarize_tasks(manifest: &RoleManifest) -> TaskSummary {
    let mut diagnostics = Vec::new();
    summarize_main(manifest, StandardDir::Tasks, "task", &mut diagnostics)
}

/// Summarizes every task list of a role: main tasks, other task files, and handlers.
#[must_use]
pub fn collect_tasks(manifest: &RoleManifest) -> TaskCatalog {
    let mut diagnostics = Vec::new();

    let main = summarize_main(manifest, StandardDir::Tasks, "task", &mut diagnostics);
    let main_file = manifest.main_file(StandardDir::Tasks);
    let task_files = manifest
        .yaml_files(StandardDir::Tasks)
        .into_iter()
        .filter(|file| Some(*file) != main_file)
        .map(|file| summarize_file(manifest, StandardDir::Tasks, file, "task", &mut diagnostics))
        .collect();
    let handlers = summarize_main(manifest, StandardDir::Handlers, "handler", &mut diagnostics);

    TaskCatalog {
        main,
        task_files,
        handlers,
        diagnostics,
    }
}

fn summarize_main(
    manifest: &RoleManifest,
    dir: StandardDir,
    kind: &str,
    diagnostics: &mut Vec<Diagnostic>,
) -> TaskSummary {
    manifest
        .main_file(dir)
        .map(|file| summarize_file(manifest, dir, file, kind, diagnostics))
        .unwrap_or_default()
}

fn summarize_file(
    manifest: &RoleManifest,
    dir: StandardDir,
    file: &str,
    kind: &str,
    diagnostics: &mut Vec<Diagnostic>,
) -> TaskSummary {
    let relative = RoleManifest::relative_path(dir, file);
    let parsed = source::read_yaml(&manifest.path_of(dir, file), &relative)
        .and_then(|value| parse_task_list(&relative, &value, kind));

    match parsed {
        Ok(tasks) => {
            debug!(file = %relative, entries = tasks.len(), "summarized task list");
            TaskSummary {
                file: Some(relative),
                state: SourceState::Loaded,
                tasks,
            }
        }
        Err(e) => {
            source::record(e, diagnostics);
            TaskSummary {
                file: Some(relative),
                state: SourceState::Malformed,
                tasks: Vec::new(),
            }
        }
    }
}

fn parse_task_list(relative: &str, value: &Value, kind: &str) -> Result<Vec<TaskDescriptor>> {
    let entries = match value {
        Value::Null => return Ok(Vec::new()),
        Value::Sequence(entries) => entries,
        _ => {
            return Err(source::malformed(
                relative,
                format!("expected a list of {kind}s"),
            ));
        }
    };

    Ok(entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let position = index + 1;
            let declared = entry
                .as_mapping()
                .and_then(|map| source::lookup(map, "name"))
                .and_then(source::scalar_string)
                .map(|name| name.split_whitespace().collect::<Vec<_>>().join(" "))
                .filter(|name| !name.is_empty());

            match declared {
                Some(name) => TaskDescriptor {
                    position,
                    name,
                    named: true,
                },
                None => TaskDescriptor {
                    position,
                    name: format!("Unnamed {kind} #{position}"),
                    named: false,
                },
            }
        })
        .collect())
}
