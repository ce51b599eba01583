//! Integration tests for roledoc-introspector
//!
//! These tests build role directories on disk and validate loading,
//! metadata extraction, and task summaries end to end.

use roledoc_introspector::{
    SourceState, StandardDir, collect_tasks, extract_metadata, inspect_role, load_manifest,
    summarize_tasks,
};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Writes `content` to `relative` under `root`, creating parent directories.
fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// Creates the MSXML sample role inside `temp` and returns its root.
fn msxml_role(temp: &TempDir) -> PathBuf {
    let root = temp.path().join("msxml");
    write(&root, "defaults/main.yml", "---\nmsxml_version: '6.0'\n");
    write(
        &root,
        "tasks/main.yml",
        r"---
- name: Create PowerShell script for MSXML check
  win_copy:
    src: check_msxml.ps1
    dest: C:\Temp\check_msxml.ps1
- name: Check if specified MSXML version already exists
  win_shell: C:\Temp\check_msxml.ps1 -Version {{ msxml_version }}
  register: msxml_check
",
    );
    write(&root, "meta/main.yml", "---\ngalaxy_info:\n  author: A&ECoding\n");
    write(&root, "files/check_msxml.ps1", "Write-Output 'ok'\n");
    write(&root, "tests/inventory", "localhost\n");
    root
}

/// Tests the full inspection of a well-formed role
#[test]
fn test_inspect_sample_role() {
    let temp = TempDir::new().unwrap();
    let root = msxml_role(&temp);

    let inspection = inspect_role(&root).unwrap();

    assert_eq!(inspection.manifest.name().as_str(), "msxml");
    assert_eq!(
        inspection.metadata.defaults.get("msxml_version"),
        Some("'6.0'")
    );
    assert_eq!(inspection.metadata.info.author.as_deref(), Some("A&ECoding"));
    assert_eq!(
        inspection.tasks.main.names(),
        [
            "Create PowerShell script for MSXML check",
            "Check if specified MSXML version already exists"
        ]
    );
    assert_eq!(inspection.diagnostics().count(), 0);
}

/// Tests that a missing root fails before anything is read
#[test]
fn test_missing_root_is_not_a_role() {
    let temp = TempDir::new().unwrap();

    let err = inspect_role(temp.path().join("no-such-role")).unwrap_err();
    assert!(err.is_not_a_role());
}

/// Tests that a role without defaults has an empty, non-malformed defaults set
#[test]
fn test_missing_defaults_is_not_an_error() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("bare");
    write(&root, "tasks/main.yml", "- name: Only task\n  debug: msg=hi\n");

    let manifest = load_manifest(&root).unwrap();
    let metadata = extract_metadata(&manifest);

    assert!(metadata.defaults.is_empty());
    assert_eq!(metadata.defaults.state, SourceState::Missing);
    assert!(metadata.defaults.file.is_none());
    assert!(metadata.diagnostics.is_empty());
}

/// Tests that a role without meta/ has no author or license
#[test]
fn test_missing_meta_leaves_info_empty() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("no-meta");
    write(&root, "defaults/main.yml", "port: 80\n");

    let manifest = load_manifest(&root).unwrap();
    assert!(!manifest.has(StandardDir::Meta));

    let metadata = extract_metadata(&manifest);
    assert!(metadata.info.author.is_none());
    assert!(metadata.info.license.is_none());
    assert_eq!(metadata.meta_state, SourceState::Missing);
}

/// Tests that a malformed file degrades to empty with a diagnostic
#[test]
fn test_malformed_defaults_degrade_gracefully() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("broken");
    write(&root, "defaults/main.yml", "key: [unterminated\n");
    write(&root, "meta/main.yml", "galaxy_info:\n  author: Someone\n");

    let manifest = load_manifest(&root).unwrap();
    let metadata = extract_metadata(&manifest);

    assert_eq!(metadata.defaults.state, SourceState::Malformed);
    assert!(metadata.defaults.is_empty());
    assert_eq!(metadata.diagnostics.len(), 1);
    assert_eq!(metadata.diagnostics[0].file, "defaults/main.yml");

    // The rest of the role is still extracted
    assert_eq!(metadata.info.author.as_deref(), Some("Someone"));
    assert_eq!(metadata.meta_state, SourceState::Loaded);
}

/// Tests that N tasks are summarized as N descriptors in order
#[test]
fn test_task_count_and_order_preserved() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("many");
    let mut content = String::new();
    for i in 1..=12 {
        content.push_str(&format!("- name: Step {i}\n  command: /bin/true\n"));
    }
    write(&root, "tasks/main.yml", &content);

    let manifest = load_manifest(&root).unwrap();
    let summary = summarize_tasks(&manifest);

    assert_eq!(summary.len(), 12);
    for (index, task) in summary.iter().enumerate() {
        assert_eq!(task.position, index + 1);
        assert_eq!(task.name, format!("Step {}", index + 1));
    }
}

/// Tests that an absent tasks file yields an empty summary
#[test]
fn test_missing_tasks_file() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("empty");
    fs::create_dir_all(root.join("tasks")).unwrap();

    let manifest = load_manifest(&root).unwrap();
    let summary = summarize_tasks(&manifest);

    assert!(summary.is_empty());
    assert_eq!(summary.state, SourceState::Missing);
}

/// Tests other task files and handlers
#[test]
fn test_collect_tasks_includes_handlers_and_task_files() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("web");
    write(&root, "tasks/main.yml", "- import_tasks: install.yml\n");
    write(&root, "tasks/install.yml", "- name: Install IIS\n  win_feature: name=Web-Server\n");
    write(&root, "handlers/main.yml", "- name: restart iis\n  win_service: name=W3SVC\n");

    let manifest = load_manifest(&root).unwrap();
    let catalog = collect_tasks(&manifest);

    assert_eq!(catalog.main.names(), ["Unnamed task #1"]);
    assert_eq!(catalog.task_files.len(), 1);
    assert_eq!(catalog.task_files[0].file.as_deref(), Some("tasks/install.yml"));
    assert_eq!(catalog.task_files[0].names(), ["Install IIS"]);
    assert_eq!(catalog.handlers.names(), ["restart iis"]);
}

/// Tests vars files are extracted main first
#[test]
fn test_vars_files() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("vars-role");
    write(&root, "vars/windows.yml", "service: W3SVC\n");
    write(&root, "vars/main.yml", "package: msxml6\n");

    let manifest = load_manifest(&root).unwrap();
    let metadata = extract_metadata(&manifest);

    let files: Vec<_> = metadata
        .vars
        .iter()
        .map(|set| set.file.as_deref().unwrap())
        .collect();
    assert_eq!(files, ["vars/main.yml", "vars/windows.yml"]);
    assert_eq!(metadata.vars[1].get("service"), Some("W3SVC"));
}

/// Tests that inspection is repeatable on an unchanged role
#[test]
fn test_inspection_is_deterministic() {
    let temp = TempDir::new().unwrap();
    let root = msxml_role(&temp);

    let first = inspect_role(&root).unwrap();
    let second = inspect_role(&root).unwrap();

    assert_eq!(first.manifest.root_files(), second.manifest.root_files());
    assert_eq!(first.metadata.defaults, second.metadata.defaults);
    assert_eq!(first.tasks.main, second.tasks.main);
}

/// Tests that a malformed tasks file is flagged, with the diagnostic on the catalog
#[test]
fn test_malformed_tasks_diagnostic_on_catalog() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("bad-tasks");
    write(&root, "tasks/main.yml", "name: not a list\n");

    let manifest = load_manifest(&root).unwrap();

    let summary = summarize_tasks(&manifest);
    assert_eq!(summary.state, SourceState::Malformed);
    assert!(summary.is_empty());

    let catalog = collect_tasks(&manifest);
    assert_eq!(catalog.main.state, SourceState::Malformed);
    assert_eq!(catalog.diagnostics.len(), 1);
    assert_eq!(catalog.diagnostics[0].file, "tasks/main.yml");
}

/// Tests that an empty author in galaxy_info is treated as missing
#[test]
fn test_empty_author_is_missing() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("anon");
    write(&root, "meta/main.yml", "galaxy_info:\n  author: ''\n  license: MIT\n");

    let metadata = extract_metadata(&load_manifest(&root).unwrap());

    assert!(metadata.info.author.is_none());
    assert_eq!(metadata.info.license.as_deref(), Some("MIT"));
}
