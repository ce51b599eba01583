//! Role directory introspection.
//!
//! Reads a role from disk and extracts everything the renderer documents:
//! - [`load_manifest`]: which standard directories and files exist
//! - [`extract_metadata`]: defaults, vars, galaxy metadata, dependencies
//! - [`summarize_tasks`] / [`collect_tasks`]: ordered task and handler names
//!
//! The whole pipeline is read-only. [`inspect_role`] runs the three steps in
//! order and bundles the results.
//!
//! # Examples
//!
//! ```no_run
//! use roledoc_introspector::inspect_role;
//!
//! let inspection = inspect_role("roles/msxml")?;
//! println!("{} tasks", inspection.tasks.main.len());
//! for diagnostic in inspection.diagnostics() {
//!     eprintln!("warning: {diagnostic}");
//! }
//! # Ok::<(), roledoc_core::Error>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod manifest;
pub mod metadata;
pub mod source;
pub mod tasks;

pub use manifest::{MAIN_FILE_CANDIDATES, RoleManifest, StandardDir, load_manifest};
pub use metadata::{
    Dependency, MetadataRecord, Platform, RoleInfo, Variable, VariableSet, extract_metadata,
};
pub use source::{MAX_FILE_SIZE, SourceState};
pub use tasks::{TaskCatalog, TaskDescriptor, TaskSummary, collect_tasks, summarize_tasks};

use roledoc_core::{Diagnostic, Result};
use std::path::Path;
use tracing::info;

/// Everything extracted from one role.
#[derive(Debug, Clone)]
pub struct RoleInspection {
    /// Structural inventory
    pub manifest: RoleManifest,
    /// Defaults, vars, and galaxy metadata
    pub metadata: MetadataRecord,
    /// Task and handler names
    pub tasks: TaskCatalog,
}

impl RoleInspection {
    /// All recoverable problems found while inspecting the role.
    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.manifest
            .diagnostics()
            .iter()
            .chain(&self.metadata.diagnostics)
            .chain(&self.tasks.diagnostics)
    }
}

/// Loads a role and extracts its metadata and task summaries.
///
/// # Errors
///
/// Returns [`roledoc_core::Error::NotARole`] if `path` does not exist or is
/// not a directory. Problems with individual files are never errors; they are
/// reported through [`RoleInspection::diagnostics`].
pub fn inspect_role(path: impl AsRef<Path>) -> Result<RoleInspection> {
    let manifest = load_manifest(path)?;
    let metadata = extract_metadata(&manifest);
    let tasks = collect_tasks(&manifest);

    info!(
        role = %manifest.name(),
        tasks = tasks.main.len(),
        defaults = metadata.defaults.variables.len(),
        "inspected role"
    );

    Ok(RoleInspection {
        manifest,
        metadata,
        tasks,
    })
}
