//! Role loader: structural inventory of a role directory.
//!
//! The loader only looks at the fixed set of standard role directories and
//! lists their immediate files. It never recurses and never reads file
//! contents; that is left to the metadata extractor and the task summarizer.
//!
//! # Examples
//!
//! ```no_run
//! use roledoc_introspector::{StandardDir, load_manifest};
//!
//! let manifest = load_manifest("roles/msxml")?;
//! if let Some(file) = manifest.main_file(StandardDir::Tasks) {
//!     println!("tasks are declared in tasks/{file}");
//! }
//! # Ok::<(), roledoc_core::Error>(())
//! ```

use roledoc_core::{Diagnostic, Error, Result, RoleName};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// File names recognized as the entry point of a data directory, in lookup order.
pub const MAIN_FILE_CANDIDATES: [&str; 2] = ["main.yml", "main.yaml"];

/// A standard role subdirectory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StandardDir {
    /// `defaults/`: overridable default variables
    Defaults,
    /// `tasks/`: task lists
    Tasks,
    /// `handlers/`: handler tasks
    Handlers,
    /// `meta/`: galaxy metadata and dependencies
    Meta,
    /// `templates/`: template files
    Templates,
    /// `files/`: static files
    Files,
    /// `vars/`: role variables
    Vars,
    /// `tests/`: test inventory and playbooks
    Tests,
}

impl StandardDir {
    /// Every standard directory, in conventional order.
    pub const ALL: [Self; 8] = [
        Self::Defaults,
        Self::Tasks,
        Self::Handlers,
        Self::Meta,
        Self::Templates,
        Self::Files,
        Self::Vars,
        Self::Tests,
    ];

    /// Returns the directory name on disk.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Defaults => "defaults",
            Self::Tasks => "tasks",
            Self::Handlers => "handlers",
            Self::Meta => "meta",
            Self::Templates => "templates",
            Self::Files => "files",
            Self::Vars => "vars",
            Self::Tests => "tests",
        }
    }
}

impl fmt::Display for StandardDir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structural inventory of one role.
///
/// Built once by [`load_manifest`] and immutable afterwards. File lists are
/// sorted by name so every consumer sees the same order on every run.
#[derive(Debug, Clone, Serialize)]
pub struct RoleManifest {
    root: PathBuf,
    name: RoleName,
    directories: BTreeMap<StandardDir, Vec<String>>,
    root_files: Vec<String>,
    diagnostics: Vec<Diagnostic>,
}

impl RoleManifest {
    /// Canonical path of the role root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Role name, taken from the root directory name.
    #[must_use]
    pub const fn name(&self) -> &RoleName {
        &self.name
    }

    /// Returns `true` if the standard directory exists in the role.
    #[must_use]
    pub fn has(&self, dir: StandardDir) -> bool {
        self.directories.contains_key(&dir)
    }

    /// Files directly inside a standard directory, or `None` if it is absent.
    #[must_use]
    pub fn files(&self, dir: StandardDir) -> Option<&[String]> {
        self.directories.get(&dir).map(Vec::as_slice)
    }

    /// Present standard directories with their files, in conventional order.
    pub fn directories(&self) -> impl Iterator<Item = (StandardDir, &[String])> {
        self.directories
            .iter()
            .map(|(dir, files)| (*dir, files.as_slice()))
    }

    /// Files directly inside the role root.
    #[must_use]
    pub fn root_files(&self) -> &[String] {
        &self.root_files
    }

    /// Problems found while listing directories.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Resolves the `main.*` entry file of a data directory.
    #[must_use]
    pub fn main_file(&self, dir: StandardDir) -> Option<&str> {
        let files = self.files(dir)?;
        MAIN_FILE_CANDIDATES
            .iter()
            .find(|candidate| files.iter().any(|f| f.as_str() == **candidate))
            .copied()
    }

    /// YAML files of a directory, main file first and the rest by name.
    #[must_use]
    pub fn yaml_files(&self, dir: StandardDir) -> Vec<&str> {
        let main = self.main_file(dir);
        let mut files: Vec<&str> = main.into_iter().collect();
        files.extend(
            self.files(dir)
                .unwrap_or_default()
                .iter()
                .map(String::as_str)
                .filter(|f| is_yaml(f) && Some(*f) != main),
        );
        files
    }

    /// Absolute path of a file inside a standard directory.
    #[must_use]
    pub fn path_of(&self, dir: StandardDir, file: &str) -> PathBuf {
        self.root.join(dir.as_str()).join(file)
    }

    /// Role-relative path of a file, used in diagnostics and headings.
    #[must_use]
    pub fn relative_path(dir: StandardDir, file: &str) -> String {
        format!("{}/{file}", dir.as_str())
    }
}

/// Loads the structural manifest of a role.
///
/// Standard directories that do not exist are omitted. A standard directory
/// that exists but cannot be listed is kept with no files and a diagnostic.
///
/// # Errors
///
/// Returns [`Error::NotARole`] if `path` does not exist or is not a directory.
/// Nothing below the root is read in that case.
///
/// # Examples
///
/// ```no_run
/// use roledoc_introspector::{StandardDir, load_manifest};
///
/// let manifest = load_manifest("roles/msxml")?;
/// assert!(manifest.has(StandardDir::Tasks));
/// # Ok::<(), roledoc_core::Error>(())
/// ```
pub fn load_manifest(path: impl AsRef<Path>) -> Result<RoleManifest> {
    let path = path.as_ref();
    let not_a_role = |reason: String| Error::NotARole {
        path: path.display().to_string(),
        reason,
    };

    let metadata = fs::metadata(path).map_err(|e| not_a_role(format!("cannot access path: {e}")))?;
    if !metadata.is_dir() {
        return Err(not_a_role("path is not a directory".to_string()));
    }

    let root = path
        .canonicalize()
        .map_err(|e| not_a_role(format!("cannot resolve path: {e}")))?;
    let name = RoleName::from_path(&root)
        .ok_or_else(|| not_a_role("role directory has no name".to_string()))?;

    debug!(role = %name, root = %root.display(), "loading role manifest");

    let mut diagnostics = Vec::new();
    let mut directories = BTreeMap::new();

    for dir in StandardDir::ALL {
        let dir_path = root.join(dir.as_str());
        if !dir_path.is_dir() {
            continue;
        }

        let files = list_files(&dir_path).unwrap_or_else(|e| {
            warn!(dir = dir.as_str(), "cannot list directory: {e}");
            diagnostics.push(Diagnostic::new(
                format!("{}/", dir.as_str()),
                format!("cannot list directory: {e}"),
            ));
            Vec::new()
        });
        debug!(dir = dir.as_str(), files = files.len(), "found standard directory");
        directories.insert(dir, files);
    }

    let root_files = list_files(&root).unwrap_or_else(|e| {
        warn!("cannot list role root: {e}");
        diagnostics.push(Diagnostic::new(".", format!("cannot list directory: {e}")));
        Vec::new()
    });

    Ok(RoleManifest {
        root,
        name,
        directories,
        root_files,
        diagnostics,
    })
}

/// Lists the regular files directly inside `dir`, sorted by name.
fn list_files(dir: &Path) -> std::result::Result<Vec<String>, walkdir::Error> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry?;
        if entry.file_type().is_file() {
            files.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    Ok(files)
}

fn is_yaml(file: &str) -> bool {
    Path::new(file)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yml") || ext.eq_ignore_ascii_case("yaml"))
}
