//! Role structure tree.

use roledoc_introspector::RoleManifest;

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const PIPE: &str = "│   ";
const SPACE: &str = "    ";

enum Node<'a> {
    Dir(&'a str, &'a [String]),
    File(&'a str),
}

/// Draws the role layout as tree lines, one entry per line.
///
/// The first line is the role root (`msxml/`). Standard directories come
/// first in alphabetical order, each followed by its files, then the files
/// directly inside the root.
#[must_use]
pub fn render_tree(manifest: &RoleManifest) -> Vec<String> {
    let mut dirs: Vec<_> = manifest.directories().collect();
    dirs.sort_by_key(|(dir, _)| dir.as_str());

    let nodes: Vec<Node<'_>> = dirs
        .into_iter()
        .map(|(dir, files)| Node::Dir(dir.as_str(), files))
        .chain(manifest.root_files().iter().map(|f| Node::File(f.as_str())))
        .collect();

    let mut lines = vec![format!("{}/", manifest.name())];
    for (index, node) in nodes.iter().enumerate() {
        let last = index + 1 == nodes.len();
        let (branch, indent) = if last { (LAST_BRANCH, SPACE) } else { (BRANCH, PIPE) };

        match node {
            Node::Dir(name, files) => {
                lines.push(format!("{branch}{name}/"));
                for (file_index, file) in files.iter().enumerate() {
                    let file_branch = if file_index + 1 == files.len() {
                        LAST_BRANCH
                    } else {
                        BRANCH
                    };
                    lines.push(format!("{indent}{file_branch}{file}"));
                }
            }
            Node::File(name) => lines.push(format!("{branch}{name}")),
        }
    }

    lines
}
