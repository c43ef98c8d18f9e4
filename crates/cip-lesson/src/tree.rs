use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::status::label;

/// One folder of an examples tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExampleNode {
    pub name: String,
    /// Absolute folder path.
    pub path: PathBuf,
    /// Path relative to the tree's base.
    pub rel_path: PathBuf,
    pub label: String,
    pub tooltip: Option<String>,
    /// Whether the folder can be copied to a student as a lesson.
    pub selectable: bool,
    /// `description.xml` exists but could not be parsed.
    pub broken: bool,
    pub children: Vec<ExampleNode>,
}

impl ExampleNode {
    /// Depth-first walk over this node and its descendants.
    pub fn walk(&self) -> Vec<&ExampleNode> {
        let mut out = vec![self];
        for child in &self.children {
            out.extend(child.walk());
        }
        out
    }
}

/// Every folder below `base`, sorted by name at each level. A missing base
/// yields an empty tree.
///
/// A described folder is selectable unless locked or broken; an undescribed
/// one only when it holds `<name>.py`.
pub fn example_tree(base: &Path, lang: &str) -> Result<Vec<ExampleNode>> {
    if !base.is_dir() {
        return Ok(Vec::new());
    }
    nodes(base, Path::new(""), lang)
}

fn nodes(base: &Path, folder: &Path, lang: &str) -> Result<Vec<ExampleNode>> {
    let mut out = Vec::new();

    for (name, path) in sorted_dirs(&base.join(folder))? {
        let rel_path = folder.join(&name);
        let labelled = label(&path, &name, &rel_path, lang);

        let selectable = if labelled.described {
            !labelled.locked
        } else {
            path.join(format!("{name}.py")).is_file()
        };

        let children = nodes(base, &rel_path, lang)?;
        out.push(ExampleNode {
            name,
            path,
            rel_path,
            label: labelled.label,
            tooltip: labelled.tooltip,
            selectable,
            broken: labelled.broken,
            children,
        });
    }

    Ok(out)
}

/// Subdirectories of `dir` as `(name, path)`, sorted by name.
pub(crate) fn sorted_dirs(dir: &Path) -> Result<Vec<(String, PathBuf)>> {
    let entries = fs::read_dir(dir).map_err(|e| cip_fs::Error::Read {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut dirs: Vec<(String, PathBuf)> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_dir())
        .map(|entry| (entry.file_name().to_string_lossy().into_owned(), entry.path()))
        .collect();
    dirs.sort();
    Ok(dirs)
}
