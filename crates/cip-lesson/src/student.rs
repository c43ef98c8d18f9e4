use std::path::{Path, PathBuf};

use cip_path::place::TRASH_DIR;
use cip_path::{PathResolver, Place};

use crate::error::Result;
use crate::status::{LessonStatus, check_lesson, label};
use crate::tree::sorted_dirs;

/// An openable lesson in a student's folder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LessonEntry {
    pub name: String,
    pub path: PathBuf,
    /// Path relative to the student place.
    pub rel_path: PathBuf,
    pub label: String,
    pub tooltip: Option<String>,
    pub start_file: PathBuf,
}

/// Ready lessons anywhere under the current student's folder, skipping the
/// trash. Empty when nobody is logged in.
pub fn student_lessons(resolver: &PathResolver, lang: &str) -> Result<Vec<LessonEntry>> {
    if !resolver.session().is_logged_in() {
        return Ok(Vec::new());
    }

    let base = resolver.resolve(Place::Student, &[]);
    let mut out = Vec::new();
    if base.is_dir() {
        collect(&base, Path::new(""), lang, &mut out)?;
    }
    Ok(out)
}

fn collect(base: &Path, folder: &Path, lang: &str, out: &mut Vec<LessonEntry>) -> Result<()> {
    for (name, path) in sorted_dirs(&base.join(folder))? {
        if name == TRASH_DIR {
            continue;
        }
        let rel_path = folder.join(&name);

        if let LessonStatus::Ready { start_file } = check_lesson(&path, lang) {
            let labelled = label(&path, &name, &rel_path, lang);
            out.push(LessonEntry {
                name: name.clone(),
                path: path.clone(),
                rel_path: rel_path.clone(),
                label: labelled.label,
                tooltip: labelled.tooltip,
                start_file,
            });
        }

        collect(base, &rel_path, lang, out)?;
    }
    Ok(())
}
