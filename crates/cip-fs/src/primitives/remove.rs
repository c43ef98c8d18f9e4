use crate::{Error, Result};
use std::collections::HashSet;
use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use walkdir::WalkDir;

/// Remove a file or a whole directory tree. A path that is already gone is
/// not an error. Returns whether anything was removed.
pub fn remove_path(path: impl AsRef<Path>) -> Result<bool> {
    let path = path.as_ref();

    let metadata = match fs::symlink_metadata(path) {
        Ok(m) => m,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(false),
        Err(e) => {
            return Err(Error::Read {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };

    let result = if metadata.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };

    match result {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(Error::Remove {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Remove every directory under (and including) `root` that is empty, or that
/// only holds files named in `ignored`. Deepest directories go first, so a
/// chain of empty folders collapses in one call.
pub fn remove_empty_dirs(root: impl AsRef<Path>, ignored: &[&str]) -> Result<usize> {
    let root = root.as_ref();
    if !root.is_dir() {
        return Ok(0);
    }

    let ignored: HashSet<OsString> = ignored.iter().map(OsString::from).collect();
    let mut removed = 0;

    for entry in WalkDir::new(root).contents_first(true) {
        let entry = entry.map_err(|e| Error::Read {
            path: e.path().unwrap_or(root).to_path_buf(),
            source: e.into_io_error().unwrap_or_else(|| std::io::Error::other("walk failed")),
        })?;
        if !entry.file_type().is_dir() {
            continue;
        }

        let dir = entry.path();
        let only_ignored = fs::read_dir(dir)
            .map_err(|e| Error::Read {
                path: dir.to_path_buf(),
                source: e,
            })?
            .filter_map(|e| e.ok())
            .all(|e| ignored.contains(&e.file_name()) && e.path().is_file());

        if only_ignored {
            tracing::debug!(path = %dir.display(), "pruning empty folder");
            if remove_path(dir)? {
                removed += 1;
            }
        }
    }

    Ok(removed)
}
