use crate::{Error, Result};
use filetime::FileTime;
use std::fs;
use std::path::Path;

/// Recursively copy `src` onto `dest`, overwriting files of the same name and
/// leaving unrelated files in `dest` untouched. Missing parents are created.
///
/// Files keep their permissions and modification times. A file copied onto
/// itself is left alone.
pub fn overwrite_tree(src: impl AsRef<Path>, dest: impl AsRef<Path>) -> Result<()> {
    let src = src.as_ref();
    let dest = dest.as_ref();

    let metadata = fs::metadata(src).map_err(|e| Error::Read {
        path: src.to_path_buf(),
        source: e,
    })?;

    if metadata.is_dir() {
        if !dest.is_dir() {
            fs::create_dir_all(dest).map_err(|e| Error::Write {
                path: dest.to_path_buf(),
                source: e,
            })?;
        }

        for entry in fs::read_dir(src).map_err(|e| Error::Read {
            path: src.to_path_buf(),
            source: e,
        })? {
            let entry = entry.map_err(|e| Error::Read {
                path: src.to_path_buf(),
                source: e,
            })?;
            overwrite_tree(entry.path(), dest.join(entry.file_name()))?;
        }
        return Ok(());
    }

    if same_file(src, dest) {
        return Ok(());
    }

    if let Some(parent) = dest.parent() {
        if !parent.is_dir() {
            fs::create_dir_all(parent).map_err(|e| Error::Write {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
    }

    fs::copy(src, dest).map_err(|e| Error::Copy {
        from: src.to_path_buf(),
        to: dest.to_path_buf(),
        source: e,
    })?;
    copy_times(src, dest)
}

/// Copy a directory tree into a destination that must not exist yet.
pub fn copy_dir_all(src: impl AsRef<Path>, dest: impl AsRef<Path>) -> Result<()> {
    let src = src.as_ref();
    let dest = dest.as_ref();

    if !src.is_dir() {
        return Err(Error::NotFound(src.to_path_buf()));
    }
    if dest.exists() {
        return Err(Error::Write {
            path: dest.to_path_buf(),
            source: std::io::Error::from(std::io::ErrorKind::AlreadyExists),
        });
    }
    overwrite_tree(src, dest)
}

pub(crate) fn copy_times(src: &Path, dest: &Path) -> Result<()> {
    let metadata = fs::metadata(src).map_err(|e| Error::Read {
        path: src.to_path_buf(),
        source: e,
    })?;
    let atime = FileTime::from_last_access_time(&metadata);
    let mtime = FileTime::from_last_modification_time(&metadata);
    filetime::set_file_times(dest, atime, mtime).map_err(|e| Error::Write {
        path: dest.to_path_buf(),
        source: e,
    })
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
