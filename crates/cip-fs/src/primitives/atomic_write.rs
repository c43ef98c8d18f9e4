use crate::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Copy, Debug, Default)]
pub struct AtomicWriteOptions {
    pub sync: bool,
}

impl AtomicWriteOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sync(mut self, sync: bool) -> Self {
        self.sync = sync;
        self
    }
}

/// Sibling temporary path, hidden and unique, in the same directory as `path`.
fn temp_sibling(path: &Path) -> Result<PathBuf> {
    let parent = path.parent().ok_or_else(|| Error::Write {
        path: path.to_path_buf(),
        source: std::io::Error::other("no parent directory"),
    })?;
    Ok(parent.join(format!(".tmp.{}.cip", uuid::Uuid::new_v4())))
}

/// Temporary sibling that is deleted on drop unless it was renamed into place.
struct TempSibling {
    path: PathBuf,
    committed: bool,
}

impl TempSibling {
    fn for_target(target: &Path) -> Result<Self> {
        Ok(Self {
            path: temp_sibling(target)?,
            committed: false,
        })
    }

    fn commit(mut self, target: &Path, options: AtomicWriteOptions) -> Result<()> {
        if options.sync {
            fs::File::open(&self.path)
                .and_then(|file| file.sync_all())
                .map_err(|e| Error::Write {
                    path: self.path.clone(),
                    source: e,
                })?;
        }

        fs::rename(&self.path, target).map_err(|e| Error::Write {
            path: target.to_path_buf(),
            source: e,
        })?;
        self.committed = true;
        Ok(())
    }
}

impl Drop for TempSibling {
    fn drop(&mut self) {
        if !self.committed {
            let _ = fs::remove_file(&self.path);
        }
    }
}

pub fn atomic_write(
    path: impl AsRef<Path>,
    content: &[u8],
    options: AtomicWriteOptions,
) -> Result<()> {
    let path = path.as_ref();
    let tmp = TempSibling::for_target(path)?;

    fs::write(&tmp.path, content).map_err(|e| Error::Write {
        path: tmp.path.clone(),
        source: e,
    })?;

    tmp.commit(path, options)
}

/// Copy `src` over `dest` through a temporary sibling, so `dest` is either the
/// old file or the complete new one. Modification time is carried over.
pub fn atomic_copy(
    src: impl AsRef<Path>,
    dest: impl AsRef<Path>,
    options: AtomicWriteOptions,
) -> Result<()> {
    let src = src.as_ref();
    let dest = dest.as_ref();
    let tmp = TempSibling::for_target(dest)?;

    fs::copy(src, &tmp.path).map_err(|e| Error::Copy {
        from: src.to_path_buf(),
        to: tmp.path.clone(),
        source: e,
    })?;
    crate::primitives::copy_dir::copy_times(src, &tmp.path)?;

    tmp.commit(dest, options)
}

pub fn atomic_read(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    let path = path.as_ref();
    fs::read(path).map_err(|e| Error::Read {
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_atomic_write() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        atomic_write(&path, b"class_name = \"3b\"", AtomicWriteOptions::new()).unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"class_name = \"3b\"");
    }

    #[test]
    fn test_atomic_write_replaces_existing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(&path, "old").unwrap();
        atomic_write(&path, b"new", AtomicWriteOptions::new().sync(true)).unwrap();
        assert_eq!(atomic_read(&path).unwrap(), b"new");
    }

    #[test]
    fn test_atomic_copy_leaves_no_temp_files() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("update.zip");
        let dest_dir = dir.path().join("archive");
        fs::create_dir(&dest_dir).unwrap();
        fs::write(&src, b"PK-bytes").unwrap();

        atomic_copy(&src, dest_dir.join("update.zip"), AtomicWriteOptions::new()).unwrap();

        let names: Vec<_> = fs::read_dir(&dest_dir)
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("update.zip")]);
        assert_eq!(fs::read(dest_dir.join("update.zip")).unwrap(), b"PK-bytes");
    }

    fn temp_leftovers(dir: &Path) -> Vec<std::ffi::OsString> {
        fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .filter(|name| name.to_string_lossy().starts_with(".tmp."))
            .collect()
    }

    #[test]
    fn test_failed_commit_removes_temp() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("update.zip");
        fs::write(&src, b"PK-bytes").unwrap();
        let occupied = dir.path().join("slot");
        fs::create_dir(&occupied).unwrap();
        fs::write(occupied.join("keep.txt"), "x").unwrap();

        let err = atomic_copy(&src, &occupied, AtomicWriteOptions::new().sync(true)).unwrap_err();
        assert!(matches!(err, Error::Write { .. }));
        assert!(temp_leftovers(dir.path()).is_empty());
        assert!(occupied.join("keep.txt").exists());
    }

    #[test]
    fn test_uncommitted_temp_is_dropped() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("settings.toml");
        {
            let tmp = TempSibling::for_target(&target).unwrap();
            fs::write(&tmp.path, "half").unwrap();
        }
        assert!(temp_leftovers(dir.path()).is_empty());
        assert!(!target.exists());
    }

    #[test]
    fn test_failed_copy_removes_temp() {
        let dir = tempdir().unwrap();
        let err = atomic_copy(
            dir.path().join("missing.zip"),
            dir.path().join("copy.zip"),
            AtomicWriteOptions::new(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::Copy { .. }));
        assert!(temp_leftovers(dir.path()).is_empty());
    }

    #[test]
    fn test_atomic_read_missing() {
        let dir = tempdir().unwrap();
        let err = atomic_read(dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, Error::Read { .. }));
    }
}
