use crate::{Error, Result};
use std::path::{Path, PathBuf};

/// A scratch directory that is emptied on creation and removed on drop.
///
/// Whatever a previous, interrupted run left behind is discarded first, and
/// the directory is gone again after every exit path of the owning scope.
pub struct ScratchDir {
    path: PathBuf,
}

impl ScratchDir {
    pub fn fresh(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        crate::remove_path(&path)?;
        std::fs::create_dir_all(&path).map_err(|e| Error::Write {
            path: path.clone(),
            source: e,
        })?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        if let Err(err) = crate::remove_path(&self.path) {
            tracing::warn!(path = %self.path.display(), %err, "failed to clean scratch directory");
        }
    }
}

/// Deletes a file when dropped. Used for inputs that are consumed by a run
/// whatever its outcome.
pub struct ConsumeOnDrop {
    path: Option<PathBuf>,
}

impl ConsumeOnDrop {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    pub fn disarmed() -> Self {
        Self { path: None }
    }
}

impl Drop for ConsumeOnDrop {
    fn drop(&mut self) {
        if let Some(path) = self.path.take() {
            if let Err(err) = crate::remove_path(&path) {
                tracing::warn!(path = %path.display(), %err, "failed to remove consumed file");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_scratch_clears_leftovers() {
        let dir = tempdir().unwrap();
        let temp = dir.path().join("temp");
        std::fs::create_dir_all(&temp).unwrap();
        std::fs::write(temp.join("stale.py"), "old run").unwrap();

        let scratch = ScratchDir::fresh(&temp).unwrap();
        assert!(scratch.path().is_dir());
        assert!(!temp.join("stale.py").exists());
    }

    #[test]
    fn test_scratch_cleanup_on_drop() {
        let dir = tempdir().unwrap();
        let temp = dir.path().join("temp");
        {
            let scratch = ScratchDir::fresh(&temp).unwrap();
            std::fs::write(scratch.path().join("file.txt"), "data").unwrap();
        }
        assert!(!temp.exists());
    }

    #[test]
    fn test_consume_on_drop() {
        let dir = tempdir().unwrap();
        let inbox = dir.path().join("update.zip");
        std::fs::write(&inbox, "zip").unwrap();
        drop(ConsumeOnDrop::new(&inbox));
        assert!(!inbox.exists());

        std::fs::write(&inbox, "zip").unwrap();
        drop(ConsumeOnDrop::disarmed());
        assert!(inbox.exists());
    }
}
