use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use zip::ZipArchive;
use zip::result::ZipError;

use crate::detect::detect_from_reader;
use crate::error::{Error, Result};
use crate::report::{ExtractReport, ExtractedEntry};
use crate::sanitize::sanitize_entry_path;

const PREALLOC_LIMIT: u64 = 1 << 20;

/// An opened zip file on disk.
pub struct ZipPackage {
    path: PathBuf,
    archive: ZipArchive<File>,
}

impl ZipPackage {
    /// Open `path`, refusing anything that is not a regular file carrying a zip
    /// signature with a readable central directory.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::NotAFile(path.to_path_buf()));
        }

        let mut file = File::open(path)?;
        if !detect_from_reader(&mut file)? {
            return Err(Error::NotZip(path.to_path_buf()));
        }

        let archive = ZipArchive::new(file)?;
        tracing::debug!(path = %path.display(), entries = archive.len(), "opened zip");

        Ok(Self {
            path: path.to_path_buf(),
            archive,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.archive.len()
    }

    pub fn is_empty(&self) -> bool {
        self.archive.is_empty()
    }

    /// Whether an entry named exactly `name` exists.
    pub fn contains(&self, name: &str) -> bool {
        self.archive.index_for_name(name).is_some()
    }

    /// Bytes of the entry named `name`, or `None` if there is no such entry.
    pub fn read_entry(&mut self, name: &str) -> Result<Option<Vec<u8>>> {
        let mut file = match self.archive.by_name(name) {
            Ok(file) => file,
            Err(ZipError::FileNotFound) => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        // Declared sizes are untrusted; only a small buffer is reserved up front.
        let mut content = Vec::with_capacity(file.size().min(PREALLOC_LIMIT) as usize);
        file.read_to_end(&mut content)
            .map_err(|e| Error::Corrupted(format!("{name}: {e}")))?;
        Ok(Some(content))
    }

    /// Bytes of `name`, failing with [`Error::MissingEntry`] if absent.
    pub fn require_entry(&mut self, name: &str) -> Result<Vec<u8>> {
        self.read_entry(name)?.ok_or_else(|| Error::MissingEntry {
            entry: name.to_string(),
        })
    }

    /// Extract every entry below `dest`, creating it if needed.
    pub fn extract_all(&mut self, dest: impl AsRef<Path>) -> Result<ExtractReport> {
        let dest = dest.as_ref();
        fs::create_dir_all(dest).map_err(|source| Error::DirectoryCreationFailed {
            path: dest.to_path_buf(),
            source,
        })?;

        let mut report = ExtractReport::default();

        for index in 0..self.archive.len() {
            let mut file = self.archive.by_index(index)?;
            let raw_path = file
                .enclosed_name()
                .ok_or_else(|| Error::InvalidPath(file.name().to_string()))?;
            let target = sanitize_entry_path(&raw_path, dest)?.resolved;
            let mode = file.unix_mode();

            if file.is_dir() {
                create_dir(&target)?;
                report.push(ExtractedEntry {
                    original_path: raw_path,
                    target_path: target,
                    size: 0,
                    permissions: mode,
                    is_directory: true,
                });
                continue;
            }

            if let Some(parent) = target.parent() {
                create_dir(parent)?;
            }

            let size = File::create(&target)
                .and_then(|mut out| io::copy(&mut file, &mut out))
                .map_err(|source| Error::ExtractionFailed {
                    path: target.clone(),
                    source,
                })?;
            set_permissions(&target, mode)?;

            tracing::trace!(entry = %raw_path.display(), size, "extracted");
            report.push(ExtractedEntry {
                original_path: raw_path,
                target_path: target,
                size,
                permissions: mode,
                is_directory: false,
            });
        }

        tracing::debug!(
            archive = %self.path.display(),
            dest = %dest.display(),
            entries = report.entry_count,
            bytes = report.total_bytes,
            "extracted zip"
        );
        Ok(report)
    }
}

fn create_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|source| Error::DirectoryCreationFailed {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(unix)]
fn set_permissions(path: &Path, mode: Option<u32>) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    if let Some(mode) = mode {
        fs::set_permissions(path, fs::Permissions::from_mode(mode & 0o777)).map_err(|source| {
            Error::ExtractionFailed {
                path: path.to_path_buf(),
                source,
            }
        })?;
    }
    Ok(())
}

#[cfg(not(unix))]
fn set_permissions(_path: &Path, _mode: Option<u32>) -> Result<()> {
    Ok(())
}
