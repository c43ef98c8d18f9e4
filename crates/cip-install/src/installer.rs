use std::fs;
use std::path::{Path, PathBuf};

use cip_archive::ZipPackage;
use cip_fs::{AtomicWriteOptions, ConsumeOnDrop, ScratchDir};
use cip_manifest::{Manifest, VersionInfo};
use cip_path::{MANIFEST_NAME, PathResolver, Place, canonicalize_lenient};

use crate::error::{InstallError, Result};
use crate::report::InstallReport;

/// Installed and candidate versions, shown before the user confirms an update.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UpdateOffer {
    pub source: PathBuf,
    /// `None` when nothing has been installed yet.
    pub present: Option<VersionInfo>,
    pub candidate: VersionInfo,
}

impl UpdateOffer {
    pub fn present_or_placeholder(&self) -> VersionInfo {
        self.present.clone().unwrap_or_default()
    }
}

/// Applies update archives to the `main` place of one workspace root.
///
/// The archive is extracted into the `temp` place, its manifest's `remove`
/// entries are deleted from `main`, then its `copy` entries are merged from
/// `temp` into `main`. Every target goes through the resolver's containment
/// check; entries failing it are skipped and reported.
#[derive(Clone, Debug)]
pub struct ArchiveInstaller {
    resolver: PathResolver,
    language: String,
}

impl ArchiveInstaller {
    pub fn new(resolver: PathResolver, language: impl Into<String>) -> Self {
        Self {
            resolver,
            language: language.into(),
        }
    }

    pub fn resolver(&self) -> &PathResolver {
        &self.resolver
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// The default inbox when `path` is `None`, otherwise `path` made
    /// absolute and normalized.
    pub fn source_path(&self, path: Option<&Path>) -> PathBuf {
        match path {
            Some(path) => {
                let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
                canonicalize_lenient(&absolute)
            }
            None => self.inbox(),
        }
    }

    fn inbox(&self) -> PathBuf {
        self.resolver.resolve(Place::ZipInstallDefaultFile, &[])
    }

    /// Whether `path` (default inbox when `None`) is a zip carrying a
    /// parseable manifest with a release.
    pub fn check_content(&self, path: Option<&Path>) -> bool {
        let path = self.source_path(path);
        if !path.is_file() {
            return false;
        }

        let mut package = match ZipPackage::open(&path) {
            Ok(package) => package,
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "this does not seem to be a valid zip file");
                return false;
            }
        };

        match package.read_entry(MANIFEST_NAME) {
            Ok(Some(bytes)) => match Manifest::parse(&bytes) {
                Ok(manifest) => manifest.has_release(),
                Err(err) => {
                    tracing::debug!(path = %path.display(), %err, "manifest does not parse");
                    false
                }
            },
            Ok(None) => false,
            Err(err) => {
                tracing::debug!(path = %path.display(), %err, "cannot read manifest");
                false
            }
        }
    }

    /// Version of a `.zip` archive or a bare manifest `.xml`. The flag is
    /// false, with placeholders, when no manifest can be read.
    pub fn get_version(&self, path: &Path) -> (bool, VersionInfo) {
        match read_manifest(path) {
            Ok(Some(manifest)) => (true, manifest.version(&self.language)),
            Ok(None) => (false, VersionInfo::default()),
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "cannot read version");
                (false, VersionInfo::default())
            }
        }
    }

    /// Validate the candidate and pair its version with the installed one.
    pub fn compare(&self, path: Option<&Path>) -> Result<UpdateOffer> {
        let source = self.source_path(path);
        if !self.check_content(Some(&source)) {
            return Err(InstallError::ArchiveInvalid { path: source });
        }

        let (_, candidate) = self.get_version(&source);
        let installed = self.resolver.resolve(Place::ZipArchiveFile, &[]);
        let (has_present, present) = self.get_version(&installed);

        Ok(UpdateOffer {
            source,
            present: has_present.then_some(present),
            candidate,
        })
    }

    /// Install from `path` (default inbox when `None`).
    ///
    /// Skipped entries are returned in the report rather than as an error;
    /// use [`InstallReport::into_result`] to treat them as a failure. The
    /// `temp` place is gone afterwards whatever the outcome, and the default
    /// inbox is consumed.
    pub fn apply(&self, path: Option<&Path>) -> Result<InstallReport> {
        let source = self.source_path(path);
        let scratch = ScratchDir::fresh(self.resolver.resolve(Place::Temp, &[]))?;
        let _consume = if source == self.inbox() {
            ConsumeOnDrop::new(&source)
        } else {
            ConsumeOnDrop::disarmed()
        };

        if !self.check_content(Some(&source)) {
            return Err(InstallError::ArchiveInvalid { path: source });
        }

        tracing::info!(source = %source.display(), "installing update");

        let main = self.resolver.main_root();
        fs::create_dir_all(&main).map_err(|e| cip_path::Error::Io {
            path: main.clone(),
            source: e,
        })?;

        let mut package = ZipPackage::open(&source)?;
        let extracted = package.extract_all(scratch.path())?;
        tracing::info!(
            files = extracted.files().count(),
            bytes = extracted.total_bytes,
            "update unpacked"
        );
        let manifest = Manifest::parse(&package.require_entry(MANIFEST_NAME)?)?;

        // Entry failures are collected, never fatal; later entries still run.
        let mut report = InstallReport::new();
        for entry in manifest.removals() {
            self.remove_entry(entry, &mut report);
        }
        for entry in manifest.copies() {
            self.copy_entry(entry, &mut report);
        }

        if report.is_empty() {
            self.archive_source(&source)?;
            tracing::info!(source = %source.display(), "update installed");
        } else {
            tracing::warn!(failed = report.len(), "update installed with errors");
        }

        Ok(report)
    }

    fn remove_entry(&self, entry: &str, report: &mut InstallReport) {
        let target = self.resolver.resolve(Place::Main, &[entry]);
        if entry.trim().is_empty() || !self.resolver.check_containment(&target, false) {
            report.removing(entry);
            return;
        }

        match cip_fs::remove_path(&target) {
            Ok(true) => tracing::debug!(path = %target.display(), "removed"),
            Ok(false) => {}
            Err(err) => {
                tracing::warn!(path = %target.display(), %err, "cannot remove");
                report.removing(entry);
            }
        }
    }

    fn copy_entry(&self, entry: &str, report: &mut InstallReport) {
        let src = self.resolver.resolve(Place::Temp, &[entry]);
        let dest = self.resolver.resolve(Place::Main, &[entry]);

        if entry.trim().is_empty()
            || !src.exists()
            || !self.resolver.check_containment(&src, true)
            || !self.resolver.check_containment(&dest, true)
        {
            report.copying(entry);
            return;
        }

        match cip_fs::overwrite_tree(&src, &dest) {
            Ok(()) => tracing::debug!(path = %dest.display(), "copied"),
            Err(err) => {
                tracing::warn!(path = %dest.display(), %err, "cannot copy");
                report.copying(entry);
            }
        }
    }

    /// Keep the applied archive in the `zip archive file` slot.
    fn archive_source(&self, source: &Path) -> Result<()> {
        let slot = self.resolver.resolve(Place::ZipArchiveFile, &[]);
        if is_same_file(source, &slot) {
            return Ok(());
        }

        if let Some(parent) = slot.parent() {
            fs::create_dir_all(parent).map_err(|e| cip_path::Error::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        cip_fs::atomic_copy(source, &slot, AtomicWriteOptions::new().sync(true))?;
        Ok(())
    }
}

fn read_manifest(path: &Path) -> Result<Option<Manifest>> {
    if !path.is_file() {
        return Ok(None);
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("zip") => {
            let mut package = ZipPackage::open(path)?;
            Ok(package
                .read_entry(MANIFEST_NAME)?
                .map(|bytes| Manifest::parse(&bytes))
                .transpose()?)
        }
        Some("xml") => {
            let bytes = cip_fs::atomic_read(path)?;
            Ok(Some(Manifest::parse(&bytes)?))
        }
        _ => Ok(None),
    }
}

fn is_same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
