use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use cip_fs::AtomicWriteOptions;

use crate::dir::settings_path;
use crate::error::{Error, Result};
use crate::settings::Settings;

/// Where settings are persisted. Construct once and pass it around.
#[derive(Clone, Debug)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `$CIP_CONFIG` or the platform config directory.
    pub fn from_env() -> Result<Self> {
        settings_path().map(Self::new).ok_or(Error::NoConfigDir)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the settings file; a missing file yields the defaults.
    pub fn load(&self) -> Result<Settings> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no settings file, using defaults");
                return Ok(Settings::default());
            }
            Err(e) => {
                return Err(Error::Read {
                    path: self.path.clone(),
                    source: e,
                });
            }
        };

        toml::from_str(&content).map_err(|e| Error::Parse {
            path: self.path.clone(),
            source: e,
        })
    }

    pub fn save(&self, settings: &Settings) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::Read {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let content = toml::to_string_pretty(settings)?;
        cip_fs::atomic_write(&self.path, content.as_bytes(), AtomicWriteOptions::new())?;
        tracing::debug!(path = %self.path.display(), "settings saved");
        Ok(())
    }
}
