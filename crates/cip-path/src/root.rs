use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Env var overriding the workspace root.
pub const ROOT_ENV: &str = "CIP_ROOT";
/// Folder name of the editor's default code directory in the home folder.
pub const DEFAULT_ROOT_DIR: &str = "mu_code";

/// The single absolute directory every managed path lives under.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkspaceRoot(PathBuf);

impl WorkspaceRoot {
    /// Make `path` absolute and create it when missing.
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(Error::InvalidRoot {
                path: path.to_path_buf(),
                reason: "empty path",
            });
        }

        let absolute = std::path::absolute(path).map_err(|e| Error::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        std::fs::create_dir_all(&absolute).map_err(|e| Error::Io {
            path: absolute.clone(),
            source: e,
        })?;

        if !absolute.is_dir() {
            return Err(Error::InvalidRoot {
                path: absolute,
                reason: "not a directory",
            });
        }

        Ok(Self(absolute))
    }

    /// `$CIP_ROOT`, else `~/mu_code`.
    pub fn from_env() -> Result<Self> {
        match std::env::var_os(ROOT_ENV) {
            Some(root) if !root.is_empty() => Self::new(PathBuf::from(root)),
            _ => {
                let home = home::home_dir().ok_or(Error::InvalidRoot {
                    path: PathBuf::from("~"),
                    reason: "home directory is unknown",
                })?;
                Self::new(home.join(DEFAULT_ROOT_DIR))
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}

impl AsRef<Path> for WorkspaceRoot {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}
