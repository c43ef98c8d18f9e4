use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read '{path}': {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to write '{path}': {source}")]
    Write { path: PathBuf, source: io::Error },

    #[error("failed to copy '{from}' to '{to}': {source}")]
    Copy {
        from: PathBuf,
        to: PathBuf,
        source: io::Error,
    },

    #[error("failed to remove '{path}': {source}")]
    Remove { path: PathBuf, source: io::Error },

    #[error("path not found: '{0}'")]
    NotFound(PathBuf),
}

impl Error {
    /// Kind name used in user-facing diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Read { .. } => "ReadError",
            Self::Write { .. } => "WriteError",
            Self::Copy { .. } => "CopyError",
            Self::Remove { .. } => "RemoveError",
            Self::NotFound(_) => "NotFound",
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
