use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("can't find method to assemble path for place '{0}'")]
    UnknownPlace(String),

    #[error("unauthorized attempt to operate outside the CodeInPython folder tree: '{path}'")]
    Containment { path: PathBuf },

    #[error("invalid workspace root '{path}': {reason}")]
    InvalidRoot { path: PathBuf, reason: &'static str },

    #[error("failed to prepare '{path}': {source}")]
    Io { path: PathBuf, source: io::Error },
}

impl Error {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::UnknownPlace(_) => "ConfigurationError",
            Self::Containment { .. } => "ContainmentViolation",
            Self::InvalidRoot { .. } => "InvalidRoot",
            Self::Io { .. } => "IoError",
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
