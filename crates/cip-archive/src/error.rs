use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("not a regular file: '{0}'")]
    NotAFile(PathBuf),

    #[error("not a zip archive: '{0}'")]
    NotZip(PathBuf),

    #[error("archive is corrupted: {0}")]
    Corrupted(String),

    #[error("entry '{entry}' is missing from the archive")]
    MissingEntry { entry: String },

    #[error("zip-slip attack detected: entry '{entry}' resolves to '{resolved}'")]
    ZipSlip { entry: PathBuf, resolved: PathBuf },

    #[error("entry path is not valid: '{0}'")]
    InvalidPath(String),

    #[error("failed to extract '{path}': {source}")]
    ExtractionFailed { path: PathBuf, source: io::Error },

    #[error("failed to create directory: {path}: {source}")]
    DirectoryCreationFailed { path: PathBuf, source: io::Error },

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl Error {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::NotAFile(_) => "NotAFile",
            Self::NotZip(_) => "BadZipFile",
            Self::Corrupted(_) => "BadZipFile",
            Self::MissingEntry { .. } => "KeyError",
            Self::ZipSlip { .. } => "ZipSlip",
            Self::InvalidPath(_) => "InvalidPath",
            Self::ExtractionFailed { .. } => "ExtractionFailed",
            Self::DirectoryCreationFailed { .. } => "DirectoryCreationFailed",
            Self::Io(_) => "IOError",
        }
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(e) => Self::Io(e),
            other => Self::Corrupted(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
