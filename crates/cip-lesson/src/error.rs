use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("no user is logged in")]
    NotLoggedIn,

    #[error("can't find such lesson: '{0}'")]
    NotFound(PathBuf),

    #[error("this lesson already exists: '{0}'")]
    AlreadyExists(PathBuf),

    #[error("invalid lesson name '{0}': use up to 20 of 0-9 A-Z a-z _ + = -")]
    InvalidName(String),

    #[error("failed to create '{path}': {source}")]
    Create { path: PathBuf, source: io::Error },

    #[error(transparent)]
    Path(#[from] cip_path::Error),

    #[error(transparent)]
    Fs(#[from] cip_fs::Error),
}

impl Error {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::NotLoggedIn => "NotLoggedIn",
            Self::NotFound(_) => "NotFound",
            Self::AlreadyExists(_) => "AlreadyExists",
            Self::InvalidName(_) => "InvalidName",
            Self::Create { .. } => "CreateError",
            Self::Path(err) => err.kind_name(),
            Self::Fs(err) => err.kind_name(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
