use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid user name '{0}': use up to 20 of 0-9 A-Z a-z _ + = -")]
    InvalidUser(String),

    #[error("failed to prepare '{path}': {source}")]
    Io { path: PathBuf, source: io::Error },

    #[error(transparent)]
    Path(#[from] cip_path::Error),

    #[error(transparent)]
    Install(#[from] cip_install::InstallError),

    #[error(transparent)]
    Lesson(#[from] cip_lesson::Error),

    #[error(transparent)]
    Config(#[from] cip_config::Error),

    #[error(transparent)]
    Fs(#[from] cip_fs::Error),
}

impl Error {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::InvalidUser(_) => "InvalidUser",
            Self::Io { .. } => "IoError",
            Self::Path(err) => err.kind_name(),
            Self::Install(err) => err.kind_name(),
            Self::Lesson(err) => err.kind_name(),
            Self::Config(err) => err.kind_name(),
            Self::Fs(err) => err.kind_name(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
