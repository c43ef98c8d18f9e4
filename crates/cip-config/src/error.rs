use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("cannot locate a configuration directory")]
    NoConfigDir,

    #[error("failed to read settings '{path}': {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("settings file '{path}' is malformed: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error(transparent)]
    Fs(#[from] cip_fs::Error),
}

impl Error {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::NoConfigDir => "NoConfigDir",
            Self::Read { .. } => "ReadError",
            Self::Parse { .. } => "ParseError",
            Self::Serialize(_) => "SerializeError",
            Self::Fs(err) => err.kind_name(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
