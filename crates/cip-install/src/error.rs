use std::path::PathBuf;

use crate::report::InstallReport;

#[derive(Debug, thiserror::Error)]
pub enum InstallError {
    #[error("This is not proper archive from CodeInPython")]
    ArchiveInvalid { path: PathBuf },

    #[error("{0}")]
    PartialInstall(InstallReport),

    #[error("Cannot install from this zip file:\n{kind}: \"{message}\"")]
    Extraction { kind: String, message: String },

    #[error(transparent)]
    Path(#[from] cip_path::Error),
}

impl InstallError {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::ArchiveInvalid { .. } => "ArchiveInvalid",
            Self::PartialInstall(_) => "PartialInstall",
            Self::Extraction { .. } => "Extraction",
            Self::Path(err) => err.kind_name(),
        }
    }
}

impl From<cip_archive::Error> for InstallError {
    fn from(err: cip_archive::Error) -> Self {
        Self::Extraction {
            kind: err.kind_name().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<cip_fs::Error> for InstallError {
    fn from(err: cip_fs::Error) -> Self {
        Self::Extraction {
            kind: err.kind_name().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<cip_manifest::ParseError> for InstallError {
    fn from(err: cip_manifest::ParseError) -> Self {
        Self::Extraction {
            kind: err.kind_name().to_string(),
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, InstallError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extraction_message_names_the_kind() {
        let err = InstallError::from(cip_archive::Error::Corrupted("bad header".into()));
        assert_eq!(
            err.to_string(),
            "Cannot install from this zip file:\nBadZipFile: \"archive is corrupted: bad header\""
        );
    }

    #[test]
    fn invalid_archive_message() {
        let err = InstallError::ArchiveInvalid {
            path: PathBuf::from("update.zip"),
        };
        assert_eq!(err.to_string(), "This is not proper archive from CodeInPython");
    }
}
