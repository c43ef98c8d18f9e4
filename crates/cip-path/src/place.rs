use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

pub const MAIN_DIR: &str = "codeinpython_env";
pub const WORKSPACE_DIR: &str = "workspace";
pub const ARCHIVE_DIR: &str = "archive";
pub const EXAMPLES_DIR: &str = "examples";
pub const CUSTOM_EXAMPLES_DIR: &str = "custom_examples";
pub const PRIVATE_DIR: &str = "private";
pub const TRASH_DIR: &str = "trash";
pub const TEMP_DIR: &str = "temp";
pub const LIBRARIES_DIR: &str = "code_lib";
pub const MU_MODULES_DIR: &str = "mu_modules";
pub const FIRMWARE_DIR: &str = "firmware";

/// Name of an update archive, both in the inbox and in the archive slot.
pub const UPDATE_ZIP_NAME: &str = "codeinpython_update.zip";
/// Manifest inside every update archive.
pub const MANIFEST_NAME: &str = "codeinpython_config.xml";
/// Optional per-lesson metadata file.
pub const DESCRIPTION_NAME: &str = "description.xml";

/// One element of a place template.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Segment {
    Literal(&'static str),
    /// The session's class name.
    Class,
    /// The session's user name.
    User,
    /// Caller-supplied parameters, in order.
    Params,
    /// `<basename of the path so far>.py`
    AppendPyFile,
}

use Segment::{AppendPyFile, Class, Literal, Params, User};

/// Symbolic locations under the workspace root.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Place {
    Main,
    Workspace,
    Class,
    Student,
    StudentFile,
    StudentPrivate,
    StudentPrivateFile,
    Examples,
    CustomExamples,
    ZipInstall,
    ZipInstallDefaultFile,
    ZipArchive,
    ZipArchiveFile,
    Temp,
    Libraries,
    Firmware,
    MuModules,
}

impl Place {
    pub const ALL: [Place; 17] = [
        Place::Main,
        Place::Workspace,
        Place::Class,
        Place::Student,
        Place::StudentFile,
        Place::StudentPrivate,
        Place::StudentPrivateFile,
        Place::Examples,
        Place::CustomExamples,
        Place::ZipInstall,
        Place::ZipInstallDefaultFile,
        Place::ZipArchive,
        Place::ZipArchiveFile,
        Place::Temp,
        Place::Libraries,
        Place::Firmware,
        Place::MuModules,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Place::Main => "main",
            Place::Workspace => "workspace",
            Place::Class => "class",
            Place::Student => "student",
            Place::StudentFile => "student file",
            Place::StudentPrivate => "student private",
            Place::StudentPrivateFile => "student private file",
            Place::Examples => "examples",
            Place::CustomExamples => "custom examples",
            Place::ZipInstall => "zip install",
            Place::ZipInstallDefaultFile => "zip install default file",
            Place::ZipArchive => "zip archive",
            Place::ZipArchiveFile => "zip archive file",
            Place::Temp => "temp",
            Place::Libraries => "libraries",
            Place::Firmware => "firmware",
            Place::MuModules => "mu modules",
        }
    }

    /// Template below the workspace root.
    pub fn template(self) -> &'static [Segment] {
        const MAIN: Segment = Literal(MAIN_DIR);
        const WS: Segment = Literal(WORKSPACE_DIR);
        match self {
            Place::Main | Place::ZipInstall => &[MAIN, Params],
            Place::Workspace => &[MAIN, WS, Params],
            Place::Class => &[MAIN, WS, Class, Params],
            Place::Student => &[MAIN, WS, Class, User, Params],
            Place::StudentFile => &[MAIN, WS, Class, User, Params, AppendPyFile],
            Place::StudentPrivate => &[MAIN, WS, Class, User, Literal(PRIVATE_DIR), Params],
            Place::StudentPrivateFile => &[
                MAIN,
                WS,
                Class,
                User,
                Literal(PRIVATE_DIR),
                Params,
                AppendPyFile,
            ],
            Place::Examples => &[MAIN, Literal(EXAMPLES_DIR), Params],
            Place::CustomExamples => &[MAIN, Literal(CUSTOM_EXAMPLES_DIR), Params],
            Place::ZipInstallDefaultFile => &[MAIN, Literal(UPDATE_ZIP_NAME)],
            Place::ZipArchive => &[MAIN, Literal(ARCHIVE_DIR), Params],
            Place::ZipArchiveFile => &[MAIN, Literal(ARCHIVE_DIR), Literal(UPDATE_ZIP_NAME)],
            Place::Temp => &[MAIN, Literal(TEMP_DIR), Params],
            Place::Libraries => &[MAIN, Literal(LIBRARIES_DIR), Params],
            Place::Firmware => &[MAIN, Literal(FIRMWARE_DIR), Params],
            Place::MuModules => &[MAIN, Literal(MU_MODULES_DIR), Params],
        }
    }

    /// Whether the template depends on a logged-in user.
    pub fn needs_user(self) -> bool {
        self.template().contains(&User)
    }
}

impl FromStr for Place {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().replace('_', " ");
        Place::ALL
            .into_iter()
            .find(|place| place.name() == wanted)
            .ok_or_else(|| Error::UnknownPlace(s.to_string()))
    }
}

impl fmt::Display for Place {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
