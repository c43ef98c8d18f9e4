//! CodeInPython workspace core.
//!
//! [`Mode`] ties the pieces together: path resolution (`cip-path`), update
//! archives (`cip-install`), the lesson catalog (`cip-lesson`), settings
//! (`cip-config`) and the device add-on boundary in [`device`].

pub mod device;
mod error;
mod mode;

pub use error::{Error, Result};
pub use mode::{Mode, PREPARED_PLACES, SEARCH_PATH_FILE};

pub use cip_config::{Settings, SettingsStore};
pub use cip_install::{ArchiveInstaller, InstallError, InstallReport, UpdateOffer};
pub use cip_lesson::{ExampleNode, LessonEntry, LessonStatus};
pub use cip_path::{PathResolver, Place, Session, WorkspaceRoot};
