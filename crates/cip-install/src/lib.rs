//! Installation of update archives into the CodeInPython folder tree.
//!
//! # Architecture
//!
//! - `installer.rs` - [`ArchiveInstaller`]: validation, version lookup, apply
//! - `report.rs` - Entries skipped during an install
//! - `error.rs` - [`InstallError`] with user-facing messages

mod error;
mod installer;
mod report;

pub use error::{InstallError, Result};
pub use installer::{ArchiveInstaller, UpdateOffer};
pub use report::{InstallReport, ReportItem};
