//! Zip access for update archives.
//!
//! # Architecture
//!
//! - `detect.rs` - Signature sniffing before the central directory is read
//! - `sanitize.rs` - Entry path sanitization (zip-slip prevention)
//! - `package.rs` - [`ZipPackage`]: membership, single-entry reads, full extraction
//! - `report.rs` - What an extraction wrote

pub use detect::{detect_from_reader, has_zip_signature};
pub use error::{Error, Result};
pub use package::ZipPackage;
pub use report::{ExtractReport, ExtractedEntry};
pub use sanitize::{SanitizedPath, sanitize_entry_path};

mod detect;
mod error;
mod package;
mod report;
mod sanitize;
