//! Sandboxed path resolution for the CodeInPython folder tree.
//!
//! # Architecture
//!
//! - `place.rs` - Symbolic places and their segment templates
//! - `sanitize.rs` - Parameter cleaning and path normalization
//! - `resolver.rs` - Place resolution and the containment check
//! - `root.rs` - The workspace root every place lives under

mod error;
pub mod place;
mod resolver;
mod root;
mod sanitize;

pub use error::{Error, Result};
pub use place::{DESCRIPTION_NAME, MANIFEST_NAME, Place, UPDATE_ZIP_NAME};
pub use resolver::{PathResolver, Session};
pub use root::{ROOT_ENV, WorkspaceRoot};
pub use sanitize::{canonicalize_lenient, sanitize_segment};
