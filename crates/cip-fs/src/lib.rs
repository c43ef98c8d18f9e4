//! Filesystem primitives used by the CodeInPython workspace.
//!
//! # Architecture
//!
//! - `primitives/atomic_write.rs` - Write or copy through a temporary sibling
//! - `primitives/copy_dir.rs` - Recursive overwrite copy keeping file times
//! - `primitives/normalize.rs` - Lexical `.`/`..` folding
//! - `primitives/remove.rs` - Absence-tolerant removal, empty folder pruning
//! - `scratch.rs` - Drop guards for scratch directories and consumed files

mod error;
pub mod primitives;
mod scratch;

pub use error::{Error, Result};
pub use primitives::{
    AtomicWriteOptions, atomic_copy, atomic_read, atomic_write, copy_dir_all, normalize_lexically,
    overwrite_tree, remove_empty_dirs, remove_path,
};
pub use scratch::{ConsumeOnDrop, ScratchDir};
