pub mod atomic_write;
pub mod copy_dir;
pub mod normalize;
pub mod remove;

pub use atomic_write::{AtomicWriteOptions, atomic_copy, atomic_read, atomic_write};
pub use copy_dir::{copy_dir_all, overwrite_tree};
pub use normalize::normalize_lexically;
pub use remove::{remove_empty_dirs, remove_path};
