//! Lesson catalog: which folders are openable lessons, the examples tree, a
//! student's own lessons, and the operations that add, trash or create them.
//!
//! # Architecture
//!
//! - `status.rs` - [`check_lesson`] and the shared label rules
//! - `tree.rs` - [`example_tree`] over the examples places
//! - `student.rs` - [`student_lessons`] for the logged-in user
//! - `ops.rs` - Filesystem changes confined to the student places

mod error;
mod ops;
mod status;
mod student;
mod tree;

pub use error::{Error, Result};
pub use ops::{TRASH_STAMP, add_example, create_private_lesson, remove_lesson};
pub use status::{LessonStatus, check_lesson};
pub use student::{LessonEntry, student_lessons};
pub use tree::{ExampleNode, example_tree};
