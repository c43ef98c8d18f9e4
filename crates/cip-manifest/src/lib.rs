//! Parsing of the update manifest (`codeinpython_config.xml`) and of lesson
//! descriptions (`description.xml`).
//!
//! Both formats list the same element once per language (`lang` attribute);
//! [`pick_localized`] chooses which variant to show.

mod description;
mod element;
mod error;
mod localized;
mod manifest;

pub use description::LessonDescription;
pub use element::{Element, parse_document};
pub use error::{ParseError, Result};
pub use localized::{FALLBACK_LANG, pick_localized};
pub use manifest::{Manifest, PLACEHOLDER, UpdateOp, VersionInfo};
