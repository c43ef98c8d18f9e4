use crate::element::{Element, parse_document};
use crate::error::Result;

/// A lesson folder's `description.xml`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LessonDescription {
    root: Element,
}

impl LessonDescription {
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        parse_document(bytes).map(|root| Self { root })
    }

    pub fn title(&self, lang: &str) -> Option<String> {
        self.root.localized("title", Some(lang), " ")
    }

    pub fn description(&self, lang: &str) -> Option<String> {
        self.root.localized("description", Some(lang), " ")
    }

    pub fn tooltip(&self, lang: &str) -> Option<String> {
        self.root.localized("tooltip", Some(lang), "\n")
    }

    pub fn start_file(&self, lang: &str) -> Option<String> {
        self.root.localized("start_file", Some(lang), "")
    }

    /// `<locked>True</locked>` marks a lesson that must not be opened.
    pub fn is_locked(&self) -> bool {
        self.root.localized("locked", None, "").as_deref() == Some("True")
    }
}
