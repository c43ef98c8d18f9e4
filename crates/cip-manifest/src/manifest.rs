use crate::element::{Element, parse_document};
use crate::error::Result;
use crate::localized::{FALLBACK_LANG, pick_localized};

/// Shown wherever a version field is unknown.
pub const PLACEHOLDER: &str = "----";

/// One entry of the manifest's `update` section.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UpdateOp {
    /// Path relative to the install root to delete.
    Remove(String),
    /// Path relative to both the extracted archive and the install root.
    Copy(String),
}

impl UpdateOp {
    pub fn path(&self) -> &str {
        match self {
            Self::Remove(path) | Self::Copy(path) => path,
        }
    }
}

/// The update archive's `codeinpython_config.xml`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Manifest {
    pub release: Option<String>,
    pub release_date: Option<String>,
    /// `description` elements in document order, one per language line.
    pub descriptions: Vec<Element>,
    /// Every `update` section's entries, in document order.
    pub update: Vec<UpdateOp>,
}

impl Manifest {
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let root = parse_document(bytes)?;
        let mut manifest = Manifest::default();

        for child in &root.children {
            match child.tag.as_str() {
                "release" => manifest.release = child.text.clone(),
                "release_date" => manifest.release_date = child.text.clone(),
                "description" => manifest.descriptions.push(child.clone()),
                "update" => {
                    for entry in &child.children {
                        let path = entry.text.clone().unwrap_or_default();
                        match entry.tag.as_str() {
                            "remove" => manifest.update.push(UpdateOp::Remove(path)),
                            "copy" => manifest.update.push(UpdateOp::Copy(path)),
                            other => tracing::debug!(tag = other, "ignoring unknown update entry"),
                        }
                    }
                }
                _ => {}
            }
        }

        Ok(manifest)
    }

    pub fn has_release(&self) -> bool {
        self.release.as_deref().is_some_and(|r| !r.trim().is_empty())
    }

    /// Description lines in `lang` (or the fallback), joined with newlines.
    pub fn description(&self, lang: &str) -> Option<String> {
        pick_localized(&self.descriptions, "description", Some(lang), FALLBACK_LANG, "\n")
    }

    pub fn removals(&self) -> impl Iterator<Item = &str> {
        self.update.iter().filter_map(|op| match op {
            UpdateOp::Remove(path) => Some(path.as_str()),
            UpdateOp::Copy(_) => None,
        })
    }

    pub fn copies(&self) -> impl Iterator<Item = &str> {
        self.update.iter().filter_map(|op| match op {
            UpdateOp::Copy(path) => Some(path.as_str()),
            UpdateOp::Remove(_) => None,
        })
    }

    pub fn version(&self, lang: &str) -> VersionInfo {
        VersionInfo {
            release: self.release.clone().unwrap_or_else(|| PLACEHOLDER.to_string()),
            date: self
                .release_date
                .clone()
                .unwrap_or_else(|| PLACEHOLDER.to_string()),
            description: self
                .description(lang)
                .unwrap_or_else(|| PLACEHOLDER.to_string()),
        }
    }
}

/// Release, date and description of an installed or candidate archive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VersionInfo {
    pub release: String,
    pub date: String,
    pub description: String,
}

impl Default for VersionInfo {
    fn default() -> Self {
        Self {
            release: PLACEHOLDER.to_string(),
            date: PLACEHOLDER.to_string(),
            description: PLACEHOLDER.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &[u8] = br#"<?xml version="1.0" encoding="UTF-8"?>
<codeinpython>
    <release>3.2</release>
    <release_date>2024-09-01</release_date>
    <description lang="en">New robot lessons</description>
    <description lang="pl">Nowe lekcje z robotem</description>
    <description lang="pl">Poprawki w przykladach</description>
    <update>
        <copy>examples/robot</copy>
        <remove>examples/old_robot</remove>
        <copy>code_lib/robot.py</copy>
        <remove>firmware/v1.bin</remove>
    </update>
</codeinpython>"#;

    #[test]
    fn parse_full_manifest() {
        let manifest = Manifest::parse(MANIFEST).unwrap();
        assert_eq!(manifest.release.as_deref(), Some("3.2"));
        assert_eq!(manifest.release_date.as_deref(), Some("2024-09-01"));
        assert!(manifest.has_release());
        assert_eq!(manifest.update.len(), 4);
    }

    #[test]
    fn removals_and_copies_keep_document_order() {
        let manifest = Manifest::parse(MANIFEST).unwrap();
        assert_eq!(
            manifest.removals().collect::<Vec<_>>(),
            vec!["examples/old_robot", "firmware/v1.bin"]
        );
        assert_eq!(
            manifest.copies().collect::<Vec<_>>(),
            vec!["examples/robot", "code_lib/robot.py"]
        );
    }

    #[test]
    fn localized_description() {
        let manifest = Manifest::parse(MANIFEST).unwrap();
        assert_eq!(
            manifest.description("pl").as_deref(),
            Some("Nowe lekcje z robotem\nPoprawki w przykladach")
        );
        assert_eq!(manifest.description("de").as_deref(), Some("New robot lessons"));
    }

    #[test]
    fn version_placeholders() {
        let manifest = Manifest::parse(b"<codeinpython><update/></codeinpython>").unwrap();
        assert!(!manifest.has_release());
        assert_eq!(manifest.version("pl"), VersionInfo::default());
    }

    #[test]
    fn version_fields() {
        let version = Manifest::parse(MANIFEST).unwrap().version("en");
        assert_eq!(version.release, "3.2");
        assert_eq!(version.date, "2024-09-01");
        assert_eq!(version.description, "New robot lessons");
    }

    #[test]
    fn empty_release_does_not_count() {
        let manifest = Manifest::parse(b"<c><release>  </release></c>").unwrap();
        assert!(!manifest.has_release());
    }
}
