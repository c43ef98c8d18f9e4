use std::fmt;

use crate::error::{InstallError, Result};

/// A manifest entry that could not be applied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReportItem {
    Removing(String),
    Copying(String),
}

impl fmt::Display for ReportItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Removing(path) => write!(f, "- removing: {path}"),
            Self::Copying(path) => write!(f, "- copying: {path}"),
        }
    }
}

/// Entries skipped during an install, in processing order. Empty means the
/// whole manifest was applied.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InstallReport {
    items: Vec<ReportItem>,
}

impl InstallReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn removing(&mut self, path: impl Into<String>) {
        let path = path.into();
        tracing::warn!(%path, "cannot remove manifest entry");
        self.items.push(ReportItem::Removing(path));
    }

    pub fn copying(&mut self, path: impl Into<String>) {
        let path = path.into();
        tracing::warn!(%path, "cannot copy manifest entry");
        self.items.push(ReportItem::Copying(path));
    }

    pub fn items(&self) -> &[ReportItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// `Ok(())` for an empty report, [`InstallError::PartialInstall`] otherwise.
    pub fn into_result(self) -> Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(InstallError::PartialInstall(self))
        }
    }
}

impl fmt::Display for InstallReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "List of installation errors:")?;
        for item in &self.items {
            writeln!(f, "{item}")?;
        }
        Ok(())
    }
}
