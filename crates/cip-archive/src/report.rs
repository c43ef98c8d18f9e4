use std::path::PathBuf;

/// What [`crate::ZipPackage::extract_all`] wrote to disk.
#[derive(Clone, Debug, Default)]
pub struct ExtractReport {
    pub entry_count: usize,
    pub total_bytes: u64,
    pub entries: Vec<ExtractedEntry>,
}

#[derive(Clone, Debug)]
pub struct ExtractedEntry {
    pub original_path: PathBuf,
    pub target_path: PathBuf,
    pub size: u64,
    pub permissions: Option<u32>,
    pub is_directory: bool,
}

impl ExtractReport {
    pub(crate) fn push(&mut self, entry: ExtractedEntry) {
        self.entry_count += 1;
        self.total_bytes += entry.size;
        self.entries.push(entry);
    }

    pub fn files(&self) -> impl Iterator<Item = &ExtractedEntry> {
        self.entries.iter().filter(|e| !e.is_directory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(path: &str, size: u64, is_directory: bool) -> ExtractedEntry {
        ExtractedEntry {
            original_path: PathBuf::from(path),
            target_path: PathBuf::from("/tmp/out").join(path),
            size,
            permissions: None,
            is_directory,
        }
    }

    #[test]
    fn push_accumulates_totals() {
        let mut report = ExtractReport::default();
        report.push(entry("examples", 0, true));
        report.push(entry("examples/a.py", 120, false));
        report.push(entry("examples/b.py", 30, false));

        assert_eq!(report.entry_count, 3);
        assert_eq!(report.total_bytes, 150);
        assert_eq!(report.files().count(), 2);
    }
}
