use std::path::{Component, Path, PathBuf};

use cip_fs::normalize_lexically;

use crate::error::{Error, Result};

/// Result of sanitizing an archive entry path.
#[derive(Clone, Debug)]
pub struct SanitizedPath {
    pub original: PathBuf,
    pub resolved: PathBuf,
}

/// Resolve an archive entry name below `base`, refusing anything that would
/// land outside it.
pub fn sanitize_entry_path(entry_path: impl AsRef<Path>, base: impl AsRef<Path>) -> Result<SanitizedPath> {
    let entry_path = entry_path.as_ref();
    let base = normalize_lexically(base);

    // Absolute entries and drive prefixes would replace `base` on join
    let anchored = entry_path
        .components()
        .any(|c| matches!(c, Component::Prefix(_) | Component::RootDir));
    if anchored {
        return Err(Error::ZipSlip {
            entry: entry_path.to_path_buf(),
            resolved: normalize_lexically(entry_path),
        });
    }

    // Normalize after joining so leading `..` climbs out of `base` and is caught
    let resolved = normalize_lexically(base.join(entry_path));
    if !resolved.starts_with(&base) {
        return Err(Error::ZipSlip {
            entry: entry_path.to_path_buf(),
            resolved,
        });
    }

    Ok(SanitizedPath {
        original: entry_path.to_path_buf(),
        resolved,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> &'static Path {
        if cfg!(windows) {
            Path::new("C:/mu_code/codeinpython_env/temp")
        } else {
            Path::new("/mu_code/codeinpython_env/temp")
        }
    }

    #[test]
    fn entry_below_base() {
        let result = sanitize_entry_path("examples/robot/robot.py", base()).unwrap();
        assert_eq!(result.original, Path::new("examples/robot/robot.py"));
        assert_eq!(
            result.resolved.strip_prefix(base()).unwrap(),
            Path::new("examples/robot/robot.py")
        );
    }

    #[test]
    fn absolute_entry_rejected() {
        let malicious = if cfg!(windows) { "C:\\etc\\passwd" } else { "/etc/passwd" };
        assert!(matches!(
            sanitize_entry_path(malicious, base()),
            Err(Error::ZipSlip { .. })
        ));
    }

    #[test]
    fn parent_escape_rejected() {
        assert!(matches!(
            sanitize_entry_path("../../codeinpython_env/evil.py", base()),
            Err(Error::ZipSlip { .. })
        ));
    }

    #[test]
    fn parent_escape_into_sibling_rejected() {
        assert!(matches!(
            sanitize_entry_path("../workspace/evil.py", base()),
            Err(Error::ZipSlip { .. })
        ));
    }

    #[test]
    fn inner_parent_is_fine() {
        let result = sanitize_entry_path("a/../b.py", base()).unwrap();
        assert_eq!(result.resolved, base().join("b.py"));
    }
}
