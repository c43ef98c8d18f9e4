use std::path::{Component, Path, PathBuf};

/// Resolve `.` and `..` without touching the filesystem. A `..` at the top
/// of a relative path is dropped.
pub fn normalize_lexically(path: impl AsRef<Path>) -> PathBuf {
    let mut result = PathBuf::new();

    for component in path.as_ref().components() {
        match component {
            Component::ParentDir => {
                result.pop();
            }
            Component::Normal(part) => result.push(part),
            Component::RootDir => result.push(component.as_os_str()),
            Component::Prefix(prefix) => result.push(prefix.as_os_str()),
            Component::CurDir => {}
        }
    }

    result
}
