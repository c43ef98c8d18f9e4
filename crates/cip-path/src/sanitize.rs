use std::path::{Component, Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;

use cip_fs::normalize_lexically;

static FORBIDDEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^-\w.]").expect("static regex"));

/// Clean one path segment: trim, whitespace to `_`, drop every char outside
/// `[-\w.]`. `\w` is Unicode-aware, so `Cześć` survives intact.
pub fn sanitize_segment(segment: &str) -> String {
    let underscored: String = segment
        .trim()
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect();
    FORBIDDEN.replace_all(&underscored, "").into_owned()
}

/// A caller parameter split on separators and cleaned piece by piece.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SanitizedParam {
    /// Root (and drive prefix) when the parameter was an absolute path.
    pub anchor: Option<PathBuf>,
    pub pieces: Vec<String>,
}

pub fn sanitize_param(param: &str) -> SanitizedParam {
    let trimmed = param.trim();
    let as_path = Path::new(trimmed);

    let anchor = as_path.has_root().then(|| {
        as_path
            .components()
            .take_while(|c| matches!(c, Component::Prefix(_) | Component::RootDir))
            .collect::<PathBuf>()
    });

    let pieces = trimmed
        .split(std::path::is_separator)
        .map(sanitize_segment)
        .filter(|piece| !piece.is_empty() && piece != ".")
        .filter(|piece| anchor.is_none() || !is_drive(piece))
        .collect();

    SanitizedParam { anchor, pieces }
}

fn is_drive(piece: &str) -> bool {
    cfg!(windows) && piece.len() == 2 && piece.ends_with(':')
}

/// Canonicalize the longest existing ancestor of `path` and re-append the
/// rest, so symlinks are resolved even for paths that do not exist yet.
pub fn canonicalize_lenient(path: &Path) -> PathBuf {
    let normalized = normalize_lexically(path);
    let mut existing = normalized.as_path();
    let mut tail = Vec::new();

    loop {
        if let Ok(real) = std::fs::canonicalize(existing) {
            let mut resolved = real;
            for part in tail.iter().rev() {
                resolved.push(part);
            }
            return normalize_lexically(&resolved);
        }
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                tail.push(name.to_os_string());
                existing = parent;
            }
            _ => return normalized,
        }
    }
}
