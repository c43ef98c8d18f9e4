use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::place::{Place, Segment};
use crate::root::WorkspaceRoot;
use cip_fs::normalize_lexically;

use crate::sanitize::{canonicalize_lenient, sanitize_param, sanitize_segment};

/// Class and user the student places are bound to.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    class: String,
    user: String,
}

impl Session {
    pub fn new(class: &str, user: &str) -> Self {
        Self {
            class: sanitize_segment(class),
            user: sanitize_segment(user),
        }
    }

    pub fn class(&self) -> &str {
        &self.class
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn is_logged_in(&self) -> bool {
        !self.user.is_empty()
    }
}

/// Maps places to sanitized paths and guards the "main" folder tree.
///
/// Every path handed out is normalized: `..` resolved lexically, then
/// symlinks resolved on the longest existing ancestor. A path whose
/// canonical form is not inside the canonical `main` place fails
/// [`PathResolver::check_containment`].
#[derive(Clone, Debug)]
pub struct PathResolver {
    root: WorkspaceRoot,
    session: Session,
}

impl PathResolver {
    pub fn new(root: WorkspaceRoot, session: Session) -> Self {
        Self { root, session }
    }

    /// Same root, another class/user.
    pub fn with_session(&self, session: Session) -> Self {
        Self {
            root: self.root.clone(),
            session,
        }
    }

    pub fn root(&self) -> &WorkspaceRoot {
        &self.root
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Build the path for `place`. Parameters are split on separators and
    /// sanitized; the result is normalized but not checked.
    pub fn resolve(&self, place: Place, params: &[&str]) -> PathBuf {
        let mut path = self.root.path().to_path_buf();

        for segment in place.template() {
            match segment {
                Segment::Literal(name) => path.push(name),
                Segment::Class => push_piece(&mut path, &self.session.class),
                Segment::User => push_piece(&mut path, &self.session.user),
                Segment::Params => {
                    for param in params {
                        let param = sanitize_param(param);
                        if let Some(anchor) = param.anchor {
                            path = anchor;
                        }
                        for piece in &param.pieces {
                            path.push(piece);
                        }
                    }
                }
                Segment::AppendPyFile => {
                    let file_name = format!(
                        "{}.py",
                        path.file_name().unwrap_or_default().to_string_lossy()
                    );
                    path.push(file_name);
                }
            }
        }

        canonicalize_lenient(&path)
    }

    /// Resolve a place given by name; unknown names are configuration errors.
    pub fn resolve_named(&self, place: &str, params: &[&str]) -> Result<PathBuf> {
        Ok(self.resolve(place.parse()?, params))
    }

    /// Canonical form of the `main` place, the containment boundary.
    pub fn main_root(&self) -> PathBuf {
        self.resolve(Place::Main, &[])
    }

    /// Whether `path` stays inside the `main` place.
    ///
    /// With `allow_root_itself == false` the parent of `path` is checked
    /// instead, so `main` itself can never be the target (used before
    /// removals). A failure is logged as a security event.
    pub fn check_containment(&self, path: &Path, allow_root_itself: bool) -> bool {
        let limit = self.main_root();
        let candidate = canonicalize_lenient(&normalize_lexically(path));

        let checked = if allow_root_itself {
            Some(candidate.as_path())
        } else {
            candidate.parent()
        };

        let contained = checked.is_some_and(|p| p.starts_with(&limit));
        if !contained {
            tracing::error!(
                path = %path.display(),
                limit = %limit.display(),
                "unauthorized attempt to operate outside the CodeInPython folder tree"
            );
        }
        contained
    }

    /// `resolve` followed by a containment check; `None` means the operation
    /// is forbidden.
    pub fn resolve_checked(&self, place: Place, params: &[&str]) -> Option<PathBuf> {
        let path = self.resolve(place, params);
        self.check_containment(&path, true).then_some(path)
    }

    /// Like [`resolve_checked`](Self::resolve_checked) but as an error.
    pub fn require(&self, place: Place, params: &[&str]) -> Result<PathBuf> {
        let path = self.resolve(place, params);
        if self.check_containment(&path, true) {
            Ok(path)
        } else {
            Err(Error::Containment { path })
        }
    }
}

fn push_piece(path: &mut PathBuf, piece: &str) {
    if !piece.is_empty() {
        path.push(piece);
    }
}
