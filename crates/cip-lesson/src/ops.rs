use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use once_cell::sync::Lazy;
use regex::Regex;

use cip_path::place::TRASH_DIR;
use cip_path::{DESCRIPTION_NAME, PathResolver, Place, canonicalize_lenient};

use crate::error::{Error, Result};

/// Folder name format inside the student's trash.
pub const TRASH_STAMP: &str = "%Y_%m_%d %H-%M-%S";

static LESSON_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9A-Za-z_+=-]{1,20}$").expect("lesson name pattern is valid"));

fn require_login(resolver: &PathResolver) -> Result<()> {
    if resolver.session().is_logged_in() {
        Ok(())
    } else {
        Err(Error::NotLoggedIn)
    }
}

/// Copy an example folder into the student place, keeping its location
/// relative to `main`. An existing copy is replaced only with `overwrite`.
pub fn add_example(resolver: &PathResolver, example_dir: &Path, overwrite: bool) -> Result<PathBuf> {
    require_login(resolver)?;

    let example = canonicalize_lenient(example_dir);
    if !example.is_dir() {
        return Err(Error::NotFound(example));
    }

    let main = resolver.main_root();
    let rel = match example.strip_prefix(&main) {
        Ok(rel) if !rel.as_os_str().is_empty() => rel.to_string_lossy().into_owned(),
        _ => return Err(cip_path::Error::Containment { path: example }.into()),
    };

    let dest = resolver.require(Place::Student, &[rel.as_str()])?;
    if dest.exists() {
        if !overwrite {
            return Err(Error::AlreadyExists(dest));
        }
        cip_fs::remove_path(&dest)?;
    }

    cip_fs::copy_dir_all(&example, &dest)?;
    tracing::info!(example = %example.display(), dest = %dest.display(), "example added");
    Ok(dest)
}

/// Move a lesson into `student/trash/<timestamp>/` and prune the folders it
/// leaves empty. Returns the lesson's new location.
pub fn remove_lesson(resolver: &PathResolver, lesson_dir: &Path, now: NaiveDateTime) -> Result<PathBuf> {
    require_login(resolver)?;

    let student = resolver.resolve(Place::Student, &[]);
    let lesson = canonicalize_lenient(lesson_dir);
    if lesson == student || !lesson.starts_with(&student) || !resolver.check_containment(&lesson, false) {
        return Err(cip_path::Error::Containment { path: lesson }.into());
    }
    if !lesson.is_dir() {
        return Err(Error::NotFound(lesson));
    }

    let stamp = now.format(TRASH_STAMP).to_string();
    let trash = resolver.require(Place::Student, &[TRASH_DIR, stamp.as_str()])?;
    fs::create_dir_all(&trash).map_err(|e| Error::Create {
        path: trash.clone(),
        source: e,
    })?;

    let name = lesson.file_name().unwrap_or_default();
    let dest = trash.join(name);
    move_dir(&lesson, &dest)?;

    let pruned = cip_fs::remove_empty_dirs(&student, &[DESCRIPTION_NAME])?;
    tracing::info!(lesson = %lesson.display(), trash = %dest.display(), pruned, "lesson removed");
    Ok(dest)
}

fn move_dir(from: &Path, to: &Path) -> Result<()> {
    if fs::rename(from, to).is_ok() {
        return Ok(());
    }
    cip_fs::copy_dir_all(from, to)?;
    cip_fs::remove_path(from)?;
    Ok(())
}

/// Create an empty `student private/<name>/<name>.py`. A trailing extension
/// on `name` is dropped before validation.
pub fn create_private_lesson(resolver: &PathResolver, name: &str, overwrite: bool) -> Result<PathBuf> {
    require_login(resolver)?;

    let stem = match name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => name,
    };
    if !LESSON_NAME.is_match(stem) {
        return Err(Error::InvalidName(name.to_string()));
    }

    let dir = resolver.require(Place::StudentPrivate, &[stem])?;
    let file = dir.join(format!("{stem}.py"));
    if file.exists() {
        if !overwrite {
            return Err(Error::AlreadyExists(file));
        }
        cip_fs::remove_path(&dir)?;
    }

    fs::create_dir_all(&dir).map_err(|e| Error::Create {
        path: dir.clone(),
        source: e,
    })?;
    fs::File::create(&file).map_err(|e| Error::Create {
        path: file.clone(),
        source: e,
    })?;

    tracing::info!(path = %file.display(), "private lesson created");
    Ok(file)
}
