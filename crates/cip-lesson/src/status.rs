use std::fs;
use std::path::{MAIN_SEPARATOR, Path, PathBuf};

use cip_manifest::LessonDescription;
use cip_path::DESCRIPTION_NAME;

/// Whether a lesson folder can be opened.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LessonStatus {
    /// Not locked and its start file exists.
    Ready { start_file: PathBuf },
    /// Locked, unreadable description, or start file missing.
    Locked { start_file: PathBuf },
    /// Not a directory.
    Missing,
}

impl LessonStatus {
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready { .. })
    }

    pub fn start_file(&self) -> Option<&Path> {
        match self {
            Self::Ready { start_file } | Self::Locked { start_file } => Some(start_file),
            Self::Missing => None,
        }
    }
}

/// State of a folder's `description.xml`.
pub(crate) enum Description {
    Absent,
    Broken,
    Parsed(LessonDescription),
}

impl Description {
    pub(crate) fn read(dir: &Path) -> Self {
        let file = dir.join(DESCRIPTION_NAME);
        if !file.exists() {
            return Self::Absent;
        }

        match fs::read(&file).map(|bytes| LessonDescription::parse(&bytes)) {
            Ok(Ok(description)) => Self::Parsed(description),
            Ok(Err(err)) => {
                tracing::debug!(path = %file.display(), %err, "broken lesson description");
                Self::Broken
            }
            Err(err) => {
                tracing::debug!(path = %file.display(), %err, "unreadable lesson description");
                Self::Broken
            }
        }
    }
}

/// Display text and flags shared by the example tree and the lesson list.
pub(crate) struct Labelled {
    pub label: String,
    pub tooltip: Option<String>,
    pub locked: bool,
    pub broken: bool,
    pub described: bool,
}

/// `title\n  description`, falling back to the folder name and `./rel`.
pub(crate) fn label(dir: &Path, name: &str, rel: &Path, lang: &str) -> Labelled {
    let location = format!(".{MAIN_SEPARATOR}{}", rel.display());

    match Description::read(dir) {
        Description::Parsed(desc) => Labelled {
            label: format!(
                "{}\n  {}",
                desc.title(lang).unwrap_or_else(|| name.to_string()),
                desc.description(lang).unwrap_or(location)
            ),
            tooltip: desc.tooltip(lang),
            locked: desc.is_locked(),
            broken: false,
            described: true,
        },
        Description::Broken => Labelled {
            label: format!("!!!> {name}\n  {location}"),
            tooltip: None,
            locked: true,
            broken: true,
            described: true,
        },
        Description::Absent => Labelled {
            label: format!("{name}\n  {location}"),
            tooltip: None,
            locked: false,
            broken: false,
            described: false,
        },
    }
}

/// Decide whether `dir` is an openable lesson and which file starts it.
///
/// The start file is the localized `start_file` of the description, or
/// `<dirname>.py`; only its file name is used so it always sits directly in
/// `dir`.
pub fn check_lesson(dir: &Path, lang: &str) -> LessonStatus {
    if !dir.is_dir() {
        return LessonStatus::Missing;
    }

    let (locked, start_file) = match Description::read(dir) {
        Description::Absent => (false, None),
        Description::Broken => (true, None),
        Description::Parsed(desc) => (desc.is_locked(), desc.start_file(lang)),
    };

    let start_file = start_file
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| {
            format!(
                "{}.py",
                dir.file_name().unwrap_or_default().to_string_lossy()
            )
        });
    let file_name = Path::new(&start_file)
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    let start_file = dir.join(file_name);

    if locked || !start_file.is_file() {
        LessonStatus::Locked { start_file }
    } else {
        LessonStatus::Ready { start_file }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_directory() {
        let dir = tempdir().unwrap();
        assert_eq!(check_lesson(&dir.path().join("nope"), "pl"), LessonStatus::Missing);
    }

    #[test]
    fn ready_with_default_start_file() {
        let dir = tempdir().unwrap();
        let lesson = dir.path().join("robot");
        fs::create_dir_all(&lesson).unwrap();
        fs::write(lesson.join("robot.py"), "").unwrap();

        assert_eq!(
            check_lesson(&lesson, "pl"),
            LessonStatus::Ready {
                start_file: lesson.join("robot.py")
            }
        );
    }

    #[test]
    fn locked_when_start_file_is_missing() {
        let dir = tempdir().unwrap();
        let lesson = dir.path().join("robot");
        fs::create_dir_all(&lesson).unwrap();

        let status = check_lesson(&lesson, "pl");
        assert!(!status.is_ready());
        assert_eq!(status.start_file(), Some(lesson.join("robot.py").as_path()));
    }

    #[test]
    fn start_file_is_reduced_to_its_name() {
        let dir = tempdir().unwrap();
        let lesson = dir.path().join("lights");
        fs::create_dir_all(&lesson).unwrap();
        fs::write(lesson.join("main.py"), "").unwrap();
        fs::write(
            lesson.join(DESCRIPTION_NAME),
            "<lesson><start_file lang=\"pl\">../../elsewhere/main.py</start_file></lesson>",
        )
        .unwrap();

        assert_eq!(
            check_lesson(&lesson, "pl"),
            LessonStatus::Ready {
                start_file: lesson.join("main.py")
            }
        );
    }

    #[test]
    fn locked_flag_and_broken_description() {
        let dir = tempdir().unwrap();
        let locked = dir.path().join("locked");
        fs::create_dir_all(&locked).unwrap();
        fs::write(locked.join("locked.py"), "").unwrap();
        fs::write(locked.join(DESCRIPTION_NAME), "<l><locked>True</locked></l>").unwrap();
        assert!(matches!(check_lesson(&locked, "pl"), LessonStatus::Locked { .. }));

        let broken = dir.path().join("broken");
        fs::create_dir_all(&broken).unwrap();
        fs::write(broken.join("broken.py"), "").unwrap();
        fs::write(broken.join(DESCRIPTION_NAME), "<l><title>").unwrap();
        assert!(matches!(check_lesson(&broken, "pl"), LessonStatus::Locked { .. }));
    }

    #[test]
    fn label_variants() {
        let dir = tempdir().unwrap();
        let plain = dir.path().join("plain");
        fs::create_dir_all(&plain).unwrap();
        let labelled = label(&plain, "plain", Path::new("plain"), "pl");
        assert_eq!(labelled.label, format!("plain\n  .{MAIN_SEPARATOR}plain"));
        assert!(!labelled.described);

        let described = dir.path().join("described");
        fs::create_dir_all(&described).unwrap();
        fs::write(
            described.join(DESCRIPTION_NAME),
            "<l><title lang=\"pl\">Tytuł</title><tooltip lang=\"pl\">Podpowiedź</tooltip></l>",
        )
        .unwrap();
        let labelled = label(&described, "described", Path::new("described"), "pl");
        assert_eq!(labelled.label, format!("Tytuł\n  .{MAIN_SEPARATOR}described"));
        assert_eq!(labelled.tooltip.as_deref(), Some("Podpowiedź"));
    }
}
