use std::path::PathBuf;

use anyhow::Result;
use codeinpython::{ExampleNode, Mode};
use tabled::Tabled;

use crate::utils::ui::table::{FormatConfig, Formatter};

#[derive(Debug, clap::Args)]
pub struct ExamplesArg {}

impl ExamplesArg {
    pub fn run(self, mode: &Mode) -> Result<()> {
        let (shipped, custom) = mode.examples()?;
        print_nodes(&shipped, 0);
        println!("Custom examples");
        print_nodes(&custom, 1);
        Ok(())
    }
}

fn print_nodes(nodes: &[ExampleNode], depth: usize) {
    for node in nodes {
        let title = node.label.lines().next().unwrap_or_default();
        let marker = if node.selectable { '+' } else { '-' };
        println!("{:indent$}{marker} {title}", "", indent = depth * 2);
        if node.selectable {
            println!("{:indent$}  {}", "", node.path.display(), indent = depth * 2);
        }
        print_nodes(&node.children, depth + 1);
    }
}

#[derive(Tabled)]
struct LessonRow {
    name: String,
    lesson: String,
    #[tabled(rename = "start file")]
    start_file: String,
}

#[derive(Debug, clap::Args)]
pub struct LessonsArg {}

impl LessonsArg {
    pub fn run(self, mode: &Mode) -> Result<()> {
        let rows: Vec<LessonRow> = mode
            .lessons()?
            .into_iter()
            .map(|lesson| LessonRow {
                name: lesson.label.lines().next().unwrap_or_default().to_string(),
                lesson: lesson.rel_path.display().to_string(),
                start_file: lesson.start_file.display().to_string(),
            })
            .collect();

        if rows.is_empty() {
            println!("No lessons");
            return Ok(());
        }
        println!("{}", Formatter::default(rows, FormatConfig::default()));
        Ok(())
    }
}

#[derive(Debug, clap::Args)]
pub struct AddExampleArg {
    /// Example folder to copy
    pub dir: PathBuf,
    /// Replace an existing copy
    #[arg(long)]
    pub overwrite: bool,
}

impl AddExampleArg {
    pub fn run(self, mode: &Mode) -> Result<()> {
        let dest = mode.add_example(&self.dir, self.overwrite)?;
        println!("{}", dest.display());
        Ok(())
    }
}

#[derive(Debug, clap::Args)]
pub struct RemoveLessonArg {
    /// Lesson folder to move to the trash
    pub dir: PathBuf,
}

impl RemoveLessonArg {
    pub fn run(self, mode: &Mode) -> Result<()> {
        let trashed = mode.remove_lesson(&self.dir)?;
        println!("{}", trashed.display());
        Ok(())
    }
}

#[derive(Debug, clap::Args)]
pub struct NewLessonArg {
    /// Lesson name: up to 20 of 0-9 A-Z a-z _ + = -
    pub name: String,
    /// Replace an existing lesson
    #[arg(long)]
    pub overwrite: bool,
}

impl NewLessonArg {
    pub fn run(self, mode: &Mode) -> Result<()> {
        let file = mode.create_private_lesson(&self.name, self.overwrite)?;
        println!("{}", file.display());
        Ok(())
    }
}
