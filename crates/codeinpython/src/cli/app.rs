use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use codeinpython::{Mode, SettingsStore, WorkspaceRoot};

use super::{config, install, lesson, path, prepare};

#[derive(Debug, Parser)]
#[command(name = "cip", version = env!("CARGO_PKG_VERSION"), about, long_about = None, propagate_version = true)]
pub struct App {
    /// Workspace root [default: $CIP_ROOT or ~/mu_code]
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,
    /// Settings file [default: $CIP_CONFIG or <config dir>/codeinpython/settings.toml]
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Act as this student
    #[arg(short, long, global = true)]
    pub user: Option<String>,

    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    #[command(alias = "p", name = "path", about = "Resolve a place to a path")]
    Path(path::PathArg),
    #[command(alias = "v", name = "version", about = "Show the installed or a candidate archive version")]
    Version(install::VersionArg),
    #[command(name = "check", about = "Check whether a zip is a valid update archive")]
    Check(install::CheckArg),
    #[command(alias = "i", name = "install", about = "Install an update archive")]
    Install(install::InstallArg),

    #[command(alias = "ex", name = "examples", about = "List examples")]
    Examples(lesson::ExamplesArg),
    #[command(alias = "ls", name = "lessons", about = "List the student's lessons")]
    Lessons(lesson::LessonsArg),
    #[command(alias = "add", name = "add-example", about = "Copy an example to the student")]
    AddExample(lesson::AddExampleArg),
    #[command(alias = "rm", name = "remove-lesson", about = "Move a lesson to the student's trash")]
    RemoveLesson(lesson::RemoveLessonArg),
    #[command(alias = "new", name = "new-lesson", about = "Create an empty private lesson")]
    NewLesson(lesson::NewLessonArg),

    #[command(alias = "cfg", name = "config", subcommand)]
    Config(config::ConfigCommands),
    #[command(name = "prepare", about = "Create the standard folders")]
    Prepare(prepare::PrepareArg),
}

impl App {
    pub fn run(self) -> Result<()> {
        let mut mode = open_mode(self.root, self.config)?;
        if let Some(user) = &self.user {
            mode.login(user)?;
        }

        match self.cmd {
            Commands::Path(arg) => arg.run(&mode),
            Commands::Version(arg) => arg.run(&mode),
            Commands::Check(arg) => arg.run(&mode),
            Commands::Install(arg) => arg.run(&mode),
            Commands::Examples(arg) => arg.run(&mode),
            Commands::Lessons(arg) => arg.run(&mode),
            Commands::AddExample(arg) => arg.run(&mode),
            Commands::RemoveLesson(arg) => arg.run(&mode),
            Commands::NewLesson(arg) => arg.run(&mode),
            Commands::Config(cmd) => cmd.run(&mut mode),
            Commands::Prepare(arg) => arg.run(&mode),
        }
    }
}

fn open_mode(root: Option<PathBuf>, config: Option<PathBuf>) -> Result<Mode> {
    let root = match root {
        Some(root) => WorkspaceRoot::new(root),
        None => WorkspaceRoot::from_env(),
    }
    .context("Failed to open the workspace root")?;

    let store = match config {
        Some(path) => SettingsStore::new(path),
        None => SettingsStore::from_env().context("Failed to locate the settings file")?,
    };

    Mode::new(root, store).context("Failed to load settings")
}
