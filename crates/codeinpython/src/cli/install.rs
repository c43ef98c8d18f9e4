use std::path::PathBuf;

use anyhow::{Result, bail};
use cip_manifest::VersionInfo;
use codeinpython::{Mode, Place};
use tabled::Tabled;

use crate::utils::ui::table::{FormatConfig, Formatter};

#[derive(Tabled)]
struct VersionRow {
    #[tabled(rename = "")]
    which: &'static str,
    release: String,
    date: String,
    description: String,
}

impl VersionRow {
    fn new(which: &'static str, version: VersionInfo) -> Self {
        Self {
            which,
            release: version.release,
            date: version.date,
            description: version.description,
        }
    }
}

#[derive(Debug, clap::Args)]
pub struct VersionArg {
    /// Archive or manifest to inspect [default: the installed archive]
    pub file: Option<PathBuf>,
}

impl VersionArg {
    pub fn run(self, mode: &Mode) -> Result<()> {
        let installer = mode.installer();
        let file = match self.file {
            Some(file) => installer.source_path(Some(&file)),
            None => mode.resolver().resolve(Place::ZipArchiveFile, &[]),
        };

        let (valid, version) = installer.get_version(&file);
        if !valid {
            tracing::info!(path = %file.display(), "no version information");
        }
        let table = Formatter::default([VersionRow::new("version", version)], FormatConfig::default());
        println!("{table}");
        Ok(())
    }
}

#[derive(Debug, clap::Args)]
pub struct CheckArg {
    /// Zip to check [default: the pending update]
    pub zip: Option<PathBuf>,
}

impl CheckArg {
    pub fn run(self, mode: &Mode) -> Result<()> {
        let installer = mode.installer();
        let source = installer.source_path(self.zip.as_deref());
        if !installer.check_content(Some(&source)) {
            bail!("{}: not a valid CodeInPython archive", source.display());
        }
        println!("{}: valid", source.display());
        Ok(())
    }
}

#[derive(Debug, clap::Args)]
pub struct InstallArg {
    /// Zip to install [default: the pending update]
    pub zip: Option<PathBuf>,
    /// Install without asking for confirmation
    #[arg(short, long)]
    pub yes: bool,
    /// Drop the pending update instead of installing it
    #[arg(long, conflicts_with_all = ["zip", "yes"])]
    pub discard: bool,
}

impl InstallArg {
    pub fn run(self, mode: &Mode) -> Result<()> {
        if self.discard {
            if mode.discard_pending_update()? {
                println!("Pending update removed");
            } else {
                println!("No pending update");
            }
            return Ok(());
        }

        let installer = mode.installer();
        let offer = installer.compare(self.zip.as_deref())?;

        let rows = [
            VersionRow::new("present", offer.present_or_placeholder()),
            VersionRow::new("new", offer.candidate.clone()),
        ];
        println!("{}", Formatter::default(rows, FormatConfig::default()));

        if !self.yes {
            println!("Run again with --yes to install, or --discard to drop a pending update.");
            return Ok(());
        }

        installer.apply(Some(&offer.source))?.into_result()?;
        println!("Update installed");
        Ok(())
    }
}
