use std::path::PathBuf;

use anyhow::Result;
use codeinpython::Mode;

#[derive(Debug, clap::Args)]
pub struct PrepareArg {
    /// Python site-packages directory to register the folder tree in
    #[arg(long)]
    pub site_dir: Option<PathBuf>,
}

impl PrepareArg {
    pub fn run(self, mode: &Mode) -> Result<()> {
        for path in mode.prepare()? {
            println!("created {}", path.display());
        }

        if let Some(site_dir) = &self.site_dir {
            if mode.register_search_path(site_dir)? {
                println!("registered {}", site_dir.display());
            }
        }

        if let Some(offer) = mode.pending_update()? {
            println!(
                "Update {} is waiting; run `cip install` to review it",
                offer.candidate.release
            );
        }
        Ok(())
    }
}
