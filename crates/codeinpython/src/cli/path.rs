use anyhow::Result;
use codeinpython::{Mode, Place};

#[derive(Debug, clap::Args)]
pub struct PathArg {
    /// Place name, e.g. `main`, `student file`, `zip_archive`
    pub place: String,
    /// Extra path parameters appended to the place
    pub params: Vec<String>,
    /// Fail when the path leaves the CodeInPython folder tree
    #[arg(long)]
    pub check: bool,
}

impl PathArg {
    pub fn run(self, mode: &Mode) -> Result<()> {
        let place: Place = self.place.parse()?;
        let params: Vec<&str> = self.params.iter().map(String::as_str).collect();

        let path = if self.check {
            mode.resolver().require(place, &params)?
        } else {
            mode.resolver().resolve(place, &params)
        };

        println!("{}", path.display());
        Ok(())
    }
}
