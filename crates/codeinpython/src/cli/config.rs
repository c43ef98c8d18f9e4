use anyhow::{Result, bail};
use clap::Subcommand;
use codeinpython::Mode;
use tabled::Tabled;

use crate::utils::ui::table::{FormatConfig, Formatter};

#[derive(Tabled)]
struct SettingRow {
    key: String,
    value: String,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    #[command(name = "get", about = "Show one setting, or all of them")]
    Get { key: Option<String> },
    #[command(name = "set", about = "Change a setting")]
    Set { key: String, value: String },
}

impl ConfigCommands {
    pub fn run(self, mode: &mut Mode) -> Result<()> {
        match self {
            Self::Get { key: Some(key) } => match mode.get_setting(&key) {
                Some(value) => println!("{value}"),
                None => bail!("no such setting: {key}"),
            },
            Self::Get { key: None } => {
                let rows: Vec<SettingRow> = mode
                    .settings()
                    .entries()
                    .into_iter()
                    .map(|(key, value)| SettingRow {
                        key: key.to_string(),
                        value: value.to_string(),
                    })
                    .collect();
                println!("{}", Formatter::default(rows, FormatConfig::default()));
            }
            Self::Set { key, value } => {
                if key.trim().is_empty() {
                    bail!("setting key must not be empty");
                }
                if !mode.put_setting(&key, &value)? {
                    tracing::info!(%key, "setting unchanged");
                }
            }
        }
        Ok(())
    }
}
