use std::env;
use std::path::PathBuf;

/// Env var pointing at the settings file itself.
pub const CONFIG_ENV: &str = "CIP_CONFIG";
pub const APP_DIR: &str = "codeinpython";
pub const SETTINGS_FILE: &str = "settings.toml";

pub fn user_home() -> Option<PathBuf> {
    home::home_dir()
}

pub fn user_config() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        env::var_os("APPDATA").map(PathBuf::from)
    }
    #[cfg(target_os = "macos")]
    {
        user_home().map(|p| p.join("Library/Application Support"))
    }
    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        env::var_os("XDG_CONFIG_HOME")
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
            .or_else(|| user_home().map(|p| p.join(".config")))
    }
}

/// `$CIP_CONFIG`, else `<config dir>/codeinpython/settings.toml`.
pub fn settings_path() -> Option<PathBuf> {
    match env::var_os(CONFIG_ENV) {
        Some(path) if !path.is_empty() => Some(PathBuf::from(path)),
        _ => user_config().map(|dir| dir.join(APP_DIR).join(SETTINGS_FILE)),
    }
}
