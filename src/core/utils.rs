use dirs::home_dir;
use std::{
    env, fs, io,
    path::{Path, PathBuf},
};

const DEFAULT_DIR_NAME: &str = ".rupeewise";
const CONFIG_DIR: &str = "config";
const CONFIG_FILE: &str = "config.json";

/// Environment variable overriding the data directory.
pub const HOME_ENV: &str = "RUPEEWISE_HOME";

/// Returns the application-specific data directory, defaulting to `~/.rupeewise`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Directory holding the configuration file inside `base`.
pub fn config_dir_in(base: &Path) -> PathBuf {
    base.join(CONFIG_DIR)
}

/// Path to the configuration file inside `base`.
pub fn config_file_in(base: &Path) -> PathBuf {
    config_dir_in(base).join(CONFIG_FILE)
}

pub fn ensure_dir(path: &Path) -> io::Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}
