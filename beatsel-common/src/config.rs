//! Configuration loading and root folder resolution

use crate::{Error, Result};
use std::path::PathBuf;

/// Name of the database file inside the root folder
pub const DATABASE_FILE: &str = "beatsel.db";

/// Root folder resolution priority order:
/// 1. Command-line argument (highest priority)
/// 2. `BEATSEL_ROOT` environment variable
/// 3. TOML config file (`root_folder` key)
/// 4. OS-dependent compiled default (fallback)
pub fn resolve_root_folder(cli_arg: Option<&str>) -> Result<PathBuf> {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return Ok(PathBuf::from(path));
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var("BEATSEL_ROOT") {
        return Ok(PathBuf::from(path));
    }

    // Priority 3: TOML config file
    if let Ok(config_path) = find_config_file() {
        if let Ok(toml_content) = std::fs::read_to_string(&config_path) {
            if let Ok(config) = toml::from_str::<toml::Value>(&toml_content) {
                if let Some(root_folder) = config.get("root_folder").and_then(|v| v.as_str()) {
                    return Ok(PathBuf::from(root_folder));
                }
            }
        }
    }

    // Priority 4: OS-dependent compiled default
    Ok(default_root_folder())
}

/// Path of the collection database inside the resolved root folder
pub fn database_path(root: &std::path::Path) -> PathBuf {
    root.join(DATABASE_FILE)
}

/// Locate the configuration file for the platform
fn find_config_file() -> Result<PathBuf> {
    if cfg!(target_os = "linux") {
        // Try ~/.config/beatsel/config.toml first, then /etc/beatsel/config.toml
        if let Some(path) = dirs::config_dir().map(|d| d.join("beatsel").join("config.toml")) {
            if path.exists() {
                return Ok(path);
            }
        }
        let system_config = PathBuf::from("/etc/beatsel/config.toml");
        if system_config.exists() {
            return Ok(system_config);
        }
        return Err(Error::Config("No config file found".to_string()));
    }

    let path = dirs::config_dir()
        .map(|d| d.join("beatsel").join("config.toml"))
        .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))?;

    if path.exists() {
        Ok(path)
    } else {
        Err(Error::Config(format!("Config file not found: {:?}", path)))
    }
}

/// OS-dependent default root folder path
fn default_root_folder() -> PathBuf {
    if cfg!(target_os = "linux") {
        dirs::data_local_dir()
            .map(|d| d.join("beatsel"))
            .unwrap_or_else(|| PathBuf::from("/var/lib/beatsel"))
    } else if cfg!(target_os = "macos") {
        dirs::data_dir()
            .map(|d| d.join("beatsel"))
            .unwrap_or_else(|| PathBuf::from("/Library/Application Support/beatsel"))
    } else if cfg!(target_os = "windows") {
        dirs::data_local_dir()
            .map(|d| d.join("beatsel"))
            .unwrap_or_else(|| PathBuf::from("C:\\ProgramData\\beatsel"))
    } else {
        PathBuf::from("./beatsel_data")
    }
}
