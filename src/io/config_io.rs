use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::io::workspace_io::StoreError;
use crate::model::config::Config;

/// File name of the board configuration inside the data directory
pub const CONFIG_FILE: &str = "config.toml";

/// Read the board config. A missing file yields defaults.
pub fn read_config(data_dir: &Path) -> Result<Config, StoreError> {
    let config_path = data_dir.join(CONFIG_FILE);
    let config_text = match fs::read_to_string(&config_path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Config::default()),
        Err(e) => {
            return Err(StoreError::ReadError {
                key: CONFIG_FILE.to_string(),
                source: e,
            });
        }
    };
    let config: Config = toml::from_str(&config_text)?;
    Ok(config)
}

/// Write the config template, keeping an existing file untouched.
pub fn write_config_template(data_dir: &Path, template: &str) -> Result<bool, StoreError> {
    let config_path = data_dir.join(CONFIG_FILE);
    if config_path.exists() {
        return Ok(false);
    }
    fs::write(&config_path, template).map_err(|e| StoreError::WriteError {
        key: CONFIG_FILE.to_string(),
        source: e,
    })?;
    Ok(true)
}
