use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::CONFIG_FILE;
use crate::error::{ConnectorError, ConnectorResult, ErrorContext};

/// Values persisted by `atlassian-connector auth`.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub user_email: Option<String>,
    pub api_token: Option<String>,
    pub organization: Option<String>,
    pub site_id: Option<String>,
    #[serde(default)]
    pub graphql_dir: Option<PathBuf>,
}

pub fn config_path() -> ConnectorResult<PathBuf> {
    let home_dir = dirs::home_dir().context("Could not find home directory")?;
    Ok(home_dir.join(CONFIG_FILE))
}

pub fn load_config() -> ConnectorResult<Config> {
    load_config_from(&config_path()?)
}

pub fn load_config_from(path: &Path) -> ConnectorResult<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let config_str = fs::read_to_string(path)?;
    serde_json::from_str(&config_str).map_err(|e| {
        ConnectorError::ConfigError(format!("Failed to parse {}: {}", path.display(), e))
    })
}

pub fn save_config(config: &Config) -> ConnectorResult<()> {
    save_config_to(config, &config_path()?)
}

pub fn save_config_to(config: &Config, path: &Path) -> ConnectorResult<()> {
    let config_str = serde_json::to_string_pretty(config)?;
    fs::write(path, config_str)
        .with_context(|| format!("Failed to write config to {}", path.display()))?;
    Ok(())
}
