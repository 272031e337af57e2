pub mod types;

use crate::audit::builtin_controls;
use crate::error::ConfigError;
use std::fs;
use std::path::{Path, PathBuf};

pub use types::{AzureSettings, Config};

const CONFIG_FILE_NAME: &str = ".aks-audit.toml";

/// Environment variable overriding `[azure].subscription_id`
pub const SUBSCRIPTION_ENV: &str = "AZURE_SUBSCRIPTION_ID";
/// Environment variable overriding `[azure].access_token`
pub const ACCESS_TOKEN_ENV: &str = "AZURE_ACCESS_TOKEN";

/// Get the global config file path (~/.aks-audit.toml)
pub fn global_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(CONFIG_FILE_NAME))
}

/// Get the local config file path (./.aks-audit.toml)
pub fn local_config_path() -> PathBuf {
    PathBuf::from(CONFIG_FILE_NAME)
}

/// Load configuration and apply environment overrides.
///
/// An explicit path must exist. Otherwise the local config is tried first,
/// then the global one, then defaults.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let mut config = match path {
        Some(path) => load_from_file(path)?,
        None => {
            let candidates = std::iter::once(local_config_path()).chain(global_config_path());
            match candidates.into_iter().find(|p| p.exists()) {
                Some(found) => load_from_file(&found)?,
                None => {
                    log::debug!("No config file found, using defaults");
                    Config::default()
                }
            }
        }
    };

    config.apply_env(|key| std::env::var(key).ok());
    Ok(config)
}

/// Load configuration from a TOML file.
pub fn load_from_file(path: &Path) -> Result<Config, ConfigError> {
    log::debug!("Loading config from {}", path.display());
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    load_from_str(&content)
}

/// Load configuration from a TOML string.
pub fn load_from_str(content: &str) -> Result<Config, ConfigError> {
    let config: Config =
        toml::from_str(content).map_err(|e| ConfigError::ParsingFailed(e.to_string()))?;
    config.audit.validate(&builtin_controls())?;
    Ok(config)
}

impl Config {
    /// Override Azure settings from the environment.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(subscription) = lookup(SUBSCRIPTION_ENV).filter(|v| !v.is_empty()) {
            self.azure.subscription_id = Some(subscription);
        }
        if let Some(token) = lookup(ACCESS_TOKEN_ENV).filter(|v| !v.is_empty()) {
            self.azure.access_token = Some(token);
        }
    }
}
