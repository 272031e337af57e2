use crate::audit::{AuditConfig, Target};
use crate::azure::api::{DEFAULT_API_VERSION, DEFAULT_ENDPOINT};
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub azure: AzureSettings,
    #[serde(default)]
    pub audit: AuditConfig,
    /// Clusters audited when none are given on the command line
    #[serde(default)]
    pub targets: Vec<Target>,
}

/// Azure management API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AzureSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscription_id: Option<String>,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_api_version")]
    pub api_version: String,
    /// Bearer token for the management API
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_api_version() -> String {
    DEFAULT_API_VERSION.to_string()
}

impl Default for AzureSettings {
    fn default() -> Self {
        Self {
            subscription_id: None,
            endpoint: default_endpoint(),
            api_version: default_api_version(),
            access_token: None,
        }
    }
}

impl AzureSettings {
    /// The configured subscription, or an error if none is set
    pub fn subscription(&self) -> Result<&str, ConfigError> {
        self.subscription_id
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .ok_or(ConfigError::MissingSubscription)
    }
}
