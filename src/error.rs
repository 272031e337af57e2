use crate::azure::AzureApiError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuditError {
    #[error("Failed to fetch AKS cluster {target}: {source}")]
    Fetch {
        target: String,
        #[source]
        source: AzureApiError,
    },

    #[error("Azure API client error: {0}")]
    Api(#[from] AzureApiError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid target '{0}': expected <resource-group>/<cluster-name>")]
    InvalidTarget(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration parsing failed: {0}")]
    ParsingFailed(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("No Azure subscription configured - set AZURE_SUBSCRIPTION_ID or [azure].subscription_id")]
    MissingSubscription,
}

pub type Result<T> = std::result::Result<T, AuditError>;
