//! Error types for the Azure management API client
//!
//! Keeps not-found, authorization, transient and malformed-response failures
//! apart so callers can decide which of them are fatal.

use thiserror::Error;

/// Errors that can occur when reading cluster configuration from Azure
#[derive(Debug, Error)]
pub enum AzureApiError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// API returned an error response not covered by a more specific variant
    #[error("API error ({status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message from the API
        message: String,
    },

    /// Failed to parse the API response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// No usable access token, or the token was rejected
    #[error("Not authenticated - set AZURE_ACCESS_TOKEN or [azure].access_token")]
    Unauthorized,

    /// Requested cluster or resource group was not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Token is valid but lacks permission to read the cluster
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded - please try again later")]
    RateLimited,

    /// Server error
    #[error("Server error ({status}): {message}")]
    ServerError {
        /// HTTP status code (5xx)
        status: u16,
        /// Error message
        message: String,
    },
}

impl AzureApiError {
    /// The cluster (or its resource group) does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Credentials were missing, rejected or insufficient.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Unauthorized | Self::PermissionDenied(_))
    }

    /// Network, throttling or server-side fault that may succeed on a later run.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::HttpError(_) | Self::RateLimited | Self::ServerError { .. }
        )
    }
}

/// Result type alias for Azure API operations
pub type Result<T> = std::result::Result<T, AzureApiError>;
