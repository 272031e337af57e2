//! Azure Resource Manager client for AKS clusters
//!
//! Performs a single authenticated read per cluster. Timeouts are the HTTP
//! client's own; there is no retry or caching layer.

use super::error::{AzureApiError, Result};
use super::types::{ApiErrorResponse, ManagedCluster};
use reqwest::blocking::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Public Azure cloud management endpoint
pub const DEFAULT_ENDPOINT: &str = "https://management.azure.com";
/// managedClusters API version used for reads
pub const DEFAULT_API_VERSION: &str = "2020-03-01";

/// User agent for API requests
const USER_AGENT: &str = concat!("aks-audit/", env!("CARGO_PKG_VERSION"));

/// Read access to AKS cluster resources.
///
/// The audit runner only depends on this trait, so tests and alternative
/// transports can supply cluster documents without HTTP.
pub trait ClusterApi {
    /// Fetch one managed cluster by resource group and name.
    fn get_cluster(&self, resource_group: &str, name: &str) -> Result<ManagedCluster>;
}

/// Blocking client for the Azure management API
pub struct AzureApiClient {
    /// HTTP client with configured timeout and headers
    http_client: Client,
    /// Management endpoint, without trailing slash
    endpoint: String,
    api_version: String,
    subscription_id: String,
    access_token: String,
}

impl AzureApiClient {
    /// Create a client against the public Azure cloud
    pub fn new(subscription_id: impl Into<String>, access_token: impl Into<String>) -> Result<Self> {
        Self::with_endpoint(
            DEFAULT_ENDPOINT,
            DEFAULT_API_VERSION,
            subscription_id,
            access_token,
        )
    }

    /// Create a client with a custom endpoint (sovereign clouds, proxies)
    pub fn with_endpoint(
        endpoint: impl Into<String>,
        api_version: impl Into<String>,
        subscription_id: impl Into<String>,
        access_token: impl Into<String>,
    ) -> Result<Self> {
        let access_token = access_token.into();
        if access_token.trim().is_empty() {
            return Err(AzureApiError::Unauthorized);
        }

        let http_client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(USER_AGENT)
            .build()
            .map_err(AzureApiError::HttpError)?;

        Ok(Self {
            http_client,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            api_version: api_version.into(),
            subscription_id: subscription_id.into(),
            access_token,
        })
    }

    /// Get the configured management endpoint
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Build the resource URL for a managed cluster
    pub fn cluster_url(&self, resource_group: &str, name: &str) -> String {
        format!(
            "{}/subscriptions/{}/resourceGroups/{}/providers/Microsoft.ContainerService/managedClusters/{}?api-version={}",
            self.endpoint,
            urlencoding::encode(&self.subscription_id),
            urlencoding::encode(resource_group),
            urlencoding::encode(name),
            urlencoding::encode(&self.api_version),
        )
    }

    /// Make an authenticated GET request
    fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        log::debug!("GET {}", url);

        let response = self
            .http_client
            .get(url)
            .bearer_auth(&self.access_token)
            .send()?;

        self.handle_response(response)
    }

    /// Handle the HTTP response, converting errors appropriately
    fn handle_response<T: DeserializeOwned>(&self, response: Response) -> Result<T> {
        let status = response.status();
        let body = response.text()?;

        if status.is_success() {
            serde_json::from_str(&body).map_err(|e| AzureApiError::ParseError(e.to_string()))
        } else {
            log::debug!("Azure API returned {}: {}", status, body);
            Err(error_for_status(status.as_u16(), &body))
        }
    }
}

impl ClusterApi for AzureApiClient {
    fn get_cluster(&self, resource_group: &str, name: &str) -> Result<ManagedCluster> {
        self.get(&self.cluster_url(resource_group, name))
    }
}

/// Map a non-success status and its body to an error variant
pub fn error_for_status(status: u16, body: &str) -> AzureApiError {
    let message = serde_json::from_str::<ApiErrorResponse>(body)
        .map(|e| e.get_message())
        .unwrap_or_else(|_| body.to_string());

    match status {
        401 => AzureApiError::Unauthorized,
        403 => AzureApiError::PermissionDenied(message),
        404 => AzureApiError::NotFound(message),
        429 => AzureApiError::RateLimited,
        500..=599 => AzureApiError::ServerError { status, message },
        _ => AzureApiError::ApiError { status, message },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_token_is_unauthorized() {
        let result = AzureApiClient::new("sub", "  ");
        assert!(matches!(result, Err(AzureApiError::Unauthorized)));
    }

    #[test]
    fn test_cluster_url() {
        let client =
            AzureApiClient::with_endpoint("https://example.test/", "2020-03-01", "sub-1", "token")
                .unwrap();
        assert_eq!(client.endpoint(), "https://example.test");
        assert_eq!(
            client.cluster_url("my rg", "prod"),
            "https://example.test/subscriptions/sub-1/resourceGroups/my%20rg/providers/Microsoft.ContainerService/managedClusters/prod?api-version=2020-03-01"
        );
    }

    #[test]
    fn test_error_for_status() {
        let not_found = r#"{"error": {"code": "ResourceNotFound", "message": "cluster missing"}}"#;
        match error_for_status(404, not_found) {
            AzureApiError::NotFound(msg) => assert_eq!(msg, "cluster missing"),
            other => panic!("unexpected error: {other:?}"),
        }

        assert!(matches!(
            error_for_status(401, ""),
            AzureApiError::Unauthorized
        ));
        assert!(matches!(
            error_for_status(403, r#"{"error": {"code": "AuthorizationFailed"}}"#),
            AzureApiError::PermissionDenied(msg) if msg == "AuthorizationFailed"
        ));
        assert!(matches!(
            error_for_status(429, ""),
            AzureApiError::RateLimited
        ));
        assert!(matches!(
            error_for_status(503, "upstream busy"),
            AzureApiError::ServerError { status: 503, message } if message == "upstream busy"
        ));
        assert!(matches!(
            error_for_status(400, "bad"),
            AzureApiError::ApiError { status: 400, .. }
        ));
    }
}
