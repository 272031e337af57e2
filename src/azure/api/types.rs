//! Response types for the AKS management API
//!
//! Mirrors the provider's `Microsoft.ContainerService/managedClusters` resource.
//! Every field is optional at every nesting level; the API omits anything that
//! was never configured and older API versions lack newer sections entirely.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// A managed cluster resource as returned by `GET .../managedClusters/{name}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ManagedCluster {
    pub name: Option<String>,
    pub id: Option<String>,
    pub etag: Option<String>,
    /// Provider resource type, e.g. `Microsoft.ContainerService/ManagedClusters`
    #[serde(rename = "type")]
    pub resource_type: Option<String>,
    pub location: Option<String>,
    pub tags: Option<BTreeMap<String, String>>,
    pub properties: Option<ManagedClusterProperties>,
}

/// The `properties` section of a managed cluster
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagedClusterProperties {
    /// Addon profiles keyed by addon name (e.g. `omsagent`)
    pub addon_profiles: Option<BTreeMap<String, AddonProfile>>,
    pub network_profile: Option<NetworkProfile>,
    pub api_server_access_profile: Option<ApiServerAccessProfile>,
    #[serde(rename = "enableRBAC")]
    pub enable_rbac: Option<bool>,
    pub kubernetes_version: Option<String>,
    pub provisioning_state: Option<String>,
}

/// A togglable managed addon attached to the cluster
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AddonProfile {
    pub enabled: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkProfile {
    pub network_plugin: Option<String>,
    /// `azure`, `calico`, or absent when no policy engine is installed
    pub network_policy: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiServerAccessProfile {
    /// Outer `None` when the key is missing, `Some(None)` when it is `null`
    #[serde(
        rename = "authorizedIPRanges",
        default,
        deserialize_with = "present_or_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub authorized_ip_ranges: Option<Option<Vec<String>>>,
    pub enable_private_cluster: Option<bool>,
}

/// Wraps whatever the key held, `null` included, so a missing key stays
/// distinguishable through `#[serde(default)]`.
fn present_or_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Azure Resource Manager error envelope
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    pub error: Option<ApiErrorDetail>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorDetail {
    /// Machine-readable code, e.g. `ResourceNotFound`
    pub code: Option<String>,
    pub message: Option<String>,
}

impl ApiErrorResponse {
    /// Get the error message, preferring `message` over `code`
    pub fn get_message(&self) -> String {
        self.error
            .as_ref()
            .and_then(|e| e.message.clone().or_else(|| e.code.clone()))
            .unwrap_or_else(|| "Unknown error".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_cluster() {
        let json = r#"{
            "name": "prod",
            "id": "/subscriptions/s/resourceGroups/rg/providers/Microsoft.ContainerService/managedClusters/prod",
            "etag": "abc",
            "type": "Microsoft.ContainerService/ManagedClusters",
            "location": "westeurope",
            "tags": {"env": "prod"},
            "properties": {
                "kubernetesVersion": "1.29.2",
                "enableRBAC": true,
                "addonProfiles": {"omsagent": {"enabled": true, "config": {"logAnalyticsWorkspaceResourceID": "x"}}},
                "networkProfile": {"networkPlugin": "azure", "networkPolicy": "calico"},
                "apiServerAccessProfile": {"authorizedIPRanges": ["203.0.113.0/24"]}
            }
        }"#;

        let cluster: ManagedCluster = serde_json::from_str(json).unwrap();
        assert_eq!(cluster.name.as_deref(), Some("prod"));
        assert_eq!(
            cluster.resource_type.as_deref(),
            Some("Microsoft.ContainerService/ManagedClusters")
        );
        assert_eq!(cluster.tags.unwrap().get("env").map(String::as_str), Some("prod"));

        let props = cluster.properties.unwrap();
        assert_eq!(props.enable_rbac, Some(true));
        assert_eq!(props.kubernetes_version.as_deref(), Some("1.29.2"));
        assert_eq!(
            props.addon_profiles.unwrap()["omsagent"].enabled,
            Some(true)
        );
        assert_eq!(
            props.network_profile.unwrap().network_policy.as_deref(),
            Some("calico")
        );
        assert_eq!(
            props.api_server_access_profile.unwrap().authorized_ip_ranges,
            Some(Some(vec!["203.0.113.0/24".to_string()]))
        );
    }

    #[test]
    fn test_deserialize_sparse_cluster() {
        let cluster: ManagedCluster = serde_json::from_str(r#"{"name": "bare"}"#).unwrap();
        assert_eq!(cluster.name.as_deref(), Some("bare"));
        assert!(cluster.properties.is_none());

        let cluster: ManagedCluster =
            serde_json::from_str(r#"{"properties": {"networkProfile": {"networkPolicy": null}}}"#)
                .unwrap();
        let network = cluster.properties.unwrap().network_profile.unwrap();
        assert!(network.network_policy.is_none());
    }

    #[test]
    fn test_authorized_ranges_null_is_not_missing() {
        let profile: ApiServerAccessProfile =
            serde_json::from_str(r#"{"authorizedIPRanges": null, "enablePrivateCluster": true}"#)
                .unwrap();
        assert_eq!(profile.authorized_ip_ranges, Some(None));
        assert_eq!(profile.enable_private_cluster, Some(true));

        let profile: ApiServerAccessProfile =
            serde_json::from_str(r#"{"enablePrivateCluster": false}"#).unwrap();
        assert_eq!(profile.authorized_ip_ranges, None);

        // a missing key stays missing when written back out
        let json = serde_json::to_value(&profile).unwrap();
        assert!(json.get("authorizedIPRanges").is_none());
    }

    #[test]
    fn test_error_message() {
        let body = r#"{"error": {"code": "ResourceNotFound", "message": "The Resource was not found."}}"#;
        let err: ApiErrorResponse = serde_json::from_str(body).unwrap();
        assert_eq!(err.get_message(), "The Resource was not found.");

        let err: ApiErrorResponse =
            serde_json::from_str(r#"{"error": {"code": "AuthorizationFailed"}}"#).unwrap();
        assert_eq!(err.get_message(), "AuthorizationFailed");

        let err: ApiErrorResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(err.get_message(), "Unknown error");
    }
}
