//! The audited view of one AKS cluster.
//!
//! `ClusterResource` is built once per target from a single API read and is
//! read-only afterwards. Predicates never fail: a missing field at any nesting
//! level yields the documented default.

use crate::azure::api::{AzureApiError, ClusterApi, ManagedCluster, ManagedClusterProperties};
use std::collections::BTreeMap;
use std::fmt;

/// CIDR block that admits every IPv4 source address
pub const PUBLIC_CIDR: &str = "0.0.0.0/0";

/// Addon key of the Azure Monitor container agent
pub const OMS_AGENT_ADDON: &str = "omsagent";

/// Configuration of one AKS cluster, or the absent baseline when it was not found.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClusterResource {
    exists: bool,
    name: String,
    id: String,
    etag: Option<String>,
    resource_type: String,
    location: String,
    tags: BTreeMap<String, String>,
    properties: ManagedClusterProperties,
}

impl ClusterResource {
    /// Fetch a cluster through `api`.
    ///
    /// A not-found response yields [`ClusterResource::absent`] so controls
    /// evaluate against the safe baseline. Every other failure is returned to
    /// the caller unchanged.
    pub fn fetch<A: ClusterApi + ?Sized>(
        api: &A,
        resource_group: &str,
        cluster_name: &str,
    ) -> Result<Self, AzureApiError> {
        match api.get_cluster(resource_group, cluster_name) {
            Ok(cluster) => Ok(Self::from_cluster(cluster)),
            Err(err) if err.is_not_found() => {
                log::warn!(
                    "AKS cluster {}/{} not found: {}",
                    resource_group,
                    cluster_name,
                    err
                );
                Ok(Self::absent())
            }
            Err(err) => Err(err),
        }
    }

    /// A cluster that does not exist. Every predicate returns its default.
    pub fn absent() -> Self {
        Self::default()
    }

    /// Build the resource from a successful API response.
    pub fn from_cluster(cluster: ManagedCluster) -> Self {
        Self {
            exists: true,
            name: cluster.name.unwrap_or_default(),
            id: cluster.id.unwrap_or_default(),
            etag: cluster.etag,
            resource_type: cluster.resource_type.unwrap_or_default(),
            location: cluster.location.unwrap_or_default(),
            tags: cluster.tags.unwrap_or_default(),
            properties: cluster.properties.unwrap_or_default(),
        }
    }

    pub fn exists(&self) -> bool {
        self.exists
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn etag(&self) -> Option<&str> {
        self.etag.as_deref()
    }

    pub fn resource_type(&self) -> &str {
        &self.resource_type
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn tags(&self) -> &BTreeMap<String, String> {
        &self.tags
    }

    /// `addonProfiles.omsagent.enabled`, false if any level is missing.
    pub fn has_logging_enabled(&self) -> bool {
        self.properties
            .addon_profiles
            .as_ref()
            .and_then(|addons| addons.get(OMS_AGENT_ADDON))
            .and_then(|addon| addon.enabled)
            .unwrap_or(false)
    }

    /// True when `networkProfile.networkPolicy` is set to anything, including
    /// an empty string. Presence governs, not the value.
    pub fn has_network_policy_enabled(&self) -> bool {
        self.properties
            .network_profile
            .as_ref()
            .is_some_and(|network| network.network_policy.is_some())
    }

    /// Source ranges allowed to reach the API server.
    ///
    /// Without an `authorizedIPRanges` key the API server is reachable from
    /// anywhere, so that case is reported as `["0.0.0.0/0"]`. A key that is
    /// present but `null` (as private clusters send it) yields no ranges, and
    /// a list is returned as-is.
    pub fn api_server_access_ranges(&self) -> Vec<String> {
        match self
            .properties
            .api_server_access_profile
            .as_ref()
            .and_then(|profile| profile.authorized_ip_ranges.as_ref())
        {
            None => vec![PUBLIC_CIDR.to_string()],
            Some(None) => Vec::new(),
            Some(Some(ranges)) => ranges.clone(),
        }
    }

    /// The API server admits `0.0.0.0/0`.
    pub fn has_public_api_authorized_ranges(&self) -> bool {
        self.api_server_access_ranges()
            .iter()
            .any(|range| range == PUBLIC_CIDR)
    }

    /// `enableRBAC`, false when missing.
    pub fn has_rbac_enabled(&self) -> bool {
        self.properties.enable_rbac.unwrap_or(false)
    }
}

impl fmt::Display for ClusterResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' AKS Cluster", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::azure::api::{AddonProfile, ApiServerAccessProfile, NetworkProfile};

    fn with_properties(properties: ManagedClusterProperties) -> ClusterResource {
        ClusterResource::from_cluster(ManagedCluster {
            name: Some("test".to_string()),
            properties: Some(properties),
            ..Default::default()
        })
    }

    fn from_json(json: &str) -> ClusterResource {
        ClusterResource::from_cluster(serde_json::from_str(json).unwrap())
    }

    #[test]
    fn test_absent_defaults() {
        let resource = ClusterResource::absent();
        assert!(!resource.exists());
        assert!(!resource.has_logging_enabled());
        assert!(!resource.has_network_policy_enabled());
        assert!(!resource.has_rbac_enabled());
        assert_eq!(resource.api_server_access_ranges(), vec![PUBLIC_CIDR]);
        assert!(resource.has_public_api_authorized_ranges());
    }

    #[test]
    fn test_existing_cluster_without_properties() {
        let resource = from_json(r#"{"name": "bare", "location": "eastus"}"#);
        assert!(resource.exists());
        assert_eq!(resource.location(), "eastus");
        assert!(!resource.has_logging_enabled());
        assert!(!resource.has_network_policy_enabled());
        assert!(!resource.has_rbac_enabled());
        assert_eq!(resource.api_server_access_ranges(), vec![PUBLIC_CIDR]);
        assert!(resource.has_public_api_authorized_ranges());
    }

    #[test]
    fn test_logging_follows_enabled_flag() {
        let on = from_json(r#"{"properties": {"addonProfiles": {"omsagent": {"enabled": true}}}}"#);
        assert!(on.has_logging_enabled());

        let off =
            from_json(r#"{"properties": {"addonProfiles": {"omsagent": {"enabled": false}}}}"#);
        assert!(!off.has_logging_enabled());
    }

    #[test]
    fn test_logging_missing_levels() {
        // addonProfiles absent
        assert!(!from_json(r#"{"properties": {}}"#).has_logging_enabled());
        // omsagent absent
        assert!(
            !from_json(r#"{"properties": {"addonProfiles": {"httpApplicationRouting": {"enabled": true}}}}"#)
                .has_logging_enabled()
        );
        // enabled absent
        assert!(
            !from_json(r#"{"properties": {"addonProfiles": {"omsagent": {}}}}"#)
                .has_logging_enabled()
        );
    }

    #[test]
    fn test_network_policy_presence() {
        for policy in ["azure", "calico", ""] {
            let resource = with_properties(ManagedClusterProperties {
                network_profile: Some(NetworkProfile {
                    network_policy: Some(policy.to_string()),
                    ..Default::default()
                }),
                ..Default::default()
            });
            assert!(
                resource.has_network_policy_enabled(),
                "policy {policy:?} should count as enabled"
            );
        }

        let null_policy =
            from_json(r#"{"properties": {"networkProfile": {"networkPlugin": "kubenet", "networkPolicy": null}}}"#);
        assert!(!null_policy.has_network_policy_enabled());

        let no_policy = from_json(r#"{"properties": {"networkProfile": {"networkPlugin": "kubenet"}}}"#);
        assert!(!no_policy.has_network_policy_enabled());

        assert!(!from_json(r#"{"properties": {}}"#).has_network_policy_enabled());
    }

    #[test]
    fn test_authorized_ranges() {
        let restricted = with_properties(ManagedClusterProperties {
            api_server_access_profile: Some(ApiServerAccessProfile {
                authorized_ip_ranges: Some(Some(vec!["10.0.0.0/8".to_string()])),
                ..Default::default()
            }),
            ..Default::default()
        });
        assert_eq!(restricted.api_server_access_ranges(), vec!["10.0.0.0/8"]);
        assert!(!restricted.has_public_api_authorized_ranges());

        let mixed = from_json(
            r#"{"properties": {"apiServerAccessProfile": {"authorizedIPRanges": ["10.0.0.0/8", "0.0.0.0/0"]}}}"#,
        );
        assert!(mixed.has_public_api_authorized_ranges());

        let profile_without_ranges =
            from_json(r#"{"properties": {"apiServerAccessProfile": {"enablePrivateCluster": false}}}"#);
        assert_eq!(profile_without_ranges.api_server_access_ranges(), vec![PUBLIC_CIDR]);

        let empty = from_json(r#"{"properties": {"apiServerAccessProfile": {"authorizedIPRanges": []}}}"#);
        assert!(empty.api_server_access_ranges().is_empty());
        assert!(!empty.has_public_api_authorized_ranges());
    }

    #[test]
    fn test_null_ranges_differ_from_missing_ranges() {
        let private = from_json(
            r#"{"properties": {"apiServerAccessProfile": {"authorizedIPRanges": null, "enablePrivateCluster": true}}}"#,
        );
        assert!(private.api_server_access_ranges().is_empty());
        assert!(!private.has_public_api_authorized_ranges());

        let missing =
            from_json(r#"{"properties": {"apiServerAccessProfile": {"enablePrivateCluster": true}}}"#);
        assert_eq!(missing.api_server_access_ranges(), vec![PUBLIC_CIDR]);
        assert!(missing.has_public_api_authorized_ranges());
    }

    #[test]
    fn test_rbac_flag() {
        assert!(from_json(r#"{"properties": {"enableRBAC": true}}"#).has_rbac_enabled());
        assert!(!from_json(r#"{"properties": {"enableRBAC": false}}"#).has_rbac_enabled());
        assert!(!from_json(r#"{"properties": {"enableRBAC": null}}"#).has_rbac_enabled());
    }

    #[test]
    fn test_attributes_and_display() {
        let resource = ClusterResource::from_cluster(ManagedCluster {
            name: Some("prod".to_string()),
            id: Some("/subscriptions/s/prod".to_string()),
            etag: Some("e1".to_string()),
            resource_type: Some("Microsoft.ContainerService/ManagedClusters".to_string()),
            location: Some("westeurope".to_string()),
            tags: Some(BTreeMap::from([("team".to_string(), "platform".to_string())])),
            properties: Some(ManagedClusterProperties {
                addon_profiles: Some(BTreeMap::from([(
                    OMS_AGENT_ADDON.to_string(),
                    AddonProfile { enabled: Some(true) },
                )])),
                ..Default::default()
            }),
        });

        assert!(resource.exists());
        assert_eq!(resource.id(), "/subscriptions/s/prod");
        assert_eq!(resource.etag(), Some("e1"));
        assert_eq!(resource.resource_type(), "Microsoft.ContainerService/ManagedClusters");
        assert_eq!(resource.tags()["team"], "platform");
        assert!(resource.has_logging_enabled());
        assert_eq!(resource.to_string(), "'prod' AKS Cluster");
    }
}
