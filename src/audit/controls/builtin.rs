//! Built-in AKS controls.
//!
//! The catalog is ordered; reports list results in this order.

use crate::audit::controls::Control;
use crate::audit::types::{ControlTags, Predicate};

const AZURE_SECURITY: &str = "https://docs.microsoft.com/en-us/azure/aks/concepts-security";

/// Get all built-in controls.
pub fn builtin_controls() -> Vec<Control> {
    vec![
        Control::new(
            "aks-1",
            "Ensure logging to Azure Monitor is configured",
            0.9,
            Predicate::LoggingEnabled,
        )
        .with_description(
            "Azure Monitor for containers collects memory and processor metrics from controllers, nodes, and containers that are available in Kubernetes through the Metrics API. Container logs are also collected. Metrics are written to the metrics store and log data is written to the logs store associated with an Log Analytics workspace.  To ensure more complete visibility of activity inside an AKS cluster, this setting should be enabled.",
        )
        .with_remediation(
            "Use the CLI or Terraform to enable the Azure Monitor addon.  This can be performed on new or existing clusters.",
        )
        .with_validation(
            "Run `az aks show -g <resourceGroupofAKSCluster> -n <nameofAksCluster>` and confirm that `addonProfiles > omsagent > enabled` is true.  Or, via kubectl, run `kubectl get ds omsagent --namespace=kube-system` and `kubectl get deployment omsagent-rs -n=kube-system` and confirm the pods are healthy.",
        )
        .with_tags(ControlTags::new("Management and Governance", 0.2))
        .with_reference(
            "Enable on new AKS cluster",
            "https://docs.microsoft.com/en-us/azure/azure-monitor/insights/container-insights-enable-new-cluster",
        )
        .with_reference(
            "Enable on existing AKS cluster",
            "https://docs.microsoft.com/en-us/azure/azure-monitor/insights/container-insights-enable-existing-clusters",
        )
        .with_reference(
            "Enable AKS Addons",
            "https://docs.microsoft.com/en-us/cli/azure/aks?view=azure-cli-latest#az-aks-enable-addons",
        )
        .with_reference("Azure Security", AZURE_SECURITY),
        Control::new(
            "aks-2",
            "Ensure RBAC is enabled",
            1.0,
            Predicate::RbacEnabled,
        )
        .with_description(
            "In Kubernetes, the primary method of authorization is Role-Based Access Control (RBAC), and it should be enabled in all clusters to be able to regulate differentiated access to Kubernetes API resources to users and groups.  In AKS, this setting is enabled by default but can be overridden and disabled.  Any authenticated user, including pods running in the cluster with a service account mounted, have full control over the cluster, the compute resources, the applications, and data inside the cluster if RBAC is not enabled.",
        )
        .with_remediation(
            "Recreate the AKS cluster with `--enable-rbac=true` and ensure that all applications inside the cluster have appropriate Roles, ClusterRoles, RoleBindings, and ClusterRoleBindings for their access to the API Server.",
        )
        .with_validation(
            "Run `az aks show -g <resourceGroupofAKSCluster> -n <nameofAksCluster>` and confirm the output shows that RBAC is enabled.",
        )
        .with_tags(ControlTags::new("Identity and Access Management", 1.0))
        .with_reference(
            "AKS CLI Options",
            "https://docs.microsoft.com/en-us/cli/azure/aks?view=azure-cli-latest#az-aks-create",
        )
        .with_reference(
            "Kubernetes RBAC",
            "https://kubernetes.io/docs/reference/access-authn-authz/authorization/",
        )
        .with_reference("Azure Security", AZURE_SECURITY),
        Control::new(
            "aks-3",
            "Ensure API Server Authorized IP Ranges are configured",
            0.8,
            Predicate::PublicApiAuthorizedRanges,
        )
        .should_not()
        .with_description(
            "By default, the AKS Kubernetes API server is available on a public IP address with an access control list that allows any IP address (0.0.0.0/0) to connect.  While this makes administration convenient, the scope of potential attackers is not limited should a newly discovered vulnerability or denial-of-service become available.  Also, should valid credentials from a phished administrator/developer be stolen or leaked, they can be directly used without having to originate from a known set of IP ranges.",
        )
        .with_remediation(
            "Develop a remote cluster access strategy that funnels administrative access through a known subset of IP addresses or ranges, and configure the Authorized IP Ranges to include only those IPs and/or ranges.  Use `az aks create` or `az aks update` to set or update the `--api-server-authorized-ip-ranges` flag with a comma separated list of IPs/ranges. Optionally, enable `--enable-private-cluster` to prevent the API server from receiving a public IP address.",
        )
        .with_validation(
            "Run `az aks show -g <resourceGroupofAKSCluster> -n <nameofAksCluster>` and confirm the output shows that the authorized IP ranges do not include 0.0.0.0/0.",
        )
        .with_tags(ControlTags::new("Network Access Control", 0.5))
        .with_reference(
            "AKS Authorized IP Ranges",
            "https://docs.microsoft.com/en-us/azure/aks/api-server-authorized-ip-ranges",
        )
        .with_reference(
            "AKS CLI Options",
            "https://docs.microsoft.com/en-us/cli/azure/aks?view=azure-cli-latest#az-aks-create",
        )
        .with_reference(
            "AKS CLI Options",
            "https://docs.microsoft.com/en-us/cli/azure/aks?view=azure-cli-latest#az-aks-update",
        )
        .with_reference("Azure Security", AZURE_SECURITY),
        Control::new(
            "aks-4",
            "Ensure Network policy is enabled",
            0.8,
            Predicate::NetworkPolicyEnabled,
        )
        .with_description(
            "By default, all Kubernetes pods inside a cluster can communicate with each other--even across namespaces.  All production Kubernetes clusters should have support enabled for being able to define Layer 4 `NetworkPolicy` resources, and in many cases, this is an optional addon that must be explicitly enabled.  With this support enabled, it's possible to define policies inside the cluster that restrict inbound and outbound network traffic to pods within namespaces and provide micro-segmentation.  Should a pod become compromised, strict `NetworkPolicy` configurations can significantly limit the attacker's ability to move laterally via the network.",
        )
        .with_remediation(
            "During AKS cluster creation, specify `--network-plugin azure` and `--network-policy azure` (or `--network-policy calico`).  This cannot be updated on running clusters.",
        )
        .with_validation(
            "Run `az aks show -g <resourceGroupofAKSCluster> -n <nameofAksCluster>` and confirm the output shows that the `network-policy` setting is set to `azure` or `calico`.",
        )
        .with_tags(ControlTags::new("Network Access Control", 0.9))
        .with_reference(
            "AKS Network Policies",
            "https://docs.microsoft.com/en-us/azure/aks/use-network-policies",
        )
        .with_reference(
            "Network Policy",
            "https://kubernetes.io/docs/concepts/services-networking/network-policies/#the-networkpolicy-resource",
        )
        .with_reference("Azure Security", AZURE_SECURITY),
    ]
}
