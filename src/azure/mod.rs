//! Azure resource access for AKS audits.

pub mod api;
pub mod resource;

pub use api::{AzureApiClient, AzureApiError, ClusterApi, ManagedCluster};
pub use resource::{ClusterResource, PUBLIC_CIDR};
