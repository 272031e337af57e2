//! Azure management API client module
//!
//! Provides authenticated read access to AKS managed cluster resources.
//!
//! # Example
//!
//! ```rust,ignore
//! use aks_audit::azure::api::{AzureApiClient, ClusterApi};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = AzureApiClient::new("<subscription-id>", "<access-token>")?;
//!     let cluster = client.get_cluster("my-rg", "my-cluster")?;
//!     println!("Location: {:?}", cluster.location);
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod types;

pub use client::{AzureApiClient, ClusterApi, DEFAULT_API_VERSION, DEFAULT_ENDPOINT};
pub use error::{AzureApiError, Result};
pub use types::{
    AddonProfile, ApiServerAccessProfile, ManagedCluster, ManagedClusterProperties,
    NetworkProfile,
};
