//! AKS configuration audit.
//!
//! Evaluates a fixed catalog of security controls against the configuration
//! of an Azure Kubernetes Service cluster.
//!
//! # Example
//!
//! ```rust,ignore
//! use aks_audit::audit::{AuditConfig, Target, run_audit};
//! use aks_audit::azure::AzureApiClient;
//!
//! let client = AzureApiClient::new("<subscription-id>", "<access-token>")?;
//! let target: Target = "my-rg/my-cluster".parse()?;
//! let report = run_audit(&client, &target, &AuditConfig::default())?;
//!
//! for result in &report.results {
//!     println!("{} {}: {}", result.id, result.title, result.passed);
//! }
//! ```
//!
//! # Controls
//!
//! - `aks-1` Logging to Azure Monitor is configured
//! - `aks-2` RBAC is enabled
//! - `aks-3` API server authorized IP ranges exclude `0.0.0.0/0`
//! - `aks-4` Network policy is enabled

pub mod config;
pub mod controls;
pub mod formatter;
pub mod run;
pub mod types;

pub use config::AuditConfig;
pub use controls::{Control, builtin_controls};
pub use formatter::{OutputFormat, format_reports_to_string};
pub use run::{
    AuditReport, AuditSummary, ControlResult, Target, TargetError, audit_resource,
    available_controls, evaluate, run_audit,
};
pub use types::{ControlTags, Expectation, Predicate, Reference, Severity};
