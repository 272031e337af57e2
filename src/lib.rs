//! # AKS Audit
//!
//! Audits the configuration of Azure Kubernetes Service clusters against
//! security best practices.
//!
//! ## Features
//!
//! - **Single read per cluster**: one Azure Resource Manager call feeds every control
//! - **Safe defaults**: missing configuration evaluates as the insecure state
//! - **Distinct failures**: not-found clusters are audited, auth and network errors are reported
//! - **Custom controls**: reuse the built-in predicates from the config file
//!
//! ## Example
//!
//! ```rust,no_run
//! use aks_audit::audit::{AuditConfig, Target, run_audit};
//! use aks_audit::azure::AzureApiClient;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = AzureApiClient::new("<subscription-id>", "<access-token>")?;
//! let target: Target = "my-rg/my-cluster".parse()?;
//! let report = run_audit(&client, &target, &AuditConfig::default())?;
//! println!("passed: {}", report.summary.passed);
//! # Ok(())
//! # }
//! ```

pub mod audit;
pub mod azure;
pub mod cli;
pub mod config;
pub mod error;
pub mod handlers;

// Re-export commonly used types and functions
pub use audit::{AuditConfig, AuditReport, Control, Target, run_audit};
pub use azure::{AzureApiClient, ClusterApi, ClusterResource};
pub use error::{AuditError, ConfigError, Result};
use cli::Commands;
use config::Config;

/// The current version of the CLI tool
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Execute a command. Returns whether the audit passed.
pub fn run_command(command: Commands, config: Config) -> Result<bool> {
    match command {
        Commands::Run {
            clusters,
            subscription,
            endpoint,
            include,
            exclude,
            format,
            output,
            no_fail,
        } => handlers::handle_run(
            handlers::RunOptions {
                clusters,
                subscription,
                endpoint,
                include,
                exclude,
                format,
                output,
                no_fail,
            },
            config,
        ),
        Commands::Controls { json } => handlers::handle_controls(json, &config).map(|_| true),
    }
}
