//! Handler for the `run` command.

use crate::audit::{
    AuditReport, OutputFormat, Target, TargetError, builtin_controls, format_reports_to_string,
    run_audit,
};
use crate::azure::{AzureApiClient, ClusterApi};
use crate::config::Config;
use crate::error::{AuditError, ConfigError, Result};
use std::fs;
use std::path::PathBuf;

/// Options for the run command
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Targets given on the command line as `rg/name`
    pub clusters: Vec<String>,
    pub subscription: Option<String>,
    pub endpoint: Option<String>,
    pub include: Vec<String>,
    pub exclude: Vec<String>,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub no_fail: bool,
}

/// Audit every target and emit the report. Returns whether the run passed.
pub fn handle_run(options: RunOptions, mut config: Config) -> Result<bool> {
    if let Some(subscription) = options.subscription.clone() {
        config.azure.subscription_id = Some(subscription);
    }
    if let Some(endpoint) = options.endpoint.clone() {
        config.azure.endpoint = endpoint;
    }

    let targets = resolve_targets(&options, &config)?;

    let client = AzureApiClient::with_endpoint(
        config.azure.endpoint.clone(),
        config.azure.api_version.clone(),
        config.azure.subscription()?,
        config.azure.access_token.clone().unwrap_or_default(),
    )?;

    run_targets(&client, &targets, options, config)
}

/// Run the audit against an arbitrary cluster source.
pub fn run_targets<A: ClusterApi + ?Sized>(
    api: &A,
    targets: &[Target],
    options: RunOptions,
    mut config: Config,
) -> Result<bool> {
    config.audit.include.extend(options.include);
    config.audit.exclude.extend(options.exclude);
    config.audit.no_fail |= options.no_fail;
    config.audit.validate(&builtin_controls())?;

    let mut reports: Vec<AuditReport> = Vec::with_capacity(targets.len());
    let mut errors: Vec<TargetError> = Vec::new();
    let mut first_error: Option<AuditError> = None;

    for target in targets {
        match run_audit(api, target, &config.audit) {
            Ok(report) => reports.push(report),
            Err(err) => {
                log::error!("{}", err);
                errors.push(TargetError::new(target.clone(), &err));
                first_error.get_or_insert(err);
            }
        }
    }

    match &options.output {
        Some(path) => {
            // colour detection looks at stdout, not the file
            colored::control::set_override(false);
            let rendered = format_reports_to_string(&reports, &errors, options.format);
            colored::control::unset_override();

            fs::write(path, &rendered)?;
            log::info!("Report written to {}", path.display());
        }
        None => print!(
            "{}",
            format_reports_to_string(&reports, &errors, options.format)
        ),
    }

    if let Some(err) = first_error {
        return Err(err);
    }

    Ok(reports.iter().all(|r| r.summary.passed))
}

fn resolve_targets(options: &RunOptions, config: &Config) -> Result<Vec<Target>> {
    let targets = if options.clusters.is_empty() {
        config.targets.clone()
    } else {
        options
            .clusters
            .iter()
            .map(|c| c.parse())
            .collect::<Result<Vec<Target>>>()?
    };

    if targets.is_empty() {
        return Err(ConfigError::Invalid(
            "no clusters to audit - pass --cluster <resource-group>/<cluster-name> or add [[targets]]"
                .to_string(),
        )
        .into());
    }

    Ok(targets)
}
