//! Audit orchestration.
//!
//! Fetches one cluster per target and evaluates the selected controls
//! against it.

use crate::audit::config::AuditConfig;
use crate::audit::controls::{Control, builtin_controls};
use crate::audit::types::{Reference, Severity};
use crate::azure::{ClusterApi, ClusterResource};
use crate::error::AuditError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A cluster to audit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Target {
    pub resource_group: String,
    pub cluster_name: String,
}

impl Target {
    pub fn new(resource_group: impl Into<String>, cluster_name: impl Into<String>) -> Self {
        Self {
            resource_group: resource_group.into(),
            cluster_name: cluster_name.into(),
        }
    }
}

impl FromStr for Target {
    type Err = AuditError;

    /// Parse `<resource-group>/<cluster-name>`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('/') {
            Some((group, name))
                if !group.trim().is_empty() && !name.trim().is_empty() && !name.contains('/') =>
            {
                Ok(Self::new(group.trim(), name.trim()))
            }
            _ => Err(AuditError::InvalidTarget(s.to_string())),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.resource_group, self.cluster_name)
    }
}

/// Outcome of one control against one cluster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlResult {
    pub id: String,
    pub title: String,
    pub impact: f64,
    pub severity: Severity,
    pub category: String,
    pub passed: bool,
    /// Assertion text, e.g. "should have rbac enabled"
    pub message: String,
    pub remediation: String,
    pub validation: String,
    pub references: Vec<Reference>,
}

/// Summary of an audit run for one target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditSummary {
    pub controls_run: usize,
    pub passed_count: usize,
    pub failed_count: usize,
    /// Whether the run passed (no failures at or above the threshold).
    pub passed: bool,
}

/// Result of auditing one cluster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditReport {
    pub target: Target,
    /// False when the API reported the cluster as not found.
    pub cluster_exists: bool,
    pub results: Vec<ControlResult>,
    pub summary: AuditSummary,
}

impl AuditReport {
    pub fn new(target: Target, cluster_exists: bool) -> Self {
        Self {
            target,
            cluster_exists,
            results: Vec::new(),
            summary: AuditSummary {
                controls_run: 0,
                passed_count: 0,
                failed_count: 0,
                passed: true,
            },
        }
    }

    pub fn failures(&self) -> impl Iterator<Item = &ControlResult> {
        self.results.iter().filter(|r| !r.passed)
    }

    pub fn has_failures(&self) -> bool {
        self.failures().next().is_some()
    }

    /// Get the maximum severity among failed controls.
    pub fn max_failed_severity(&self) -> Option<Severity> {
        self.failures().map(|r| r.severity).max()
    }

    /// Check if the results should cause a non-zero exit.
    pub fn should_fail(&self, config: &AuditConfig) -> bool {
        if config.no_fail {
            return false;
        }

        self.max_failed_severity()
            .is_some_and(|max| max >= config.failure_threshold && max > Severity::Info)
    }
}

/// A target whose audit stopped with an error, kept for reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetError {
    pub target: Target,
    pub error: String,
}

impl TargetError {
    pub fn new(target: Target, error: &AuditError) -> Self {
        Self {
            target,
            error: error.to_string(),
        }
    }
}

/// Evaluate a single control against a fetched cluster.
pub fn evaluate(control: &Control, resource: &ClusterResource) -> ControlResult {
    let passed = control.passes(resource);
    log::debug!(
        "{} [{}] {}: {}",
        control.id,
        control.severity(),
        control.expectation_text(),
        if passed { "pass" } else { "fail" }
    );

    ControlResult {
        id: control.id.clone(),
        title: control.title.clone(),
        impact: control.impact,
        severity: control.severity(),
        category: control.tags.category.clone(),
        passed,
        message: control.expectation_text(),
        remediation: control.remediation.clone(),
        validation: control.validation.clone(),
        references: control.references.clone(),
    }
}

/// Built-in controls followed by the configured custom controls.
pub fn available_controls(config: &AuditConfig) -> Vec<Control> {
    let mut controls = builtin_controls();
    controls.extend(config.custom_controls.iter().cloned());
    controls
}

/// Evaluate the selected controls against an already fetched cluster.
pub fn audit_resource(
    target: &Target,
    resource: &ClusterResource,
    config: &AuditConfig,
) -> AuditReport {
    let controls = available_controls(config);
    let selected = config.resolve_controls(&controls);

    let mut report = AuditReport::new(target.clone(), resource.exists());
    report.results = selected
        .into_iter()
        .map(|control| evaluate(control, resource))
        .collect();

    report.summary.controls_run = report.results.len();
    report.summary.failed_count = report.failures().count();
    report.summary.passed_count = report.summary.controls_run - report.summary.failed_count;
    report.summary.passed = !report.should_fail(config);
    report
}

/// Fetch `target` through `api` and audit it.
///
/// A missing cluster is audited against the absent baseline, so every
/// control asserting a positive setting fails. Authorization, transport and
/// malformed-response errors abort the run for this target.
pub fn run_audit<A: ClusterApi + ?Sized>(
    api: &A,
    target: &Target,
    config: &AuditConfig,
) -> Result<AuditReport, AuditError> {
    log::info!("Auditing AKS cluster {}", target);

    let resource = ClusterResource::fetch(api, &target.resource_group, &target.cluster_name)
        .map_err(|source| AuditError::Fetch {
            target: target.to_string(),
            source,
        })?;

    let report = audit_resource(target, &resource, config);
    log::info!(
        "{}: {} of {} controls passed",
        target,
        report.summary.passed_count,
        report.summary.controls_run
    );
    Ok(report)
}
