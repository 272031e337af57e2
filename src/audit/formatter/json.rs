//! JSON formatter.

use crate::audit::run::{AuditReport, TargetError};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Format audit reports as JSON.
pub fn format(reports: &[AuditReport], errors: &[TargetError]) -> String {
    let output = JsonOutput {
        tool: "aks-audit",
        version: crate::VERSION,
        generated_at: Utc::now(),
        passed: errors.is_empty() && reports.iter().all(|r| r.summary.passed),
        reports,
        errors,
    };
    serde_json::to_string_pretty(&output).unwrap_or_else(|_| "{}".to_string())
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    tool: &'static str,
    version: &'static str,
    generated_at: DateTime<Utc>,
    passed: bool,
    reports: &'a [AuditReport],
    errors: &'a [TargetError],
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::config::AuditConfig;
    use crate::audit::run::{Target, audit_resource};
    use crate::azure::ClusterResource;

    #[test]
    fn test_json_shape() {
        let report = audit_resource(
            &Target::new("rg", "gone"),
            &ClusterResource::absent(),
            &AuditConfig::default(),
        );
        let output = format(&[report], &[]);
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["tool"], "aks-audit");
        assert_eq!(value["passed"], false);
        let first = &value["reports"][0];
        assert_eq!(first["target"]["resource_group"], "rg");
        assert_eq!(first["cluster_exists"], false);
        assert_eq!(first["results"][1]["id"], "aks-2");
        assert_eq!(first["results"][1]["severity"], "critical");
        assert_eq!(first["summary"]["failed_count"], 4);
        assert_eq!(value["errors"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn test_json_lists_errored_targets() {
        let error = TargetError {
            target: Target::new("rg", "locked"),
            error: "Failed to fetch AKS cluster rg/locked: Rate limit exceeded".to_string(),
        };
        let value: serde_json::Value =
            serde_json::from_str(&format(&[], &[error])).unwrap();

        assert_eq!(value["passed"], false);
        assert_eq!(value["errors"][0]["target"]["cluster_name"], "locked");
        assert!(
            value["errors"][0]["error"]
                .as_str()
                .unwrap()
                .contains("Rate limit")
        );
    }
}
