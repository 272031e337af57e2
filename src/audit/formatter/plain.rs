//! Plain text formatter.

use crate::audit::run::{AuditReport, TargetError};
use crate::audit::types::Severity;
use colored::Colorize;

/// Format audit reports as plain text.
pub fn format(reports: &[AuditReport], errors: &[TargetError]) -> String {
    let mut output = String::new();

    for report in reports {
        output.push_str(&format!("{}:\n", report.target.to_string().bold()));
        if !report.cluster_exists {
            output.push_str("  cluster not found, evaluated against empty configuration\n");
        }

        for result in &report.results {
            let status = if result.passed {
                "PASS".green()
            } else {
                "FAIL".red()
            };
            output.push_str(&format!(
                "  {} {} [{}] {} - {}\n",
                status,
                result.id,
                severity_label(result.severity),
                result.title,
                result.message,
            ));

            if !result.passed && !result.remediation.is_empty() {
                output.push_str(&format!("      Remediation: {}\n", result.remediation));
            }
        }

        output.push_str(&format!(
            "  {} passed, {} failed\n\n",
            report.summary.passed_count, report.summary.failed_count
        ));
    }

    for failed in errors {
        output.push_str(&format!("{}:\n", failed.target.to_string().bold()));
        output.push_str(&format!("  {} {}\n\n", "ERROR".red().bold(), failed.error));
    }

    if reports.is_empty() && errors.is_empty() {
        output.push_str("No clusters audited.\n");
    }

    output
}

fn severity_label(severity: Severity) -> String {
    match severity {
        Severity::Critical => severity.as_str().red().bold().to_string(),
        Severity::High => severity.as_str().red().to_string(),
        Severity::Medium => severity.as_str().yellow().to_string(),
        Severity::Low | Severity::Info => severity.as_str().to_string(),
    }
}
