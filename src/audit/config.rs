//! Control selection for an audit run.
//!
//! Provides:
//! - Control inclusion/exclusion by id
//! - Custom controls built on the existing predicates
//! - Failure threshold and `no_fail`

use crate::audit::controls::Control;
use crate::audit::types::Severity;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Configuration for an audit run (the `[audit]` table).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Control ids to run. Empty means every available control.
    #[serde(default)]
    pub include: Vec<String>,

    /// Control ids to skip. Takes precedence over `include`.
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Extra controls appended after the built-in catalog.
    #[serde(default)]
    pub custom_controls: Vec<Control>,

    /// Failed controls at or above this severity fail the run.
    #[serde(default)]
    pub failure_threshold: Severity,

    /// If true, never fail the run.
    #[serde(default)]
    pub no_fail: bool,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            include: Vec::new(),
            exclude: Vec::new(),
            custom_controls: Vec::new(),
            failure_threshold: Severity::Low,
            no_fail: false,
        }
    }
}

impl AuditConfig {
    /// Create a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a control to the include list.
    pub fn include(mut self, control: impl Into<String>) -> Self {
        self.include.push(control.into());
        self
    }

    /// Add a control to the exclude list.
    pub fn exclude(mut self, control: impl Into<String>) -> Self {
        self.exclude.push(control.into());
        self
    }

    /// Set the failure threshold.
    pub fn with_threshold(mut self, threshold: Severity) -> Self {
        self.failure_threshold = threshold;
        self
    }

    pub fn with_custom_control(mut self, control: Control) -> Self {
        self.custom_controls.push(control);
        self
    }

    pub fn is_control_excluded(&self, id: &str) -> bool {
        self.exclude.iter().any(|e| e == id)
    }

    pub fn is_control_included(&self, id: &str) -> bool {
        self.include.is_empty() || self.include.iter().any(|i| i == id)
    }

    /// Get the controls to run, in catalog order.
    pub fn resolve_controls<'a>(&self, available: &'a [Control]) -> Vec<&'a Control> {
        available
            .iter()
            .filter(|control| {
                !self.is_control_excluded(&control.id) && self.is_control_included(&control.id)
            })
            .collect()
    }

    /// Check custom controls against the built-in catalog.
    pub fn validate(&self, builtin: &[Control]) -> Result<(), ConfigError> {
        let mut seen: HashSet<&str> = builtin.iter().map(|c| c.id.as_str()).collect();

        for control in &self.custom_controls {
            if control.id.trim().is_empty() {
                return Err(ConfigError::Invalid(
                    "custom control with empty id".to_string(),
                ));
            }
            if !seen.insert(control.id.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate control id '{}'",
                    control.id
                )));
            }
            if !(0.0..=1.0).contains(&control.impact) {
                return Err(ConfigError::Invalid(format!(
                    "control '{}' has impact {} outside 0.0..=1.0",
                    control.id, control.impact
                )));
            }
        }

        Ok(())
    }
}
