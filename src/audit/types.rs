//! Core types for AKS audit controls.
//!
//! - `Severity` - banded form of a control's impact score
//! - `Expectation` - whether a predicate should hold or not
//! - `Predicate` - the cluster property a control asserts on
//! - `Reference` / `ControlTags` - descriptive control metadata

use crate::azure::ClusterResource;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Severity levels derived from a control's impact.
///
/// Ordered from most severe to least severe:
/// `Critical > High > Medium > Low > Info`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Impact 0.9 and above
    Critical,
    /// Impact 0.7 up to 0.9
    High,
    /// Impact 0.4 up to 0.7
    Medium,
    /// Any non-zero impact below 0.4
    #[default]
    Low,
    /// Zero impact, reported but never fails a run
    #[serde(alias = "none")]
    Info,
}

impl Severity {
    /// Band an impact score. Out-of-range scores are clamped to 0.0..=1.0.
    pub fn from_impact(impact: f64) -> Self {
        let impact = impact.clamp(0.0, 1.0);
        if impact >= 0.9 {
            Self::Critical
        } else if impact >= 0.7 {
            Self::High
        } else if impact >= 0.4 {
            Self::Medium
        } else if impact > 0.0 {
            Self::Low
        } else {
            Self::Info
        }
    }

    /// Get the string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
            Self::Info => "info",
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Self::Critical => 4,
            Self::High => 3,
            Self::Medium => 2,
            Self::Low => 1,
            Self::Info => 0,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Ord for Severity {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl PartialOrd for Severity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Expected polarity of a control's predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expectation {
    /// The predicate must be true
    #[default]
    Should,
    /// The predicate must be false
    ShouldNot,
}

impl Expectation {
    /// Whether an observed predicate value satisfies this expectation.
    pub fn is_met_by(&self, value: bool) -> bool {
        match self {
            Self::Should => value,
            Self::ShouldNot => !value,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Should => "should",
            Self::ShouldNot => "should not",
        }
    }
}

/// A boolean property of a cluster that controls assert on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Predicate {
    LoggingEnabled,
    RbacEnabled,
    PublicApiAuthorizedRanges,
    NetworkPolicyEnabled,
}

impl Predicate {
    pub const ALL: [Predicate; 4] = [
        Self::LoggingEnabled,
        Self::RbacEnabled,
        Self::PublicApiAuthorizedRanges,
        Self::NetworkPolicyEnabled,
    ];

    /// Config key, e.g. `rbac-enabled`.
    pub fn key(&self) -> &'static str {
        match self {
            Self::LoggingEnabled => "logging-enabled",
            Self::RbacEnabled => "rbac-enabled",
            Self::PublicApiAuthorizedRanges => "public-api-authorized-ranges",
            Self::NetworkPolicyEnabled => "network-policy-enabled",
        }
    }

    /// Matcher phrase used in result messages ("have rbac enabled").
    pub fn phrase(&self) -> &'static str {
        match self {
            Self::LoggingEnabled => "have logging enabled",
            Self::RbacEnabled => "have rbac enabled",
            Self::PublicApiAuthorizedRanges => "have public api authorized ranges",
            Self::NetworkPolicyEnabled => "have network policy enabled",
        }
    }

    /// Read the predicate from a fetched cluster.
    pub fn evaluate(&self, resource: &ClusterResource) -> bool {
        match self {
            Self::LoggingEnabled => resource.has_logging_enabled(),
            Self::RbacEnabled => resource.has_rbac_enabled(),
            Self::PublicApiAuthorizedRanges => resource.has_public_api_authorized_ranges(),
            Self::NetworkPolicyEnabled => resource.has_network_policy_enabled(),
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// A titled documentation link attached to a control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    pub title: String,
    pub url: String,
}

impl Reference {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
        }
    }
}

/// Free-form classification tags of a control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlTags {
    #[serde(default = "default_platform")]
    pub platform: String,
    #[serde(default)]
    pub category: String,
    #[serde(default = "default_resource")]
    pub resource: String,
    /// Relative remediation effort, 0.0 (trivial) to 1.0 (rebuild)
    #[serde(default)]
    pub effort: f64,
}

fn default_platform() -> String {
    "Azure".to_string()
}

fn default_resource() -> String {
    "AKS".to_string()
}

impl Default for ControlTags {
    fn default() -> Self {
        Self {
            platform: default_platform(),
            category: String::new(),
            resource: default_resource(),
            effort: 0.0,
        }
    }
}

impl ControlTags {
    pub fn new(category: impl Into<String>, effort: f64) -> Self {
        Self {
            category: category.into(),
            effort,
            ..Self::default()
        }
    }
}
