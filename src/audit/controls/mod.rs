//! Audit control definitions.
//!
//! A control is declarative metadata plus one assertion: a [`Predicate`] read
//! from the cluster and the [`Expectation`] it must satisfy.

pub mod builtin;

pub use builtin::builtin_controls;

use crate::audit::types::{ControlTags, Expectation, Predicate, Reference, Severity};
use crate::azure::ClusterResource;
use serde::{Deserialize, Serialize};

/// A single named audit check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Control {
    /// Unique identifier (e.g. "aks-2").
    pub id: String,

    pub title: String,

    #[serde(default)]
    pub description: String,

    /// How to fix a failing cluster.
    #[serde(default)]
    pub remediation: String,

    /// How to verify the setting by hand.
    #[serde(default)]
    pub validation: String,

    /// Impact score between 0.0 and 1.0.
    pub impact: f64,

    #[serde(default)]
    pub tags: ControlTags,

    #[serde(default)]
    pub references: Vec<Reference>,

    pub predicate: Predicate,

    #[serde(default)]
    pub expect: Expectation,
}

impl Control {
    /// Create a control asserting that `predicate` holds.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        impact: f64,
        predicate: Predicate,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            remediation: String::new(),
            validation: String::new(),
            impact,
            tags: ControlTags::default(),
            references: Vec::new(),
            predicate,
            expect: Expectation::Should,
        }
    }

    /// Require the predicate to be false instead.
    pub fn should_not(mut self) -> Self {
        self.expect = Expectation::ShouldNot;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_remediation(mut self, remediation: impl Into<String>) -> Self {
        self.remediation = remediation.into();
        self
    }

    pub fn with_validation(mut self, validation: impl Into<String>) -> Self {
        self.validation = validation.into();
        self
    }

    pub fn with_tags(mut self, tags: ControlTags) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_reference(mut self, title: impl Into<String>, url: impl Into<String>) -> Self {
        self.references.push(Reference::new(title, url));
        self
    }

    pub fn severity(&self) -> Severity {
        Severity::from_impact(self.impact)
    }

    /// Assertion text, e.g. "should not have public api authorized ranges".
    pub fn expectation_text(&self) -> String {
        format!("{} {}", self.expect.as_str(), self.predicate.phrase())
    }

    /// Whether `resource` satisfies this control.
    pub fn passes(&self, resource: &ClusterResource) -> bool {
        self.expect.is_met_by(self.predicate.evaluate(resource))
    }
}
