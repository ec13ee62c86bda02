//! Data types for the rule model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single association rule mined by the trainer.
///
/// When every song in `antecedent` appears in a caller's input, the rule
/// votes `confidence` for each song in `consequent` the caller doesn't
/// already know.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rule {
    /// Songs that must all be present in the input for the rule to fire
    pub antecedent: Vec<String>,
    /// Songs the rule suggests when it fires
    pub consequent: Vec<String>,
    /// Strength of the association, conventionally in (0, 1]
    pub confidence: f64,
}

/// An immutable snapshot of the full rule model.
///
/// Built once per artifact load and handed out behind an `Arc`; in-flight
/// requests keep the snapshot they were given even if a reload swaps in a
/// newer one mid-request.
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<Rule>,
    fingerprint: String,
    loaded_at: DateTime<Utc>,
}

impl RuleSet {
    pub fn new(rules: Vec<Rule>, fingerprint: String) -> Self {
        Self {
            rules,
            fingerprint,
            loaded_at: Utc::now(),
        }
    }

    /// Rules in the order the trainer emitted them.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Hex digest of the artifact bytes this snapshot was built from.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    /// When this snapshot was loaded into memory.
    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Health snapshot of the rule store, for external health-check wiring.
#[derive(Debug, Clone, Serialize)]
pub struct ModelStatus {
    /// Whether any rule set has ever loaded successfully
    pub model_loaded: bool,
    /// Number of rules in the active set (0 if none)
    pub rule_count: usize,
    /// Fingerprint of the active set, if any
    pub fingerprint: Option<String>,
    /// When the active set was loaded, if any
    pub loaded_at: Option<DateTime<Utc>>,
}
