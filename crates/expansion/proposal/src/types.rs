//! Core type definitions for intent proposals.
//!
//! Proposal level and action, the proposal record itself, and the
//! run-scoped thresholds that govern admission.

use serde::{Deserialize, Serialize};

use expansion_taxonomy::{IntentId, ThemeId};

use crate::error::{ExpansionError, ExpansionResult};

// ── Level & Action ──────────────────────────────────────────────────────

/// Where a proposed intent sits in the hierarchy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentLevel {
    Primary,
    Secondary,
}

impl std::fmt::Display for IntentLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Primary => write!(f, "primary"),
            Self::Secondary => write!(f, "secondary"),
        }
    }
}

/// Whether the proposal is a brand-new intent or carved out of an existing one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProposalAction {
    New,
    Split,
}

impl std::fmt::Display for ProposalAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::New => write!(f, "new"),
            Self::Split => write!(f, "split"),
        }
    }
}

// ── Proposed Intent ─────────────────────────────────────────────────────

/// A candidate new or split intent derived from exactly one theme cluster.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProposedIntent {
    pub level: IntentLevel,
    pub parent_id: Option<IntentId>,
    pub name: String,
    /// The theme key; unique across one run's proposals.
    pub id: ThemeId,
    pub description: String,
    pub action: ProposalAction,
    /// Existing intent being split; set iff `action == Split`.
    pub origin_id: Option<IntentId>,
    pub evidence_samples: Vec<String>,
    pub evidence_count: usize,
    /// Confidence in [0, 1], two decimal places.
    pub confidence: f64,
    pub rationale: String,
}

// ── Configuration ───────────────────────────────────────────────────────

/// Admission thresholds for one run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpansionConfig {
    /// Minimum hits for a cluster to be considered.
    pub min_cluster_size: usize,
    /// Minimum share of traffic (percent) for a cluster to be considered.
    pub min_cluster_percentage: f64,
    /// Maximum number of proposals per run.
    pub max_proposals: usize,
    /// Minimum confidence for a proposal to be accepted.
    pub confidence_threshold: f64,
}

impl Default for ExpansionConfig {
    fn default() -> Self {
        Self {
            min_cluster_size: 3,
            min_cluster_percentage: 1.5,
            max_proposals: 10,
            confidence_threshold: 0.6,
        }
    }
}

impl ExpansionConfig {
    /// Reject out-of-range values.
    pub fn validate(&self) -> ExpansionResult<()> {
        if !self.min_cluster_percentage.is_finite()
            || !(0.0..=100.0).contains(&self.min_cluster_percentage)
        {
            return Err(ExpansionError::InvalidConfig(format!(
                "min_cluster_percentage must be within [0, 100], got {}",
                self.min_cluster_percentage
            )));
        }
        if !self.confidence_threshold.is_finite()
            || !(0.0..=1.0).contains(&self.confidence_threshold)
        {
            return Err(ExpansionError::InvalidConfig(format!(
                "confidence_threshold must be within [0, 1], got {}",
                self.confidence_threshold
            )));
        }
        if self.max_proposals == 0 {
            return Err(ExpansionError::InvalidConfig(
                "max_proposals must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
