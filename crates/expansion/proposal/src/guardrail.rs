//! Guardrail checker — validates proposals individually and as a set.
//!
//! Per-proposal checks flag descriptions that are too brief, thin
//! evidence, low confidence, and generic names. Every issue is blocking.
//! Set-level checks flag fragmentation: too many proposals, or pairs of
//! names sharing more than one word.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::warn;

use expansion_oracle::CandidateTheme;
use expansion_taxonomy::ThemeId;

use crate::types::{ExpansionConfig, ProposedIntent};

/// Name fragments that make an intent hard to classify against.
pub const GENERIC_NAME_TERMS: [&str; 4] = ["other", "misc", "general", "various"];

/// Descriptions with fewer words than this are considered too broad.
const MIN_DESCRIPTION_WORDS: usize = 5;

// ── Guardrail Issue ────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    TooBroad,
    InsufficientEvidence,
    LowConfidence,
    GenericName,
}

/// A specific issue found on one proposal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuardrailIssue {
    pub kind: IssueKind,
    pub description: String,
}

impl GuardrailIssue {
    fn new(kind: IssueKind, description: impl Into<String>) -> Self {
        Self {
            kind,
            description: description.into(),
        }
    }
}

impl std::fmt::Display for GuardrailIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.description)
    }
}

/// Outcome of validating one proposal.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GuardrailVerdict {
    pub issues: Vec<GuardrailIssue>,
}

impl GuardrailVerdict {
    /// True only when no issue was raised.
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }
}

// ── Guardrail Report ───────────────────────────────────────────────────

/// Status of the guardrail section.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuardrailStatus {
    Passed,
    ReviewNeeded,
}

impl std::fmt::Display for GuardrailStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Passed => write!(f, "passed"),
            Self::ReviewNeeded => write!(f, "review_needed"),
        }
    }
}

impl GuardrailStatus {
    pub fn from_warnings(warnings: &[String]) -> Self {
        if warnings.is_empty() {
            Self::Passed
        } else {
            Self::ReviewNeeded
        }
    }
}

/// Findings over a whole proposal set.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GuardrailReport {
    /// Issue strings by proposal id (only proposals with issues).
    pub per_proposal_issues: BTreeMap<ThemeId, Vec<String>>,
    pub fragmentation_warnings: Vec<String>,
    /// `"{name}: {issue}"` in proposal order, then fragmentation warnings.
    pub warnings: Vec<String>,
}

impl GuardrailReport {
    pub fn status(&self) -> GuardrailStatus {
        GuardrailStatus::from_warnings(&self.warnings)
    }
}

// ── Guardrail Checker ──────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct GuardrailChecker {
    pub min_evidence_count: usize,
    pub confidence_threshold: f64,
    pub max_proposals: usize,
}

impl Default for GuardrailChecker {
    fn default() -> Self {
        Self::from_config(&ExpansionConfig::default())
    }
}

impl GuardrailChecker {
    pub fn from_config(config: &ExpansionConfig) -> Self {
        Self {
            min_evidence_count: config.min_cluster_size,
            confidence_threshold: config.confidence_threshold,
            max_proposals: config.max_proposals,
        }
    }

    /// Validate a single proposal.
    pub fn validate(&self, proposal: &ProposedIntent) -> GuardrailVerdict {
        let mut issues = text_issues(&proposal.name, &proposal.description);

        if proposal.evidence_count < self.min_evidence_count {
            issues.push(GuardrailIssue::new(
                IssueKind::InsufficientEvidence,
                format!("Insufficient evidence ({} messages)", proposal.evidence_count),
            ));
        }

        if proposal.confidence < self.confidence_threshold {
            issues.push(GuardrailIssue::new(
                IssueKind::LowConfidence,
                format!("Low confidence score ({})", proposal.confidence),
            ));
        }

        // Keep issue order stable: brevity, evidence, confidence, name.
        issues.sort_by_key(|i| i.kind as u8);
        GuardrailVerdict { issues }
    }

    /// Set-level fragmentation warnings.
    pub fn check_fragmentation(&self, proposals: &[ProposedIntent]) -> Vec<String> {
        let mut warnings = Vec::new();

        if proposals.len() > self.max_proposals {
            warnings.push(format!(
                "Too many proposals ({}) may fragment intent space. Consider limiting to top {}.",
                proposals.len(),
                self.max_proposals
            ));
        }

        let names: Vec<String> = proposals.iter().map(|p| p.name.to_lowercase()).collect();
        let tokens: Vec<BTreeSet<&str>> = names
            .iter()
            .map(|n| n.split_whitespace().collect())
            .collect();

        for i in 0..names.len() {
            for j in (i + 1)..names.len() {
                let common: Vec<&str> = tokens[i].intersection(&tokens[j]).copied().collect();
                if common.len() > 1 {
                    warnings.push(format!(
                        "Potential overlap between '{}' and '{}' (common words: {})",
                        names[i],
                        names[j],
                        common.join(", ")
                    ));
                }
            }
        }

        warnings
    }

    /// Text checks applied to an oracle candidate (brevity and generic name).
    pub fn screen_candidate(&self, candidate: &CandidateTheme) -> Vec<GuardrailIssue> {
        text_issues(&candidate.name, &candidate.description)
    }

    /// Validate every proposal and the set as a whole.
    pub fn review(&self, proposals: &[ProposedIntent]) -> GuardrailReport {
        let mut report = GuardrailReport::default();

        for proposal in proposals {
            let verdict = self.validate(proposal);
            if verdict.is_valid() {
                continue;
            }
            let issues: Vec<String> = verdict.issues.iter().map(ToString::to_string).collect();
            report
                .warnings
                .extend(issues.iter().map(|i| format!("{}: {}", proposal.name, i)));
            report.per_proposal_issues.insert(proposal.id.clone(), issues);
        }

        report.fragmentation_warnings = self.check_fragmentation(proposals);
        report
            .warnings
            .extend(report.fragmentation_warnings.iter().cloned());

        if !report.warnings.is_empty() {
            warn!(count = report.warnings.len(), "Guardrail warnings raised");
        }
        report
    }
}

fn text_issues(name: &str, description: &str) -> Vec<GuardrailIssue> {
    let mut issues = Vec::new();

    if description.split_whitespace().count() < MIN_DESCRIPTION_WORDS {
        issues.push(GuardrailIssue::new(
            IssueKind::TooBroad,
            "Description too brief - may be too broad",
        ));
    }

    let lowered = name.to_lowercase();
    if GENERIC_NAME_TERMS.iter().any(|t| lowered.contains(t)) {
        issues.push(GuardrailIssue::new(
            IssueKind::GenericName,
            "Name may be too generic - could confuse classification",
        ));
    }

    issues
}
