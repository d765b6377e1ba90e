//! Report assembler — merges pipeline output into one report value.
//!
//! Pure data merge. Cluster iteration order and proposal order are kept
//! exactly as produced upstream.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use expansion_oracle::{CandidateTheme, EnrichmentConfig, OracleProvider};
use expansion_taxonomy::{IntentId, ThemeId};
use expansion_themes::ThemeCluster;

use crate::generator::ScreenedCluster;
use crate::guardrail::GuardrailStatus;
use crate::scorer::round2;
use crate::types::{ExpansionConfig, IntentLevel, ProposalAction, ProposedIntent};

const REPORT_KEYWORDS: usize = 5;
const REPORT_SAMPLES: usize = 3;

// ── Report Sections ────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub total_messages_analyzed: usize,
    pub themes_identified: usize,
    pub proposals_generated: usize,
}

/// Snapshot of the active configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConfigurationSnapshot {
    pub min_cluster_size: usize,
    pub min_cluster_percentage: f64,
    pub confidence_threshold: f64,
    pub max_proposed_intents: usize,
    pub enrichment_enabled: bool,
    pub enrichment_provider: OracleProvider,
}

impl ConfigurationSnapshot {
    pub fn new(config: &ExpansionConfig, enrichment: &EnrichmentConfig) -> Self {
        Self {
            min_cluster_size: config.min_cluster_size,
            min_cluster_percentage: config.min_cluster_percentage,
            confidence_threshold: config.confidence_threshold,
            max_proposed_intents: config.max_proposals,
            enrichment_enabled: enrichment.enabled,
            enrichment_provider: enrichment.provider,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ThemeSummary {
    pub count: usize,
    pub percentage: f64,
    pub keywords: Vec<String>,
    pub sample_messages: Vec<String>,
}

impl From<&ThemeCluster> for ThemeSummary {
    fn from(cluster: &ThemeCluster) -> Self {
        Self {
            count: cluster.count,
            percentage: round2(cluster.percentage),
            keywords: cluster.keywords.iter().take(REPORT_KEYWORDS).cloned().collect(),
            sample_messages: cluster.samples.iter().take(REPORT_SAMPLES).cloned().collect(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProposalEntry {
    pub level: IntentLevel,
    pub parent_intent: Option<IntentId>,
    pub name: String,
    pub id: ThemeId,
    pub description: String,
    pub action: ProposalAction,
    pub original_intent: Option<IntentId>,
    pub evidence_count: usize,
    pub confidence_score: f64,
    pub rationale: String,
    pub example_messages: Vec<String>,
}

impl From<&ProposedIntent> for ProposalEntry {
    fn from(p: &ProposedIntent) -> Self {
        Self {
            level: p.level,
            parent_intent: p.parent_id.clone(),
            name: p.name.clone(),
            id: p.id.clone(),
            description: p.description.clone(),
            action: p.action,
            original_intent: p.origin_id.clone(),
            evidence_count: p.evidence_count,
            confidence_score: p.confidence,
            rationale: p.rationale.clone(),
            example_messages: p.evidence_samples.iter().take(REPORT_SAMPLES).cloned().collect(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GuardrailSection {
    pub warnings: Vec<String>,
    pub status: GuardrailStatus,
}

/// What happened to the enrichment call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnrichmentStatus {
    Completed,
    Unavailable,
    Failed,
}

/// An oracle candidate with the text-check issues it raised.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CandidateReview {
    #[serde(flatten)]
    pub candidate: CandidateTheme,
    pub issues: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnrichmentSection {
    pub provider: OracleProvider,
    pub status: EnrichmentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    pub candidates: Vec<CandidateReview>,
}

impl EnrichmentSection {
    pub fn unavailable(provider: OracleProvider, detail: impl Into<String>) -> Self {
        Self {
            provider,
            status: EnrichmentStatus::Unavailable,
            detail: Some(detail.into()),
            candidates: Vec::new(),
        }
    }

    pub fn failed(provider: OracleProvider, detail: impl Into<String>) -> Self {
        Self {
            provider,
            status: EnrichmentStatus::Failed,
            detail: Some(detail.into()),
            candidates: Vec::new(),
        }
    }
}

// ── Expansion Report ───────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExpansionReport {
    pub metadata: ReportMetadata,
    pub configuration: ConfigurationSnapshot,
    pub theme_analysis: BTreeMap<ThemeId, ThemeSummary>,
    pub proposed_intents: Vec<ProposalEntry>,
    #[serde(default)]
    pub screened_clusters: Vec<ScreenedCluster>,
    pub guardrails: GuardrailSection,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enrichment: Option<EnrichmentSection>,
}

impl ExpansionReport {
    pub fn status(&self) -> GuardrailStatus {
        self.guardrails.status
    }
}

// ── Report Assembler ───────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct ReportAssembler {
    snapshot: ConfigurationSnapshot,
}

impl ReportAssembler {
    pub fn new(snapshot: ConfigurationSnapshot) -> Self {
        Self { snapshot }
    }

    /// Assemble with a fresh run id and the current time.
    pub fn assemble(
        &self,
        proposals: &[ProposedIntent],
        clusters: &BTreeMap<ThemeId, ThemeCluster>,
        warnings: Vec<String>,
        total_messages: usize,
    ) -> ExpansionReport {
        self.assemble_at(proposals, clusters, warnings, total_messages, Uuid::new_v4(), Utc::now())
    }

    pub fn assemble_at(
        &self,
        proposals: &[ProposedIntent],
        clusters: &BTreeMap<ThemeId, ThemeCluster>,
        warnings: Vec<String>,
        total_messages: usize,
        run_id: Uuid,
        generated_at: DateTime<Utc>,
    ) -> ExpansionReport {
        let status = GuardrailStatus::from_warnings(&warnings);

        ExpansionReport {
            metadata: ReportMetadata {
                run_id,
                generated_at,
                total_messages_analyzed: total_messages,
                themes_identified: clusters.len(),
                proposals_generated: proposals.len(),
            },
            configuration: self.snapshot.clone(),
            theme_analysis: clusters
                .iter()
                .map(|(theme, cluster)| (theme.clone(), ThemeSummary::from(cluster)))
                .collect(),
            proposed_intents: proposals.iter().map(ProposalEntry::from).collect(),
            screened_clusters: Vec::new(),
            guardrails: GuardrailSection { warnings, status },
            enrichment: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn cluster() -> ThemeCluster {
        ThemeCluster {
            theme: "product_usage".into(),
            keywords: (0..8).map(|i| format!("kw{}", i)).collect(),
            message_ids: vec![1, 2, 3, 4],
            samples: (0..5).map(|i| format!("sample {}", i)).collect(),
            count: 4,
            percentage: 100.0 / 3.0,
        }
    }

    fn proposal() -> ProposedIntent {
        ProposedIntent {
            level: IntentLevel::Secondary,
            parent_id: Some("about_product".into()),
            name: "Product Usage".into(),
            id: "product_usage".into(),
            description: "How to use a product".into(),
            action: ProposalAction::Split,
            origin_id: Some("product_info".into()),
            evidence_samples: (0..5).map(|i| format!("sample {}", i)).collect(),
            evidence_count: 4,
            confidence: 0.72,
            rationale: "Distinct".into(),
        }
    }

    fn assembler() -> ReportAssembler {
        ReportAssembler::new(ConfigurationSnapshot::new(
            &ExpansionConfig::default(),
            &EnrichmentConfig::default(),
        ))
    }

    #[test]
    fn assembles_sections() {
        let clusters: BTreeMap<ThemeId, ThemeCluster> =
            [(ThemeId::from("product_usage"), cluster())].into_iter().collect();
        let at = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
        let report = assembler().assemble_at(&[proposal()], &clusters, vec![], 12, Uuid::nil(), at);

        assert_eq!(report.metadata.total_messages_analyzed, 12);
        assert_eq!(report.metadata.themes_identified, 1);
        assert_eq!(report.metadata.proposals_generated, 1);
        assert_eq!(report.metadata.generated_at, at);

        let summary = &report.theme_analysis[&ThemeId::from("product_usage")];
        assert_eq!(summary.percentage, 33.33);
        assert_eq!(summary.keywords.len(), 5);
        assert_eq!(summary.sample_messages.len(), 3);

        let entry = &report.proposed_intents[0];
        assert_eq!(entry.example_messages.len(), 3);
        assert_eq!(entry.original_intent.as_ref().map(|i| i.as_str()), Some("product_info"));
        assert_eq!(report.status(), GuardrailStatus::Passed);
        assert_eq!(report.configuration.max_proposed_intents, 10);
    }

    #[test]
    fn warnings_require_review() {
        let report = assembler().assemble(&[], &BTreeMap::new(), vec!["X: issue".into()], 1);
        assert_eq!(report.guardrails.status, GuardrailStatus::ReviewNeeded);
    }

    #[test]
    fn serializes_expected_keys() {
        let report = assembler().assemble(&[proposal()], &BTreeMap::new(), vec![], 4);
        let value = serde_json::to_value(&report).unwrap();

        for key in ["metadata", "configuration", "theme_analysis", "proposed_intents", "guardrails"] {
            assert!(value.get(key).is_some(), "missing {}", key);
        }
        assert!(value.get("enrichment").is_none());
        assert_eq!(value["guardrails"]["status"], "passed");
        assert_eq!(value["proposed_intents"][0]["action"], "split");
        assert_eq!(value["proposed_intents"][0]["parent_intent"], "about_product");
        assert_eq!(value["configuration"]["enrichment_provider"], "openai");
    }

    #[test]
    fn candidate_review_flattens() {
        let review = CandidateReview {
            candidate: CandidateTheme {
                name: "Gift Cards".into(),
                ..Default::default()
            },
            issues: vec!["Description too brief - may be too broad".into()],
        };
        let value = serde_json::to_value(&review).unwrap();
        assert_eq!(value["name"], "Gift Cards");
        assert_eq!(value["issues"].as_array().map(Vec::len), Some(1));
    }
}
