//! Proposal generator — turns qualifying clusters into intent proposals.
//!
//! Clusters are visited by count (descending, ties by theme key). Each one
//! is screened on size, then share of traffic, then the proposal cap, then
//! confidence. Rejections are recorded with their reason; nothing is
//! deferred or retried.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use expansion_taxonomy::{IntentId, TaxonomyMapping, ThemeId};
use expansion_themes::{ThemeCatalog, ThemeCluster};

use crate::scorer::ConfidenceScorer;
use crate::types::{ExpansionConfig, IntentLevel, ProposalAction, ProposedIntent};

// ── Screening ──────────────────────────────────────────────────────────

/// Why a cluster did not become a proposal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScreenReason {
    BelowMinSize,
    BelowMinPercentage,
    ProposalCapReached,
    BelowConfidence,
    NoDefinition,
}

impl std::fmt::Display for ScreenReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::BelowMinSize => "below_min_size",
            Self::BelowMinPercentage => "below_min_percentage",
            Self::ProposalCapReached => "proposal_cap_reached",
            Self::BelowConfidence => "below_confidence",
            Self::NoDefinition => "no_definition",
        };
        f.write_str(s)
    }
}

/// A cluster that was not accepted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScreenedCluster {
    pub theme: ThemeId,
    pub count: usize,
    pub percentage: f64,
    pub reason: ScreenReason,
    /// Set when the cluster got as far as scoring.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

/// Accepted proposals plus every screened cluster, both in visit order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProposalOutcome {
    pub proposals: Vec<ProposedIntent>,
    pub screened: Vec<ScreenedCluster>,
}

// ── Proposal Generator ─────────────────────────────────────────────────

pub struct ProposalGenerator {
    config: ExpansionConfig,
    scorer: ConfidenceScorer,
    catalog: ThemeCatalog,
    mapping: TaxonomyMapping,
}

impl ProposalGenerator {
    pub fn new(config: ExpansionConfig, catalog: ThemeCatalog, mapping: TaxonomyMapping) -> Self {
        Self {
            config,
            scorer: ConfidenceScorer::default(),
            catalog,
            mapping,
        }
    }

    pub fn with_scorer(mut self, scorer: ConfidenceScorer) -> Self {
        self.scorer = scorer;
        self
    }

    pub fn config(&self) -> &ExpansionConfig {
        &self.config
    }

    /// Accepted proposals only.
    pub fn generate(
        &self,
        clusters: &BTreeMap<ThemeId, ThemeCluster>,
    ) -> Vec<ProposedIntent> {
        self.evaluate(clusters).proposals
    }

    /// Screen every cluster and build proposals for the survivors.
    pub fn evaluate(&self, clusters: &BTreeMap<ThemeId, ThemeCluster>) -> ProposalOutcome {
        let mut ordered: Vec<&ThemeCluster> = clusters.values().collect();
        ordered.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.theme.cmp(&b.theme)));

        let mut outcome = ProposalOutcome::default();
        let mut cap_logged = false;

        for cluster in ordered {
            let screen = |reason, confidence| ScreenedCluster {
                theme: cluster.theme.clone(),
                count: cluster.count,
                percentage: cluster.percentage,
                reason,
                confidence,
            };

            if cluster.count < self.config.min_cluster_size {
                debug!(
                    theme = %cluster.theme,
                    count = cluster.count,
                    min = self.config.min_cluster_size,
                    "Skipping cluster: below minimum size"
                );
                outcome.screened.push(screen(ScreenReason::BelowMinSize, None));
                continue;
            }

            if cluster.percentage < self.config.min_cluster_percentage {
                debug!(
                    theme = %cluster.theme,
                    percentage = cluster.percentage,
                    min = self.config.min_cluster_percentage,
                    "Skipping cluster: below minimum percentage"
                );
                outcome.screened.push(screen(ScreenReason::BelowMinPercentage, None));
                continue;
            }

            if outcome.proposals.len() >= self.config.max_proposals {
                if !cap_logged {
                    warn!(max = self.config.max_proposals, "Reached max proposals, remaining clusters are screened out");
                    cap_logged = true;
                }
                outcome.screened.push(screen(ScreenReason::ProposalCapReached, None));
                continue;
            }

            let Some(proposal) = self.build_proposal(cluster) else {
                debug!(theme = %cluster.theme, "Skipping cluster: theme has no definition");
                outcome.screened.push(screen(ScreenReason::NoDefinition, None));
                continue;
            };

            if proposal.confidence < self.config.confidence_threshold {
                debug!(
                    theme = %cluster.theme,
                    confidence = proposal.confidence,
                    threshold = self.config.confidence_threshold,
                    "Discarding proposal: below confidence threshold"
                );
                outcome
                    .screened
                    .push(screen(ScreenReason::BelowConfidence, Some(proposal.confidence)));
                continue;
            }

            outcome.proposals.push(proposal);
        }

        outcome
    }

    /// Build the proposal for one cluster, or `None` if the theme is not in the catalog.
    ///
    /// Parent and overlap ids are taken from the mapping as configured, whether
    /// or not the input hierarchy lists them.
    fn build_proposal(&self, cluster: &ThemeCluster) -> Option<ProposedIntent> {
        let definition = self.catalog.get(&cluster.theme)?;

        let parent_id = self.mapping.parent_for(&cluster.theme).cloned();
        let overlaps: &[IntentId] = self.mapping.overlaps_for(&cluster.theme);

        let confidence = self.scorer.score(cluster, overlaps);
        let (action, origin_id) = match overlaps.first() {
            Some(origin) => (ProposalAction::Split, Some(origin.clone())),
            None => (ProposalAction::New, None),
        };
        let level = if parent_id.is_some() {
            IntentLevel::Secondary
        } else {
            IntentLevel::Primary
        };

        Some(ProposedIntent {
            level,
            parent_id,
            name: definition.name.clone(),
            id: cluster.theme.clone(),
            description: definition.description.clone(),
            action,
            origin_id,
            evidence_samples: cluster.samples.clone(),
            evidence_count: cluster.count,
            confidence,
            rationale: definition.rationale.clone(),
        })
    }
}
