//! Expansion pipeline — orchestrates one analysis run.
//!
//! ## Pipeline
//!
//! ```text
//! messages + hierarchy
//!   → theme detection + clustering (expansion-themes)
//!   → screening + scoring (generator, scorer)
//!   → guardrail review (guardrail)
//!   → report (report)
//!   → optional enrichment (expansion-oracle), advisory only
//! ```
//!
//! The deterministic path never waits on the oracle: `analyze` is
//! synchronous and complete on its own, `run` adds one bounded oracle call
//! afterwards.

use std::collections::BTreeMap;
use std::time::Duration;

use tracing::{debug, info, warn};

use expansion_oracle::{
    build_oracle, propose_with_timeout, EnrichmentConfig, EnrichmentOracle, OracleContext,
};
use expansion_taxonomy::{IntentHierarchy, Message, TaxonomyMapping, ThemeId};
use expansion_themes::{ClusterAggregator, ThemeCatalog, ThemeCluster, ThemeDetector};

use crate::error::{ExpansionError, ExpansionResult};
use crate::generator::{ProposalGenerator, ProposalOutcome};
use crate::guardrail::{GuardrailChecker, GuardrailReport};
use crate::report::{
    CandidateReview, ConfigurationSnapshot, EnrichmentSection, EnrichmentStatus, ExpansionReport,
    ReportAssembler,
};
use crate::types::ExpansionConfig;

/// Everything the deterministic path produced, before report assembly.
#[derive(Clone, Debug)]
pub struct Analysis {
    pub clusters: BTreeMap<ThemeId, ThemeCluster>,
    pub outcome: ProposalOutcome,
    pub guardrails: GuardrailReport,
    pub total_messages: usize,
}

// ── Pipeline ───────────────────────────────────────────────────────────

pub struct ExpansionPipeline {
    config: ExpansionConfig,
    enrichment: EnrichmentConfig,
    catalog: ThemeCatalog,
    mapping: TaxonomyMapping,
    detector: ThemeDetector,
    aggregator: ClusterAggregator,
    generator: ProposalGenerator,
    guardrails: GuardrailChecker,
    oracle: Option<Box<dyn EnrichmentOracle>>,
}

impl ExpansionPipeline {
    /// Create a pipeline with the built-in catalog and mapping.
    pub fn new(config: ExpansionConfig) -> ExpansionResult<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    pub fn with_defaults() -> Self {
        Self::build(ExpansionConfig::default())
    }

    fn build(config: ExpansionConfig) -> Self {
        let catalog = ThemeCatalog::builtin();
        let mapping = TaxonomyMapping::builtin();

        Self {
            detector: ThemeDetector::new(&catalog),
            aggregator: ClusterAggregator::new(catalog.clone()),
            generator: ProposalGenerator::new(config.clone(), catalog.clone(), mapping.clone()),
            guardrails: GuardrailChecker::from_config(&config),
            config,
            enrichment: EnrichmentConfig::default(),
            catalog,
            mapping,
            oracle: None,
        }
    }

    /// Replace the theme catalog.
    pub fn with_catalog(mut self, catalog: ThemeCatalog) -> Self {
        self.catalog = catalog;
        self.rebuild();
        self
    }

    /// Replace the theme-to-taxonomy mapping.
    pub fn with_mapping(mut self, mapping: TaxonomyMapping) -> Self {
        self.mapping = mapping;
        self.rebuild();
        self
    }

    /// Set enrichment settings. When enabled, the configured backend is built
    /// unless an oracle was injected with [`with_oracle`](Self::with_oracle).
    pub fn with_enrichment(mut self, enrichment: EnrichmentConfig) -> Self {
        if enrichment.enabled && self.oracle.is_none() {
            match build_oracle(&enrichment) {
                Ok(oracle) => self.oracle = Some(oracle),
                Err(e) => warn!(error = %e, "Could not build enrichment oracle"),
            }
        }
        self.enrichment = enrichment;
        self
    }

    pub fn with_oracle(mut self, oracle: Box<dyn EnrichmentOracle>) -> Self {
        self.oracle = Some(oracle);
        self
    }

    fn rebuild(&mut self) {
        self.detector = ThemeDetector::new(&self.catalog);
        self.aggregator = ClusterAggregator::new(self.catalog.clone());
        self.generator = ProposalGenerator::new(
            self.config.clone(),
            self.catalog.clone(),
            self.mapping.clone(),
        );
    }

    pub fn config(&self) -> &ExpansionConfig {
        &self.config
    }

    pub fn enrichment(&self) -> &EnrichmentConfig {
        &self.enrichment
    }

    /// Detection, clustering, screening and guardrails. No I/O.
    pub fn analyze_parts(
        &self,
        messages: &[Message],
        hierarchy: &IntentHierarchy,
    ) -> ExpansionResult<Analysis> {
        if messages.is_empty() {
            return Err(ExpansionError::EmptyCorpus);
        }

        let unknown = self.mapping.unknown_references(hierarchy);
        if !unknown.is_empty() {
            let ids: Vec<&str> = unknown.iter().map(|i| i.as_str()).collect();
            warn!(ids = ?ids, "Mapping references intents missing from the hierarchy");
        }

        info!(messages = messages.len(), "Performing keyword-based theme analysis");
        let clusters = self.aggregator.aggregate(messages, &self.detector);
        info!(themes = clusters.len(), "Identified theme clusters");

        let outcome = self.generator.evaluate(&clusters);
        info!(
            proposals = outcome.proposals.len(),
            screened = outcome.screened.len(),
            "Generated intent proposals"
        );

        let guardrails = self.guardrails.review(&outcome.proposals);

        Ok(Analysis {
            clusters,
            outcome,
            guardrails,
            total_messages: messages.len(),
        })
    }

    /// Deterministic run producing a complete report without enrichment.
    pub fn analyze(
        &self,
        messages: &[Message],
        hierarchy: &IntentHierarchy,
    ) -> ExpansionResult<ExpansionReport> {
        let analysis = self.analyze_parts(messages, hierarchy)?;
        let assembler = ReportAssembler::new(ConfigurationSnapshot::new(&self.config, &self.enrichment));

        let mut report = assembler.assemble(
            &analysis.outcome.proposals,
            &analysis.clusters,
            analysis.guardrails.warnings,
            analysis.total_messages,
        );
        report.screened_clusters = analysis.outcome.screened;
        Ok(report)
    }

    /// Full run: the deterministic report plus, when enabled, one bounded
    /// enrichment call whose result is reported but never acted on.
    pub async fn run(
        &self,
        messages: &[Message],
        hierarchy: &IntentHierarchy,
    ) -> ExpansionResult<ExpansionReport> {
        let mut report = self.analyze(messages, hierarchy)?;

        if self.enrichment.enabled {
            report.enrichment = Some(self.enrich(messages, hierarchy).await);
        }

        info!(status = %report.status(), "Pipeline completed");
        Ok(report)
    }

    async fn enrich(&self, messages: &[Message], hierarchy: &IntentHierarchy) -> EnrichmentSection {
        let provider = self.enrichment.provider;

        let Some(oracle) = self.oracle.as_deref() else {
            warn!(provider = %provider, "Enrichment requested but no oracle configured");
            return EnrichmentSection::unavailable(provider, "no oracle configured");
        };
        let provider = oracle.provider();

        if !oracle.is_available() {
            warn!(
                provider = %provider,
                env_var = provider.env_var(),
                "Enrichment requested but not available, proceeding with keyword analysis only"
            );
            return EnrichmentSection::unavailable(
                provider,
                format!("credential missing (set {})", provider.env_var()),
            );
        }

        let samples: Vec<String> = messages
            .iter()
            .take(self.enrichment.sample_size)
            .map(|m| m.text.clone())
            .collect();
        let context = OracleContext::new(hierarchy.summaries());
        let timeout = Duration::from_secs(self.enrichment.timeout_secs.max(1));

        info!(provider = %provider, samples = samples.len(), "Enhancing analysis with enrichment oracle");
        match propose_with_timeout(oracle, &samples, &context, timeout).await {
            Ok(candidates) => {
                info!(candidates = candidates.len(), "Oracle suggested candidate themes");
                let candidates = candidates
                    .into_iter()
                    .map(|candidate| {
                        let issues = self
                            .guardrails
                            .screen_candidate(&candidate)
                            .iter()
                            .map(ToString::to_string)
                            .collect();
                        debug!(name = %candidate.name, "Screened oracle candidate");
                        CandidateReview { candidate, issues }
                    })
                    .collect();
                EnrichmentSection {
                    provider,
                    status: EnrichmentStatus::Completed,
                    detail: None,
                    candidates,
                }
            }
            Err(e) => {
                warn!(provider = %provider, error = %e, "Enrichment failed, continuing without it");
                EnrichmentSection::failed(provider, e.to_string())
            }
        }
    }
}
