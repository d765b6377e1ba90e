//! CLI configuration
//!
//! An optional TOML file supplies pipeline thresholds, enrichment settings,
//! a replacement theme catalog and a replacement taxonomy mapping. Command
//! line flags are applied on top.
//!
//! ```toml
//! [pipeline]
//! min_cluster_size = 5
//!
//! [enrichment]
//! provider = "anthropic"
//!
//! [[themes]]
//! id = "gift_cards"
//! name = "Gift Cards"
//! description = "Customer asks about buying or redeeming gift cards"
//! keywords = ["gift card", "voucher"]
//!
//! [mapping.parents]
//! gift_cards = "payment"
//!
//! [mapping.overlaps]
//! gift_cards = ["payment_methods"]
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use expansion_oracle::{EnrichmentConfig, OracleProvider};
use expansion_proposal::{ExpansionConfig, ExpansionPipeline};
use expansion_taxonomy::TaxonomyMapping;
use expansion_themes::{ThemeCatalog, ThemeDefinition};

use crate::error::{CliError, CliResult};

/// Whole configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub pipeline: ExpansionConfig,
    pub enrichment: EnrichmentConfig,
    pub themes: Vec<ThemeDefinition>,
    /// Replaces the built-in mapping as a whole when present.
    pub mapping: Option<TaxonomyMapping>,
}

/// Values given on the command line; `None` keeps the file value.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub min_cluster_size: Option<usize>,
    pub min_cluster_percentage: Option<f64>,
    pub confidence_threshold: Option<f64>,
    pub max_proposals: Option<usize>,
    pub use_llm: bool,
    pub llm_provider: Option<OracleProvider>,
}

impl CliConfig {
    /// Load configuration from file, or defaults when no path is given.
    pub fn load(path: Option<&Path>) -> CliResult<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let contents = std::fs::read_to_string(path).map_err(|e| CliError::io(path, e))?;
        let config = Self::parse(&contents)?;
        debug!(path = %path.display(), themes = config.themes.len(), "Loaded configuration file");
        Ok(config)
    }

    pub fn parse(contents: &str) -> CliResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn apply(&mut self, overrides: &Overrides) {
        let pipeline = &mut self.pipeline;
        if let Some(v) = overrides.min_cluster_size {
            pipeline.min_cluster_size = v;
        }
        if let Some(v) = overrides.min_cluster_percentage {
            pipeline.min_cluster_percentage = v;
        }
        if let Some(v) = overrides.confidence_threshold {
            pipeline.confidence_threshold = v;
        }
        if let Some(v) = overrides.max_proposals {
            pipeline.max_proposals = v;
        }
        if overrides.use_llm {
            self.enrichment.enabled = true;
        }
        if let Some(provider) = overrides.llm_provider {
            self.enrichment.provider = provider;
        }
    }

    /// Build the pipeline this configuration describes.
    pub fn build_pipeline(&self) -> CliResult<ExpansionPipeline> {
        let mut pipeline = ExpansionPipeline::new(self.pipeline.clone())?;

        if !self.themes.is_empty() {
            let catalog = ThemeCatalog::new(self.themes.clone())
                .map_err(|e| CliError::Config(e.to_string()))?;
            pipeline = pipeline.with_catalog(catalog);
        }
        if let Some(mapping) = &self.mapping {
            pipeline = pipeline.with_mapping(mapping.clone());
        }

        Ok(pipeline.with_enrichment(self.enrichment.clone()))
    }
}
