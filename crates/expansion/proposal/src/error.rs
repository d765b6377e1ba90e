//! Error types for the expansion pipeline.

use thiserror::Error;

use expansion_taxonomy::TaxonomyError;
use expansion_themes::ThemeError;

/// Errors that abort a pipeline run.
///
/// Guardrail findings and oracle failures are not errors; they are carried
/// in the report.
#[derive(Debug, Error)]
pub enum ExpansionError {
    /// The intent hierarchy or mapping is invalid.
    #[error(transparent)]
    Taxonomy(#[from] TaxonomyError),

    /// The theme catalog is invalid.
    #[error(transparent)]
    Theme(#[from] ThemeError),

    /// No messages to analyze.
    #[error("no customer messages to analyze")]
    EmptyCorpus,

    /// A threshold or limit is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for expansion operations.
pub type ExpansionResult<T> = Result<T, ExpansionError>;
