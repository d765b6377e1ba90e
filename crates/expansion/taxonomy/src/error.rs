//! Error types for the taxonomy view.

use thiserror::Error;

/// Errors raised while building the intent hierarchy or mapping tables.
#[derive(Debug, Error)]
pub enum TaxonomyError {
    /// Two intents (primary or secondary) share an id.
    #[error("duplicate intent id: {0}")]
    DuplicateIntentId(String),

    /// An intent was declared without an id.
    #[error("intent '{name}' has an empty id")]
    EmptyIntentId { name: String },
}

/// Result type for taxonomy operations.
pub type TaxonomyResult<T> = Result<T, TaxonomyError>;
