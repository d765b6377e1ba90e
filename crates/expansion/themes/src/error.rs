//! Error types for theme configuration.

use thiserror::Error;

/// Errors raised while building a theme catalog.
#[derive(Debug, Error)]
pub enum ThemeError {
    /// A theme was declared without an id.
    #[error("theme '{name}' has an empty id")]
    EmptyThemeId { name: String },

    /// Two themes share an id.
    #[error("duplicate theme id: {0}")]
    DuplicateTheme(String),

    /// A trigger phrase is blank and would match every message.
    #[error("theme '{0}' has a blank trigger phrase")]
    BlankKeyword(String),
}

/// Result type for theme operations.
pub type ThemeResult<T> = Result<T, ThemeError>;
