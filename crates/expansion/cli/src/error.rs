//! CLI error types

use std::path::PathBuf;

use thiserror::Error;

use expansion_proposal::ExpansionError;

/// CLI error types
#[derive(Debug, Error)]
pub enum CliError {
    /// A file could not be read or written
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON parsing or encoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML configuration could not be parsed
    #[error("Configuration error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration is well-formed but unusable
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input document is well-formed but unusable
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The pipeline rejected the run
    #[error(transparent)]
    Pipeline(#[from] ExpansionError),
}

impl CliError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        let err = CliError::io(
            "missing.json",
            std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        );
        assert_eq!(err.to_string(), "IO error on missing.json: not found");

        let err = CliError::InvalidInput("duplicate intent id: payment".into());
        assert_eq!(err.to_string(), "Invalid input: duplicate intent id: payment");

        let err = CliError::from(ExpansionError::EmptyCorpus);
        assert_eq!(err.to_string(), "no customer messages to analyze");
    }
}
