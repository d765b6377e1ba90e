//! Error types for the enrichment oracle.

use thiserror::Error;

/// Errors raised by an enrichment backend.
///
/// None of these are fatal to a pipeline run; callers degrade to "no
/// candidate themes".
#[derive(Debug, Error)]
pub enum OracleError {
    /// The backend's API key is not set.
    #[error("{provider} credential missing (set {env_var})")]
    MissingCredential {
        provider: String,
        env_var: &'static str,
    },

    /// The HTTP request could not be sent or its body not read.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("{provider} error {status}: {body}")]
    Status {
        provider: String,
        status: u16,
        body: String,
    },

    /// The reply did not contain the expected themes document.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// The configured endpoint is not a valid URL.
    #[error("invalid endpoint {0}")]
    InvalidEndpoint(String),

    /// Provider name not recognized.
    #[error("unknown provider: {0}")]
    UnknownProvider(String),

    /// The call did not complete within the configured bound.
    #[error("oracle call timed out after {0}s")]
    Timeout(u64),
}

/// Result type for oracle operations.
pub type OracleResult<T> = Result<T, OracleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        let err = OracleError::MissingCredential {
            provider: "openai".into(),
            env_var: "OPENAI_API_KEY",
        };
        assert_eq!(err.to_string(), "openai credential missing (set OPENAI_API_KEY)");

        let err = OracleError::Status {
            provider: "anthropic".into(),
            status: 429,
            body: "rate limited".into(),
        };
        assert_eq!(err.to_string(), "anthropic error 429: rate limited");
        assert_eq!(OracleError::Timeout(30).to_string(), "oracle call timed out after 30s");
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<OracleError>();
    }
}
