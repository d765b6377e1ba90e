//! # expansion-oracle
//!
//! Optional LLM enrichment for intent expansion. An oracle receives a
//! bounded sample of message texts plus the existing intents and suggests
//! candidate themes the keyword catalog may be missing.
//!
//! ```text
//!   samples + OracleContext
//!            │
//!            ▼
//!   ┌──────────────────────┐     OpenAiOracle     (chat/completions)
//!   │ dyn EnrichmentOracle │ ──▶ AnthropicOracle  (messages)
//!   └──────────────────────┘     GeminiOracle     (generateContent)
//!            │
//!            ▼
//!   Vec<CandidateTheme>   (advisory; any error means "none")
//! ```

#![deny(unsafe_code)]

pub mod anthropic;
pub mod client;
pub mod error;
pub mod gemini;
pub mod openai;
pub mod oracle;
pub mod parse;
pub mod prompt;
pub mod types;

use std::time::Duration;

// ── Re-exports ─────────────────────────────────────────────────────────

pub use anthropic::AnthropicOracle;
pub use client::BackendSettings;
pub use error::{OracleError, OracleResult};
pub use gemini::GeminiOracle;
pub use openai::OpenAiOracle;
pub use oracle::{propose_with_timeout, EnrichmentOracle, StaticOracle};
pub use parse::parse_theme_response;
pub use prompt::build_theme_prompt;
pub use types::{CandidateTheme, EnrichmentConfig, OracleContext, OracleProvider, ThemeDocument};

/// Build the backend for `config.provider`, reading its key from the environment.
///
/// A missing key still yields an oracle; it reports `is_available() == false`.
pub fn build_oracle(config: &EnrichmentConfig) -> OracleResult<Box<dyn EnrichmentOracle>> {
    build_oracle_with_key(config, config.provider.credential_from_env())
}

/// Build the backend for `config.provider` with an explicit credential.
pub fn build_oracle_with_key(
    config: &EnrichmentConfig,
    api_key: Option<String>,
) -> OracleResult<Box<dyn EnrichmentOracle>> {
    let client = client::build_http_client(Duration::from_secs(config.timeout_secs.max(1)))?;
    let settings = BackendSettings::from_config(config, api_key);

    let oracle: Box<dyn EnrichmentOracle> = match config.provider {
        OracleProvider::OpenAi => Box::new(OpenAiOracle::new(client, settings)),
        OracleProvider::Anthropic => Box::new(AnthropicOracle::new(client, settings)),
        OracleProvider::Google => Box::new(GeminiOracle::new(client, settings)),
    };
    Ok(oracle)
}
