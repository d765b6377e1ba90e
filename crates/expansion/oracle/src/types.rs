//! Oracle data types: providers, run-scoped configuration, candidates.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use expansion_taxonomy::IntentSummary;

use crate::error::OracleError;

// ── Provider ────────────────────────────────────────────────────────────

/// Supported enrichment backends.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OracleProvider {
    #[default]
    OpenAi,
    Anthropic,
    Google,
}

impl OracleProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Anthropic => "anthropic",
            Self::Google => "google",
        }
    }

    /// Environment variable holding the backend's API key.
    pub fn env_var(&self) -> &'static str {
        match self {
            Self::OpenAi => "OPENAI_API_KEY",
            Self::Anthropic => "ANTHROPIC_API_KEY",
            Self::Google => "GOOGLE_API_KEY",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            Self::OpenAi => "gpt-4o-mini",
            Self::Anthropic => "claude-3-haiku-20240307",
            Self::Google => "gemini-1.5-flash",
        }
    }

    /// Read the API key from the environment, ignoring blank values.
    pub fn credential_from_env(&self) -> Option<String> {
        std::env::var(self.env_var())
            .ok()
            .filter(|key| !key.trim().is_empty())
    }
}

impl fmt::Display for OracleProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OracleProvider {
    type Err = OracleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "openai" => Ok(Self::OpenAi),
            "anthropic" => Ok(Self::Anthropic),
            "google" | "gemini" => Ok(Self::Google),
            other => Err(OracleError::UnknownProvider(other.to_string())),
        }
    }
}

// ── Configuration ───────────────────────────────────────────────────────

/// Run-scoped enrichment settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnrichmentConfig {
    pub enabled: bool,
    pub provider: OracleProvider,
    /// Model override; the provider default is used when absent.
    pub model: Option<String>,
    /// Base URL or full endpoint override.
    pub endpoint: Option<String>,
    pub timeout_secs: u64,
    /// Number of message texts handed to the oracle.
    pub sample_size: usize,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            provider: OracleProvider::OpenAi,
            model: None,
            endpoint: None,
            timeout_secs: 30,
            sample_size: 100,
            max_tokens: 2000,
            temperature: 0.3,
        }
    }
}

impl EnrichmentConfig {
    pub fn model(&self) -> &str {
        self.model
            .as_deref()
            .unwrap_or_else(|| self.provider.default_model())
    }
}

// ── Candidates ──────────────────────────────────────────────────────────

/// One theme suggested by the oracle. Advisory only.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateTheme {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub examples: Vec<String>,
    /// Why the theme is distinct from the existing intents.
    #[serde(default)]
    pub distinction: String,
}

/// The JSON document the oracle is asked to return.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeDocument {
    #[serde(default)]
    pub themes: Vec<CandidateTheme>,
}

/// What the oracle knows about the existing taxonomy.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OracleContext {
    pub existing_intents: Vec<IntentSummary>,
}

impl OracleContext {
    pub fn new(existing_intents: Vec<IntentSummary>) -> Self {
        Self { existing_intents }
    }
}
