//! Shared HTTP plumbing for the backends.

use std::time::Duration;

use reqwest::{Client, Response};

use crate::error::{OracleError, OracleResult};
use crate::types::{EnrichmentConfig, OracleProvider};

/// Maximum number of error-body characters kept in a `Status` error.
const ERROR_BODY_CHARS: usize = 320;

/// Settings every backend needs to issue one request.
#[derive(Clone, Debug)]
pub struct BackendSettings {
    pub provider: OracleProvider,
    pub api_key: Option<String>,
    pub model: String,
    pub endpoint: Option<String>,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl BackendSettings {
    /// Resolve settings from run configuration and an explicit credential.
    pub fn from_config(config: &EnrichmentConfig, api_key: Option<String>) -> Self {
        Self {
            provider: config.provider,
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            model: config.model().to_string(),
            endpoint: config.endpoint.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        }
    }

    pub fn api_key(&self) -> OracleResult<&str> {
        self.api_key
            .as_deref()
            .ok_or_else(|| OracleError::MissingCredential {
                provider: self.provider.to_string(),
                env_var: self.provider.env_var(),
            })
    }
}

/// Build the HTTP client. System proxies are bypassed unless
/// `EXPANSION_USE_SYSTEM_PROXY` is set.
pub fn build_http_client(timeout: Duration) -> OracleResult<Client> {
    let mut builder = Client::builder().timeout(timeout);
    let allow_system_proxy = std::env::var("EXPANSION_USE_SYSTEM_PROXY")
        .map(|value| matches!(value.as_str(), "1" | "true" | "yes"))
        .unwrap_or(false);

    if !allow_system_proxy {
        builder = builder.no_proxy();
    }

    Ok(builder.build()?)
}

/// Turn a non-success response into a `Status` error.
pub async fn ensure_success(provider: OracleProvider, response: Response) -> OracleResult<Response> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    Err(OracleError::Status {
        provider: provider.to_string(),
        status,
        body: truncate(&body, ERROR_BODY_CHARS),
    })
}

/// First `max_chars` characters of `value`, with `...` appended when cut.
pub fn truncate(value: &str, max_chars: usize) -> String {
    let mut chars = value.chars();
    let truncated: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{}...", truncated)
    } else {
        truncated
    }
}

/// Endpoint override or default, with `suffix` appended when missing.
pub fn resolve_endpoint(endpoint: Option<&str>, default_endpoint: &str, suffix: &str) -> String {
    let endpoint = endpoint.unwrap_or(default_endpoint);
    if endpoint.ends_with(suffix) {
        endpoint.to_string()
    } else {
        format!("{}{}", endpoint.trim_end_matches('/'), suffix)
    }
}
