//! Google Gemini generateContent backend.

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde_json::{json, Value};
use tracing::debug;

use crate::client::{ensure_success, BackendSettings};
use crate::error::{OracleError, OracleResult};
use crate::oracle::EnrichmentOracle;
use crate::parse::parse_theme_response;
use crate::prompt::{build_theme_prompt, SYSTEM_PROMPT};
use crate::types::{CandidateTheme, OracleContext, OracleProvider};

const DEFAULT_GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com";

pub struct GeminiOracle {
    client: Client,
    settings: BackendSettings,
}

impl GeminiOracle {
    pub fn new(client: Client, settings: BackendSettings) -> Self {
        Self { client, settings }
    }
}

#[async_trait]
impl EnrichmentOracle for GeminiOracle {
    fn provider(&self) -> OracleProvider {
        OracleProvider::Google
    }

    fn is_available(&self) -> bool {
        self.settings.api_key.is_some()
    }

    async fn propose_themes(
        &self,
        samples: &[String],
        context: &OracleContext,
    ) -> OracleResult<Vec<CandidateTheme>> {
        let api_key = self.settings.api_key()?;
        let url = resolve_gemini_endpoint(
            self.settings.endpoint.as_deref(),
            &self.settings.model,
            api_key,
        )?;

        let payload = json!({
            "systemInstruction": {"parts": [{"text": SYSTEM_PROMPT}]},
            "contents": [
                {"parts": [{"text": build_theme_prompt(samples, context)}]}
            ],
            "generationConfig": {
                "temperature": self.settings.temperature,
                "maxOutputTokens": self.settings.max_tokens,
            },
        });

        debug!(model = %self.settings.model, "Calling Gemini");
        let response = self.client.post(url).json(&payload).send().await?;
        let response = ensure_success(OracleProvider::Google, response).await?;

        let body: Value = response
            .json()
            .await
            .map_err(|e| OracleError::MalformedResponse(e.to_string()))?;

        let output = body["candidates"]
            .as_array()
            .and_then(|candidates| candidates.first())
            .and_then(|candidate| candidate["content"]["parts"].as_array())
            .map(|parts| {
                parts
                    .iter()
                    .filter_map(|part| part["text"].as_str())
                    .collect::<Vec<_>>()
                    .join("\n")
            })
            .ok_or_else(|| OracleError::MalformedResponse("response did not include candidates".into()))?;

        parse_theme_response(&output)
    }
}

fn resolve_gemini_endpoint(endpoint: Option<&str>, model: &str, api_key: &str) -> OracleResult<Url> {
    let endpoint = endpoint.unwrap_or(DEFAULT_GEMINI_ENDPOINT);
    let mut url = if endpoint.contains(":generateContent") {
        Url::parse(endpoint).map_err(|e| OracleError::InvalidEndpoint(format!("{}: {}", endpoint, e)))?
    } else {
        let generated = format!(
            "{}/v1beta/models/{}:generateContent",
            endpoint.trim_end_matches('/'),
            model
        );
        Url::parse(&generated).map_err(|e| OracleError::InvalidEndpoint(format!("{}: {}", generated, e)))?
    };

    if !url.query_pairs().any(|(k, _)| k == "key") {
        url.query_pairs_mut().append_pair("key", api_key);
    }

    Ok(url)
}
