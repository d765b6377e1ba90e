//! Anthropic messages backend.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::client::{ensure_success, resolve_endpoint, BackendSettings};
use crate::error::{OracleError, OracleResult};
use crate::oracle::EnrichmentOracle;
use crate::parse::parse_theme_response;
use crate::prompt::{build_theme_prompt, SYSTEM_PROMPT};
use crate::types::{CandidateTheme, OracleContext, OracleProvider};

const DEFAULT_ANTHROPIC_ENDPOINT: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";

#[derive(Debug, Deserialize)]
struct AnthropicContent {
    #[serde(rename = "type")]
    content_type: String,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    content: Vec<AnthropicContent>,
}

pub struct AnthropicOracle {
    client: Client,
    settings: BackendSettings,
}

impl AnthropicOracle {
    pub fn new(client: Client, settings: BackendSettings) -> Self {
        Self { client, settings }
    }
}

#[async_trait]
impl EnrichmentOracle for AnthropicOracle {
    fn provider(&self) -> OracleProvider {
        OracleProvider::Anthropic
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
        let url = resolve_endpoint(
            self.settings.endpoint.as_deref(),
            DEFAULT_ANTHROPIC_ENDPOINT,
            "/messages",
        );

        let payload = json!({
            "model": self.settings.model,
            "max_tokens": self.settings.max_tokens,
            "temperature": self.settings.temperature,
            "system": SYSTEM_PROMPT,
            "messages": [
                {"role": "user", "content": build_theme_prompt(samples, context)},
            ],
        });

        debug!(url = %url, model = %self.settings.model, "Calling Anthropic");
        let response = self
            .client
            .post(&url)
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&payload)
            .send()
            .await?;
        let response = ensure_success(OracleProvider::Anthropic, response).await?;

        let body: AnthropicResponse = response
            .json()
            .await
            .map_err(|e| OracleError::MalformedResponse(e.to_string()))?;

        let output = body
            .content
            .iter()
            .filter(|part| part.content_type == "text")
            .filter_map(|part| part.text.as_deref())
            .collect::<Vec<_>>()
            .join("\n");

        parse_theme_response(&output)
    }
}
