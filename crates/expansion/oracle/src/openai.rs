//! OpenAI chat-completions backend.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::client::{ensure_success, resolve_endpoint, BackendSettings};
use crate::error::{OracleError, OracleResult};
use crate::oracle::EnrichmentOracle;
use crate::parse::parse_theme_response;
use crate::prompt::{build_theme_prompt, SYSTEM_PROMPT};
use crate::types::{CandidateTheme, OracleContext, OracleProvider};

const DEFAULT_OPENAI_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";

#[derive(Debug, Deserialize)]
struct OpenAiMessage {
    content: Value,
}

#[derive(Debug, Deserialize)]
struct OpenAiChoice {
    message: OpenAiMessage,
}

#[derive(Debug, Deserialize)]
struct OpenAiResponse {
    choices: Vec<OpenAiChoice>,
}

pub struct OpenAiOracle {
    client: Client,
    settings: BackendSettings,
}

impl OpenAiOracle {
    pub fn new(client: Client, settings: BackendSettings) -> Self {
        Self { client, settings }
    }

    fn url(&self) -> String {
        resolve_endpoint(
            self.settings.endpoint.as_deref(),
            DEFAULT_OPENAI_ENDPOINT,
            "/chat/completions",
        )
    }
}

#[async_trait]
impl EnrichmentOracle for OpenAiOracle {
    fn provider(&self) -> OracleProvider {
        OracleProvider::OpenAi
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
        let url = self.url();

        let payload = json!({
            "model": self.settings.model,
            "messages": [
                {"role": "system", "content": SYSTEM_PROMPT},
                {"role": "user", "content": build_theme_prompt(samples, context)},
            ],
            "temperature": self.settings.temperature,
            "max_tokens": self.settings.max_tokens,
        });

        debug!(url = %url, model = %self.settings.model, "Calling OpenAI");
        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&payload)
            .send()
            .await?;
        let response = ensure_success(OracleProvider::OpenAi, response).await?;

        let body: OpenAiResponse = response
            .json()
            .await
            .map_err(|e| OracleError::MalformedResponse(e.to_string()))?;
        let choice = body
            .choices
            .first()
            .ok_or_else(|| OracleError::MalformedResponse("response did not include choices".into()))?;

        parse_theme_response(&extract_text(&choice.message.content))
    }
}

fn extract_text(content: &Value) -> String {
    match content {
        Value::String(text) => text.clone(),
        Value::Array(parts) => parts
            .iter()
            .filter_map(|part| part.get("text").and_then(Value::as_str))
            .collect::<Vec<_>>()
            .join("\n"),
        _ => String::new(),
    }
}
