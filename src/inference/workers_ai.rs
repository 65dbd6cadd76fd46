use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::InferenceBackend;
use super::config::WorkersAiConfig;
use super::error::InferenceError;
use super::types::{InferenceInput, InferenceOutput};

/// Reranker backed by the Cloudflare Workers AI REST API.
#[derive(Clone)]
pub struct WorkersAiBackend {
    config: WorkersAiConfig,
    client: Client,
}

impl WorkersAiBackend {
    pub fn new(config: WorkersAiConfig) -> Result<Self, InferenceError> {
        config.validate()?;
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &WorkersAiConfig {
        &self.config
    }
}

#[async_trait]
impl InferenceBackend for WorkersAiBackend {
    fn name(&self) -> &'static str {
        "workers-ai"
    }

    async fn rerank(
        &self,
        model: &str,
        input: &InferenceInput,
    ) -> Result<InferenceOutput, InferenceError> {
        let url = self.config.run_url(model);
        debug!(url = %url, contexts = input.contexts.len(), "Calling Workers AI");

        let res = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_token)
            .json(input)
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;
        if !status.is_success() {
            return Err(InferenceError::Api {
                status: status.as_u16(),
                body,
            });
        }

        parse_envelope(&body)
    }
}

#[derive(Debug, Deserialize)]
struct WorkersAiEnvelope {
    result: Option<InferenceOutput>,
    success: Option<bool>,
    #[serde(default)]
    errors: Vec<WorkersAiMessage>,
}

#[derive(Debug, Deserialize)]
struct WorkersAiMessage {
    #[serde(default)]
    code: Option<i64>,
    #[serde(default)]
    message: String,
}

/// Unwraps the `{ result, success, errors }` envelope the REST API puts around
/// model output.
pub(crate) fn parse_envelope(body: &str) -> Result<InferenceOutput, InferenceError> {
    let envelope: WorkersAiEnvelope =
        serde_json::from_str(body).map_err(|e| InferenceError::MalformedResponse {
            reason: e.to_string(),
        })?;

    if envelope.success == Some(false) {
        let messages = envelope
            .errors
            .iter()
            .map(|m| match m.code {
                Some(code) => format!("{}: {}", code, m.message),
                None => m.message.clone(),
            })
            .collect::<Vec<_>>()
            .join("; ");
        return Err(InferenceError::Rejected { messages });
    }

    envelope
        .result
        .ok_or_else(|| InferenceError::MalformedResponse {
            reason: "missing `result` field".to_string(),
        })
}
