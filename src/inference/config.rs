use std::time::Duration;

use crate::config::{Config, DEFAULT_CF_BASE_URL, DEFAULT_INFERENCE_TIMEOUT_SECS};

use super::error::InferenceError;

/// Connection settings for the Workers AI REST API.
#[derive(Debug, Clone)]
pub struct WorkersAiConfig {
    pub account_id: String,
    pub api_token: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl WorkersAiConfig {
    pub fn new(account_id: impl Into<String>, api_token: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
            api_token: api_token.into(),
            base_url: DEFAULT_CF_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_INFERENCE_TIMEOUT_SECS),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Extracts the Workers AI settings from the server configuration.
    pub fn from_config(config: &Config) -> Result<Self, InferenceError> {
        let account_id = config
            .cf_account_id
            .clone()
            .ok_or_else(|| InferenceError::InvalidConfig {
                reason: "Cloudflare account id is not set".to_string(),
            })?;
        let api_token = config
            .cf_api_token
            .clone()
            .ok_or_else(|| InferenceError::InvalidConfig {
                reason: "Cloudflare API token is not set".to_string(),
            })?;

        Ok(Self::new(account_id, api_token)
            .with_base_url(config.cf_base_url.clone())
            .with_timeout(config.inference_timeout))
    }

    /// Returns the model-run URL, e.g.
    /// `https://api.cloudflare.com/client/v4/accounts/{id}/ai/run/@cf/baai/bge-reranker-base`.
    pub fn run_url(&self, model: &str) -> String {
        format!(
            "{}/accounts/{}/ai/run/{}",
            self.base_url.trim_end_matches('/'),
            self.account_id,
            model.trim_start_matches('/')
        )
    }

    pub fn validate(&self) -> Result<(), InferenceError> {
        if self.account_id.trim().is_empty() {
            return Err(InferenceError::InvalidConfig {
                reason: "account id cannot be empty".to_string(),
            });
        }
        if self.api_token.trim().is_empty() {
            return Err(InferenceError::InvalidConfig {
                reason: "API token cannot be empty".to_string(),
            });
        }
        if self.timeout.is_zero() {
            return Err(InferenceError::InvalidConfig {
                reason: "timeout must be positive".to_string(),
            });
        }
        Ok(())
    }
}
