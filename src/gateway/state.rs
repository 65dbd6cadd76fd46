use std::sync::Arc;

use crate::config::{Config, DEFAULT_MAX_BODY_BYTES};
use crate::inference::InferenceBackend;

/// Immutable per-process state shared by every request.
#[derive(Clone)]
pub struct HandlerState {
    pub api_key: Arc<str>,

    pub model: Arc<str>,

    pub backend: Arc<dyn InferenceBackend>,

    /// Enforced by the handler after authentication.
    pub max_body_bytes: usize,
}

impl HandlerState {
    pub fn new(
        api_key: impl Into<Arc<str>>,
        model: impl Into<Arc<str>>,
        backend: Arc<dyn InferenceBackend>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            backend,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }

    pub fn with_max_body_bytes(mut self, max_body_bytes: usize) -> Self {
        self.max_body_bytes = max_body_bytes;
        self
    }

    pub fn from_config(config: &Config, backend: Arc<dyn InferenceBackend>) -> Self {
        Self::new(config.api_key.as_str(), config.model.as_str(), backend)
            .with_max_body_bytes(config.max_body_bytes)
    }
}
