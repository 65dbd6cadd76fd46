//! Reranker inference backends.
//!
//! The gateway only depends on [`InferenceBackend`]. Production traffic goes to
//! [`WorkersAiBackend`]; [`MockInferenceBackend`] is a deterministic stand-in for
//! tests and for running the server without Cloudflare credentials.

pub mod config;
pub mod error;
pub mod mock;
pub mod types;
pub mod workers_ai;


use async_trait::async_trait;

pub use config::WorkersAiConfig;
pub use error::InferenceError;
pub use mock::{MockInferenceBackend, RecordedCall};
pub use types::{InferenceContext, InferenceInput, InferenceOutput, ScoredContext};
pub use workers_ai::WorkersAiBackend;

#[async_trait]
/// A model that scores `input.contexts` against `input.query`.
pub trait InferenceBackend: Send + Sync {
    /// Short backend label used in logs.
    fn name(&self) -> &'static str;

    /// Runs `model` over `input`.
    async fn rerank(
        &self,
        model: &str,
        input: &InferenceInput,
    ) -> Result<InferenceOutput, InferenceError>;
}
