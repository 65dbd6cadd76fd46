//! Rerank gateway library crate (used by the server binary and integration tests).
//!
//! # Public API Surface
//!
//! ## Gateway
//! - [`create_router_with_state`], [`HandlerState`] - Axum router for the rerank endpoint
//! - [`RerankResponse`], [`HealthCheckResponse`], [`GatewayError`] - caller-facing shapes
//!
//! ## Inference
//! - [`InferenceBackend`] - the seam between the gateway and the reranker model
//! - [`WorkersAiBackend`], [`WorkersAiConfig`] - Cloudflare Workers AI REST client
//! - [`MockInferenceBackend`] - deterministic in-process backend
//!
//! ## Configuration
//! - [`Config`], [`ConfigError`] - `RERANK_*` environment configuration

pub mod config;
pub mod constants;
pub mod gateway;
pub mod inference;

pub use config::{Config, ConfigError};
pub use constants::{
    DEFAULT_INFERENCE_MODEL, HEALTH_CHECK_MODEL, INVALID_API_KEY_MESSAGE, RERANK_ENDPOINT_PATH,
};
pub use gateway::{
    ErrorResponse, GatewayError, HandlerState, HealthCheckResponse, IncomingRequest,
    RerankRequest, RerankResponse, RerankResult, create_router_with_state,
};
pub use inference::{
    InferenceBackend, InferenceContext, InferenceError, InferenceInput, InferenceOutput,
    MockInferenceBackend, RecordedCall, ScoredContext, WorkersAiBackend, WorkersAiConfig,
};
