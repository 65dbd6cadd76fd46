//! Caller-facing request and response bodies.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::HEALTH_CHECK_MODEL;
use crate::gateway::error::GatewayError;

/// A rerank call that passed shape validation.
#[derive(Debug, Clone, PartialEq)]
pub struct RerankRequest {
    pub query: String,
    pub documents: Vec<String>,
    pub model: Option<String>,
}

/// Outcome of inspecting a parsed request body.
#[derive(Debug, Clone, PartialEq)]
pub enum IncomingRequest {
    /// Body lacks a usable `query` or `documents`; answered with a
    /// [`HealthCheckResponse`] instead of an error so liveness probes stay green.
    HealthCheck { model: Option<String> },
    Rerank(RerankRequest),
}

impl IncomingRequest {
    /// Classifies a JSON body.
    ///
    /// A missing or falsy `query` (`null`, `false`, `0`, `""`) or anything
    /// other than a non-empty `documents` array makes the body a health check.
    /// Otherwise `query` must be a string and every document a string.
    pub fn from_json(body: &Value) -> Result<Self, GatewayError> {
        let model = body
            .get("model")
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
            .map(str::to_string);

        let query = body.get("query").filter(|q| !is_falsy(q));
        let documents = body
            .get("documents")
            .and_then(Value::as_array)
            .filter(|d| !d.is_empty());

        let (Some(query), Some(documents)) = (query, documents) else {
            return Ok(Self::HealthCheck { model });
        };

        let query = query
            .as_str()
            .ok_or_else(|| GatewayError::InvalidRequest("`query` must be a string".to_string()))?;

        let documents = documents
            .iter()
            .enumerate()
            .map(|(i, doc)| {
                doc.as_str().map(str::to_string).ok_or_else(|| {
                    GatewayError::InvalidRequest(format!("`documents[{i}]` must be a string"))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::Rerank(RerankRequest {
            query: query.to_string(),
            documents,
            model,
        }))
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RerankResult {
    pub index: usize,
    pub relevance_score: f64,
    pub document: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RerankResponse {
    pub id: String,
    pub results: Vec<RerankResult>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub total_tokens: u32,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct HealthCheckResponse {
    pub object: String,
    pub data: Vec<Value>,
    pub model: String,
    pub usage: Usage,
}

impl HealthCheckResponse {
    /// Only non-empty string models are echoed. A request such as
    /// `{"model": 7}` reports `health-check-ok`.
    pub fn new(model: Option<String>) -> Self {
        Self {
            object: "list".to_string(),
            data: Vec::new(),
            model: model.unwrap_or_else(|| HEALTH_CHECK_MODEL.to_string()),
            usage: Usage::default(),
        }
    }
}
