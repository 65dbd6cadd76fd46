//! Wire types for the reranker model's input and output contract.

use serde::{Deserialize, Serialize};

/// One candidate passage handed to the reranker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferenceContext {
    pub text: String,
}

/// Request body for a reranker model run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferenceInput {
    pub query: String,
    pub contexts: Vec<InferenceContext>,
}

impl InferenceInput {
    /// Builds an input with one context per document, preserving order so that
    /// context `i` is document `i`.
    pub fn from_documents(query: impl Into<String>, documents: &[String]) -> Self {
        Self {
            query: query.into(),
            contexts: documents
                .iter()
                .map(|text| InferenceContext { text: text.clone() })
                .collect(),
        }
    }
}

/// A single relevance score. `id` is the position of the scored context in
/// [`InferenceInput::contexts`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoredContext {
    pub id: usize,
    pub score: f64,
}

/// Reranker output, in whatever order the model returned it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InferenceOutput {
    pub response: Vec<ScoredContext>,
}
