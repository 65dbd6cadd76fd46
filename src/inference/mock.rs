use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::InferenceBackend;
use super::error::InferenceError;
use super::types::{InferenceInput, InferenceOutput, ScoredContext};

#[derive(Debug, Clone)]
enum MockBehavior {
    Lexical,
    Fixed(InferenceOutput),
    Fail(String),
}

/// A recorded call to [`MockInferenceBackend::rerank`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub model: String,
    pub input: InferenceInput,
}

/// Deterministic in-process reranker.
///
/// The default scorer ranks contexts by the fraction of query terms they
/// contain (ties keep input order). Tests can instead script a fixed output or
/// a failure.
#[derive(Clone)]
pub struct MockInferenceBackend {
    behavior: MockBehavior,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl Default for MockInferenceBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MockInferenceBackend {
    /// Creates a mock that scores by term overlap.
    pub fn new() -> Self {
        Self {
            behavior: MockBehavior::Lexical,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Creates a mock that always returns `output`.
    pub fn with_output(output: InferenceOutput) -> Self {
        Self {
            behavior: MockBehavior::Fixed(output),
            ..Self::new()
        }
    }

    /// Creates a mock whose every call fails with [`InferenceError::Rejected`].
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            behavior: MockBehavior::Fail(message.into()),
            ..Self::new()
        }
    }

    /// Returns every call made so far, oldest first.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|c| c.len()).unwrap_or(0)
    }
}

#[async_trait]
impl InferenceBackend for MockInferenceBackend {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn rerank(
        &self,
        model: &str,
        input: &InferenceInput,
    ) -> Result<InferenceOutput, InferenceError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(RecordedCall {
                model: model.to_string(),
                input: input.clone(),
            });
        }

        match &self.behavior {
            MockBehavior::Lexical => Ok(lexical_scores(input)),
            MockBehavior::Fixed(output) => Ok(output.clone()),
            MockBehavior::Fail(message) => Err(InferenceError::Rejected {
                messages: message.clone(),
            }),
        }
    }
}

fn terms(text: &str) -> HashSet<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}

pub(crate) fn lexical_scores(input: &InferenceInput) -> InferenceOutput {
    let query_terms = terms(&input.query);

    let mut response: Vec<ScoredContext> = input
        .contexts
        .iter()
        .enumerate()
        .map(|(id, ctx)| {
            let score = if query_terms.is_empty() {
                0.0
            } else {
                let ctx_terms = terms(&ctx.text);
                let hits = query_terms.intersection(&ctx_terms).count();
                hits as f64 / query_terms.len() as f64
            };
            ScoredContext { id, score }
        })
        .collect();

    // Stable sort keeps input order among equal scores.
    response.sort_by(|a, b| b.score.total_cmp(&a.score));

    InferenceOutput { response }
}
