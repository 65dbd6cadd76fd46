use axum::{
    Json,
    body::{Body, Bytes},
    extract::State,
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    response::{IntoResponse, Response},
};
use http_body_util::LengthLimitError;
use tracing::{error, info, instrument, warn};

use crate::gateway::error::GatewayError;
use crate::gateway::payload::{
    HealthCheckResponse, IncomingRequest, RerankRequest, RerankResponse, RerankResult,
};
use crate::gateway::state::HandlerState;
use crate::inference::{InferenceError, InferenceInput, InferenceOutput};

#[instrument(skip_all, fields(backend = tracing::field::Empty))]
pub async fn rerank_handler(
    State(state): State<HandlerState>,
    headers: HeaderMap,
    body: Body,
) -> Result<Response, GatewayError> {
    tracing::Span::current().record("backend", state.backend.name());
    authorize(&headers, &state.api_key)?;

    let body = read_body(body, state.max_body_bytes).await?;
    let body: serde_json::Value = serde_json::from_slice(&body)
        .map_err(|e| GatewayError::InvalidRequest(format!("Invalid JSON body: {}", e)))?;

    let request = match IncomingRequest::from_json(&body)? {
        IncomingRequest::HealthCheck { model } => {
            return Ok((StatusCode::OK, Json(HealthCheckResponse::new(model))).into_response());
        }
        IncomingRequest::Rerank(request) => request,
    };

    info!(
        query = %request.query,
        documents = request.documents.len(),
        "Processing rerank request"
    );

    let input = InferenceInput::from_documents(request.query.as_str(), &request.documents);
    let output = state
        .backend
        .rerank(&state.model, &input)
        .await
        .map_err(|e| {
            error!(error = %e, model = %state.model, "Inference call failed");
            GatewayError::Inference(e)
        })?;

    info!(output = ?output, "Inference output");

    let response = build_rerank_response(&request, output)
        .inspect_err(|e| error!(error = %e, "Inference output does not match the request"))?;

    Ok((StatusCode::OK, Json(response)).into_response())
}

/// Buffers the request body up to `limit` bytes.
pub(crate) async fn read_body(body: Body, limit: usize) -> Result<Bytes, GatewayError> {
    axum::body::to_bytes(body, limit).await.map_err(|e| {
        if exceeds_length_limit(&e) {
            warn!(limit, "Request body too large");
            GatewayError::PayloadTooLarge { limit }
        } else {
            GatewayError::InvalidRequest(format!("Failed to read request body: {}", e))
        }
    })
}

fn exceeds_length_limit(err: &(dyn std::error::Error + 'static)) -> bool {
    let mut current = Some(err);
    while let Some(e) = current {
        if e.is::<LengthLimitError>() {
            return true;
        }
        current = e.source();
    }
    false
}

/// Accepts only an exact `Bearer <api_key>` header.
pub(crate) fn authorize(headers: &HeaderMap, api_key: &str) -> Result<(), GatewayError> {
    let received = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    let authorized = received
        .and_then(|value| value.strip_prefix("Bearer "))
        .is_some_and(|token| token == api_key);

    if authorized {
        return Ok(());
    }

    warn!(
        authorization = %redact_authorization(received),
        "Authentication failed"
    );
    Err(GatewayError::Unauthorized)
}

/// Keeps the auth scheme and masks the credential so failed attempts can be
/// diagnosed without leaking keys into logs.
pub(crate) fn redact_authorization(value: Option<&str>) -> String {
    match value {
        None => "<missing>".to_string(),
        Some("") => "<empty>".to_string(),
        Some(value) => match value.split_once(' ') {
            Some((scheme, credential)) if !credential.is_empty() => {
                format!("{} <redacted:{} chars>", scheme, credential.chars().count())
            }
            Some((scheme, _)) => format!("{} <empty>", scheme),
            None => format!("<redacted:{} chars>", value.chars().count()),
        },
    }
}

/// Maps model output onto caller-facing results, resolving each index back to
/// its document text. Order follows the model output exactly.
pub(crate) fn build_rerank_response(
    request: &RerankRequest,
    output: InferenceOutput,
) -> Result<RerankResponse, GatewayError> {
    let results = output
        .response
        .into_iter()
        .map(|scored| -> Result<RerankResult, GatewayError> {
            let document = request.documents.get(scored.id).ok_or(
                InferenceError::IndexOutOfRange {
                    index: scored.id,
                    len: request.documents.len(),
                },
            )?;
            Ok(RerankResult {
                index: scored.id,
                relevance_score: scored.score,
                document: document.clone(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(RerankResponse {
        id: uuid::Uuid::new_v4().to_string(),
        results,
    })
}
