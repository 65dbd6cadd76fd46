//! HTTP gateway (Axum) for the rerank endpoint.

pub mod cors;
pub mod error;
pub mod handler;
pub mod payload;
pub mod state;


use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::any,
};
use tower_http::trace::TraceLayer;

pub use error::{ErrorResponse, GatewayError};
pub use handler::rerank_handler;
pub use payload::{HealthCheckResponse, IncomingRequest, RerankRequest, RerankResponse, RerankResult};
pub use state::HandlerState;

use crate::constants::RERANK_ENDPOINT_PATH;

/// Builds the router. Every method on the rerank path reaches the handler
/// (there is no 405); `OPTIONS` is answered by the CORS middleware first.
///
/// axum's default body limit is disabled; the handler buffers at most
/// `state.max_body_bytes` and only after the caller is authenticated.
pub fn create_router_with_state(state: HandlerState) -> Router {
    Router::new()
        .route(RERANK_ENDPOINT_PATH, any(rerank_handler))
        .fallback(not_found_handler)
        .layer(DefaultBodyLimit::disable())
        .layer(middleware::from_fn(cors::cors_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn not_found_handler() -> Response {
    (StatusCode::NOT_FOUND, "Not Found").into_response()
}
