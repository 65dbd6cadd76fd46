//! Cross-origin headers and preflight handling.
//!
//! Every response leaves with the same permissive header set so browser
//! clients can read error bodies as well as results.

use axum::{
    extract::Request,
    http::{
        HeaderMap, HeaderValue, Method, StatusCode,
        header::{
            ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
            ACCESS_CONTROL_ALLOW_ORIGIN,
        },
    },
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::info;

use crate::constants::{
    CLIENT_IP_HEADERS, CORS_ALLOW_HEADERS, CORS_ALLOW_METHODS, CORS_ALLOW_ORIGIN,
};

pub fn apply_cors_headers(headers: &mut HeaderMap) {
    headers.insert(
        ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static(CORS_ALLOW_ORIGIN),
    );
    headers.insert(
        ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(CORS_ALLOW_METHODS),
    );
    headers.insert(
        ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(CORS_ALLOW_HEADERS),
    );
}

/// Best-effort caller address for logging. Proxies put the original client
/// first in `x-forwarded-for`.
pub fn client_ip(headers: &HeaderMap) -> String {
    CLIENT_IP_HEADERS
        .iter()
        .filter_map(|name| headers.get(*name))
        .filter_map(|v| v.to_str().ok())
        .filter_map(|v| v.split(',').next())
        .map(str::trim)
        .find(|v| !v.is_empty())
        .unwrap_or("unknown")
        .to_string()
}

/// Logs the request, answers `OPTIONS` on any path with `204`, and stamps CORS
/// headers on everything else.
pub async fn cors_middleware(request: Request, next: Next) -> Response {
    info!(
        client_ip = %client_ip(request.headers()),
        method = %request.method(),
        uri = %request.uri(),
        "Incoming request"
    );

    let mut response = if request.method() == Method::OPTIONS {
        StatusCode::NO_CONTENT.into_response()
    } else {
        next.run(request).await
    };

    apply_cors_headers(response.headers_mut());
    response
}
