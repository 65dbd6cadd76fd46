//! Cross-cutting, shared constants.
//!
//! The endpoint path and health-check model name are part of the caller-facing
//! contract. Changing either breaks existing clients.

/// The only functional route. The name predates the rerank semantics and is
/// kept as-is for compatibility with deployed callers.
pub const RERANK_ENDPOINT_PATH: &str = "/v1/embeddings";

/// Workers AI model invoked when `RERANK_MODEL` is not set.
pub const DEFAULT_INFERENCE_MODEL: &str = "@cf/baai/bge-reranker-base";

/// Model echoed in health-check responses when the request names none.
pub const HEALTH_CHECK_MODEL: &str = "health-check-ok";

/// Error message returned with every 401.
pub const INVALID_API_KEY_MESSAGE: &str = "Invalid API Key";

pub const CORS_ALLOW_ORIGIN: &str = "*";
pub const CORS_ALLOW_METHODS: &str = "POST, OPTIONS";
pub const CORS_ALLOW_HEADERS: &str = "Authorization, Content-Type";

/// Headers consulted (in order) when logging the caller's address.
pub const CLIENT_IP_HEADERS: [&str; 2] = ["cf-connecting-ip", "x-forwarded-for"];
