use thiserror::Error;

#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("inference request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("inference API returned status {status}: {body}")]
    Api { status: u16, body: String },

    #[error("inference API rejected the request: {messages}")]
    Rejected { messages: String },

    #[error("malformed inference response: {reason}")]
    MalformedResponse { reason: String },

    #[error("inference returned index {index} but only {len} documents were sent")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("invalid inference configuration: {reason}")]
    InvalidConfig { reason: String },
}
