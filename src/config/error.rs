//! Configuration error types.

use thiserror::Error;

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Port value is outside valid range (1-65535).
    #[error("invalid port '{value}': must be between 1 and 65535")]
    InvalidPort { value: String },

    /// Port string could not be parsed as a number.
    #[error("failed to parse port '{value}': {source}")]
    PortParseError {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// Bind address string could not be parsed.
    #[error("failed to parse bind address '{value}': {source}")]
    InvalidBindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },

    /// A required environment variable was not set (or was empty).
    #[error("missing required environment variable: {name}")]
    MissingEnvVar { name: &'static str },

    /// Inference timeout was not a positive number of seconds.
    #[error("invalid inference timeout '{value}': must be a positive number of seconds")]
    InvalidTimeout { value: String },

    /// Request body limit was not a positive number of bytes.
    #[error("invalid request body limit '{value}': must be a positive number of bytes")]
    InvalidBodyLimit { value: String },
}
