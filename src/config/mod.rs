//! Environment-backed configuration.
//!
//! Most settings have defaults. Override with `RERANK_*` environment variables.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::net::IpAddr;
use std::time::Duration;

use crate::constants::DEFAULT_INFERENCE_MODEL;

/// Server configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `RERANK_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port. Default: `8080`.
    pub port: u16,

    /// IP address to bind to. Default: `127.0.0.1`.
    pub bind_addr: IpAddr,

    /// Shared secret callers must present as `Authorization: Bearer <api_key>`.
    pub api_key: String,

    /// Workers AI model identifier. Default: `@cf/baai/bge-reranker-base`.
    pub model: String,

    /// Cloudflare account that owns the Workers AI quota.
    pub cf_account_id: Option<String>,

    /// Cloudflare API token with Workers AI permissions.
    pub cf_api_token: Option<String>,

    /// Cloudflare REST API base. Default: `https://api.cloudflare.com/client/v4`.
    pub cf_base_url: String,

    /// Upper bound on a single inference call. Default: 30 seconds.
    pub inference_timeout: Duration,

    /// Serve from the deterministic in-process backend instead of Workers AI.
    pub mock_inference: bool,

    /// Largest request body the rerank endpoint buffers. Default: 10 MiB.
    pub max_body_bytes: usize,
}

/// Default Cloudflare API base used when `RERANK_CF_BASE_URL` is not set.
pub const DEFAULT_CF_BASE_URL: &str = "https://api.cloudflare.com/client/v4";

/// Default inference timeout in seconds.
pub const DEFAULT_INFERENCE_TIMEOUT_SECS: u64 = 30;

/// Default request body limit in bytes.
pub const DEFAULT_MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
            api_key: String::new(),
            model: DEFAULT_INFERENCE_MODEL.to_string(),
            cf_account_id: None,
            cf_api_token: None,
            cf_base_url: DEFAULT_CF_BASE_URL.to_string(),
            inference_timeout: Duration::from_secs(DEFAULT_INFERENCE_TIMEOUT_SECS),
            mock_inference: false,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl Config {
    const ENV_PORT: &'static str = "RERANK_PORT";
    const ENV_BIND_ADDR: &'static str = "RERANK_BIND_ADDR";
    const ENV_API_KEY: &'static str = "RERANK_API_KEY";
    const ENV_MODEL: &'static str = "RERANK_MODEL";
    const ENV_CF_ACCOUNT_ID: &'static str = "RERANK_CF_ACCOUNT_ID";
    const ENV_CF_API_TOKEN: &'static str = "RERANK_CF_API_TOKEN";
    const ENV_CF_BASE_URL: &'static str = "RERANK_CF_BASE_URL";
    const ENV_INFERENCE_TIMEOUT: &'static str = "RERANK_INFERENCE_TIMEOUT_SECS";
    const ENV_MOCK_INFERENCE: &'static str = "RERANK_MOCK_INFERENCE";
    const ENV_MAX_BODY_BYTES: &'static str = "RERANK_MAX_BODY_BYTES";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = Self::parse_port_from_env(defaults.port)?;
        let bind_addr = Self::parse_bind_addr_from_env(defaults.bind_addr)?;
        let api_key = Self::parse_string_from_env(Self::ENV_API_KEY, defaults.api_key);
        let model = Self::parse_optional_string_from_env(Self::ENV_MODEL).unwrap_or(defaults.model);
        let cf_account_id = Self::parse_optional_string_from_env(Self::ENV_CF_ACCOUNT_ID);
        let cf_api_token = Self::parse_optional_string_from_env(Self::ENV_CF_API_TOKEN);
        let cf_base_url = Self::parse_optional_string_from_env(Self::ENV_CF_BASE_URL)
            .unwrap_or(defaults.cf_base_url);
        let inference_timeout = Self::parse_timeout_from_env(defaults.inference_timeout)?;
        let mock_inference = env::var_os(Self::ENV_MOCK_INFERENCE).is_some_and(|v| !v.is_empty());
        let max_body_bytes = Self::parse_body_limit_from_env(defaults.max_body_bytes)?;

        Ok(Self {
            port,
            bind_addr,
            api_key,
            model,
            cf_account_id,
            cf_api_token,
            cf_base_url,
            inference_timeout,
            mock_inference,
            max_body_bytes,
        })
    }

    /// Validates required values and basic invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.is_empty() {
            return Err(ConfigError::MissingEnvVar {
                name: Self::ENV_API_KEY,
            });
        }

        if self.inference_timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout {
                value: "0".to_string(),
            });
        }

        if self.max_body_bytes == 0 {
            return Err(ConfigError::InvalidBodyLimit {
                value: "0".to_string(),
            });
        }

        if !self.mock_inference {
            if self.cf_account_id.is_none() {
                return Err(ConfigError::MissingEnvVar {
                    name: Self::ENV_CF_ACCOUNT_ID,
                });
            }
            if self.cf_api_token.is_none() {
                return Err(ConfigError::MissingEnvVar {
                    name: Self::ENV_CF_API_TOKEN,
                });
            }
        }

        Ok(())
    }

    /// Returns `"{bind_addr}:{port}"` (useful for logging/binding).
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    fn parse_port_from_env(default: u16) -> Result<u16, ConfigError> {
        match env::var(Self::ENV_PORT) {
            Ok(value) => {
                let port: u16 = value.parse().map_err(|e| ConfigError::PortParseError {
                    value: value.clone(),
                    source: e,
                })?;

                if port == 0 {
                    return Err(ConfigError::InvalidPort { value });
                }

                Ok(port)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_bind_addr_from_env(default: IpAddr) -> Result<IpAddr, ConfigError> {
        match env::var(Self::ENV_BIND_ADDR) {
            Ok(value) => value
                .parse()
                .map_err(|e| ConfigError::InvalidBindAddr { value, source: e }),
            Err(_) => Ok(default),
        }
    }

    fn parse_timeout_from_env(default: Duration) -> Result<Duration, ConfigError> {
        match env::var(Self::ENV_INFERENCE_TIMEOUT) {
            Ok(value) => match value.trim().parse::<u64>() {
                Ok(0) | Err(_) => Err(ConfigError::InvalidTimeout { value }),
                Ok(secs) => Ok(Duration::from_secs(secs)),
            },
            Err(_) => Ok(default),
        }
    }

    fn parse_body_limit_from_env(default: usize) -> Result<usize, ConfigError> {
        match env::var(Self::ENV_MAX_BODY_BYTES) {
            Ok(value) => match value.trim().parse::<usize>() {
                Ok(0) | Err(_) => Err(ConfigError::InvalidBodyLimit { value }),
                Ok(bytes) => Ok(bytes),
            },
            Err(_) => Ok(default),
        }
    }

    fn parse_string_from_env(var_name: &str, default: String) -> String {
        env::var(var_name).unwrap_or(default)
    }

    fn parse_optional_string_from_env(var_name: &str) -> Option<String> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }
}
