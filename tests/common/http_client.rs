//! HTTP client helpers for tests.

use reqwest::Method;
use reqwest::header::HeaderMap;
use std::time::Duration;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

pub struct TestClient {
    client: reqwest::Client,
    base_url: String,
}

/// Status, headers, and raw body of a gateway response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: u16,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("response body is not JSON")
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn has_cors_headers(&self) -> bool {
        self.header("access-control-allow-origin") == Some("*")
            && self.header("access-control-allow-methods") == Some("POST, OPTIONS")
            && self.header("access-control-allow-headers") == Some("Authorization, Content-Type")
    }
}

impl TestClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        format!("{}/{}", self.base_url, path)
    }

    pub async fn send(
        &self,
        method: Method,
        path: &str,
        bearer: Option<&str>,
        body: Option<String>,
    ) -> Result<TestResponse, TestClientError> {
        let mut builder = self.client.request(method, self.url(path));
        if let Some(token) = bearer {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = body {
            builder = builder
                .header("Content-Type", "application/json")
                .body(body);
        }

        let resp = builder.send().await?;
        let status = resp.status().as_u16();
        let headers = resp.headers().clone();
        let body = resp.text().await?;

        Ok(TestResponse {
            status,
            headers,
            body,
        })
    }

    pub async fn rerank(
        &self,
        bearer: Option<&str>,
        body: &serde_json::Value,
    ) -> Result<TestResponse, TestClientError> {
        self.send(Method::POST, "/v1/embeddings", bearer, Some(body.to_string()))
            .await
    }

    pub async fn preflight(&self, path: &str) -> Result<TestResponse, TestClientError> {
        self.send(Method::OPTIONS, path, None, None).await
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TestClientError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_url_building() {
        let client = TestClient::new("http://localhost:8080");
        assert_eq!(
            client.url("/v1/embeddings"),
            "http://localhost:8080/v1/embeddings"
        );
        assert_eq!(
            client.url("v1/embeddings"),
            "http://localhost:8080/v1/embeddings"
        );
    }
}
