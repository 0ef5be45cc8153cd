//! HTTP search client.

use async_trait::async_trait;
use avroreg_search_protocol::{SearchQuery, SearchResponse};
use reqwest::Client;
use std::fmt;
use std::time::Duration;

use crate::config::SearchClientConfig;
use crate::error::{ClientError, Result};
use crate::SearchClient;

const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 5_000;
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;

/// Search client that speaks the Elasticsearch HTTP API.
///
/// Queries are POSTed to `{base_url}/{index}/{doc_type}/_search`. The
/// configured request timeout bounds each call; there are no retries.
pub struct HttpSearchClient {
    /// Underlying HTTP client.
    client: Client,
    /// Endpoint base URL, without a trailing slash.
    base_url: String,
    /// Optional bearer token.
    auth_token: Option<String>,
}

impl HttpSearchClient {
    /// Create a client from configuration.
    pub fn from_config(config: &SearchClientConfig) -> Result<Self> {
        if config.base_url.trim().is_empty() {
            return Err(ClientError::InvalidConfig {
                message: "base_url must not be empty".to_string(),
            });
        }

        let connect_timeout =
            Duration::from_millis(config.connect_timeout_ms.unwrap_or(DEFAULT_CONNECT_TIMEOUT_MS));
        let request_timeout =
            Duration::from_millis(config.request_timeout_ms.unwrap_or(DEFAULT_REQUEST_TIMEOUT_MS));

        let client = Client::builder()
            .connect_timeout(connect_timeout)
            .timeout(request_timeout)
            .build()
            .map_err(|e| ClientError::InvalidConfig {
                message: format!("failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            auth_token: config.auth_token.clone(),
        })
    }

    /// Create a client for the given endpoint with default timeouts.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_token: None,
        }
    }

    /// Set the authentication token.
    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    fn search_url(&self, index: &str, doc_type: &str) -> String {
        format!("{}/{}/{}/_search", self.base_url, index, doc_type)
    }
}

impl fmt::Debug for HttpSearchClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpSearchClient")
            .field("base_url", &self.base_url)
            .field("has_auth_token", &self.auth_token.is_some())
            .finish()
    }
}

#[async_trait]
impl SearchClient for HttpSearchClient {
    async fn search(
        &self,
        query: &SearchQuery,
        index: &str,
        doc_type: &str,
    ) -> Result<SearchResponse> {
        let url = self.search_url(index, doc_type);

        let mut request = self.client.post(&url).json(query);
        if let Some(ref token) = self.auth_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                ClientError::Timeout {
                    message: e.to_string(),
                }
            } else if e.is_connect() {
                ClientError::Connect {
                    message: e.to_string(),
                }
            } else {
                ClientError::Transport {
                    message: e.to_string(),
                }
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Http {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<SearchResponse>()
            .await
            .map_err(|e| ClientError::InvalidResponse {
                message: e.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_empty_base_url() {
        let config = SearchClientConfig::new("  ");
        let result = HttpSearchClient::from_config(&config);
        assert!(matches!(result, Err(ClientError::InvalidConfig { .. })));
    }

    #[test]
    fn test_from_config_with_endpoint() {
        let config = SearchClientConfig::new("http://localhost:9200/")
            .with_auth_token("my-secret-token");
        let client = HttpSearchClient::from_config(&config).unwrap();

        assert_eq!(client.base_url, "http://localhost:9200");
        assert_eq!(client.auth_token, Some("my-secret-token".to_string()));
    }

    #[test]
    fn test_search_url_shape() {
        let client = HttpSearchClient::new("http://localhost:9200");
        assert_eq!(
            client.search_url("avro_schemas", "schema"),
            "http://localhost:9200/avro_schemas/schema/_search"
        );
    }

    #[test]
    fn test_debug_hides_token() {
        let client = HttpSearchClient::new("http://localhost:9200").with_auth_token("secret-token");

        let debug_output = format!("{:?}", client);
        assert!(debug_output.contains("has_auth_token: true"));
        assert!(!debug_output.contains("secret-token"));
    }
}
