//! Search client configuration.

use serde::{Deserialize, Serialize};

/// Configuration for a search client.
///
/// Bound once when the client is constructed; the client never re-reads it
/// afterwards, so callers observe a consistent snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchClientConfig {
    /// Base URL of the search endpoint (e.g., "http://localhost:9200").
    pub base_url: String,

    /// Bearer token for authentication (optional).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_token: Option<String>,

    /// Connection timeout in milliseconds (optional).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connect_timeout_ms: Option<u64>,

    /// Per-request timeout in milliseconds (optional).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_timeout_ms: Option<u64>,
}

impl SearchClientConfig {
    /// Create a configuration for the given endpoint.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            auth_token: None,
            connect_timeout_ms: None,
            request_timeout_ms: None,
        }
    }

    /// Set the authentication token.
    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    /// Set the connection timeout.
    pub fn with_connect_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.connect_timeout_ms = Some(timeout_ms);
        self
    }

    /// Set the per-request timeout.
    pub fn with_request_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.request_timeout_ms = Some(timeout_ms);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = SearchClientConfig::new("http://search.example.com:9200")
            .with_auth_token("secret-token")
            .with_connect_timeout_ms(2_000)
            .with_request_timeout_ms(10_000);

        assert_eq!(config.base_url, "http://search.example.com:9200");
        assert_eq!(config.auth_token, Some("secret-token".to_string()));
        assert_eq!(config.connect_timeout_ms, Some(2_000));
        assert_eq!(config.request_timeout_ms, Some(10_000));
    }

    #[test]
    fn test_optional_fields_not_serialized() {
        let config = SearchClientConfig::new("http://localhost:9200");

        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("auth_token"));
        assert!(!json.contains("connect_timeout_ms"));
    }
}
