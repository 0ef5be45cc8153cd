//! Search client for the avroreg schema registry.
//!
//! This crate defines the [`SearchClient`] trait — the transport seam the
//! registry depends on — and [`HttpSearchClient`], an implementation that
//! speaks the Elasticsearch HTTP API.
//!
//! Transport concerns (connection handling, authentication, timeouts) live
//! entirely in this crate. The client performs no retries: a transport
//! failure propagates to the caller immediately.
//!
//! # Example
//!
//! ```ignore
//! use avroreg_search_client::{HttpSearchClient, SearchClientConfig};
//!
//! let config = SearchClientConfig::new("http://localhost:9200")
//!     .with_auth_token("my-token")
//!     .with_request_timeout_ms(10_000);
//! let client = HttpSearchClient::from_config(&config)?;
//!
//! let response = client.search(&query, "avro_schemas", "schema").await?;
//! ```

mod config;
mod error;
mod http;

pub use config::SearchClientConfig;
pub use error::{ClientError, Result};
pub use http::HttpSearchClient;

use async_trait::async_trait;
use avroreg_search_protocol::{SearchQuery, SearchResponse};

/// Transport for search requests.
///
/// The registry holds an implementation of this trait and delegates every
/// lookup to it. Implementations must be safe to share across concurrent
/// callers; the trait takes `&self` and carries no per-call state.
#[async_trait]
pub trait SearchClient: std::fmt::Debug + Send + Sync {
    /// Execute a search against one index and document type.
    ///
    /// # Arguments
    ///
    /// * `query` - The query envelope to send
    /// * `index` - Target index name
    /// * `doc_type` - Target document type name
    async fn search(
        &self,
        query: &SearchQuery,
        index: &str,
        doc_type: &str,
    ) -> Result<SearchResponse>;
}
