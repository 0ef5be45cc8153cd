//! Elasticsearch-backed Avro schema registry.
//!
//! This crate provides the registry service: given a schema name and
//! optional version, it issues a ranked, filtered search against a document
//! store and adapts the single best-matching document's schema text into a
//! [`RecordSchema`].
//!
//! # Architecture
//!
//! The service is composed of:
//!
//! - [`SchemaRegistry`]: Trait for schema resolution capabilities
//! - [`ElasticsearchSchemaRegistry`]: Implementation over an injected
//!   [`SearchClient`]
//! - [`RegistryConfig`]: Target index and document type
//! - [`schema_query`]: The typed lookup query builder
//!
//! # Resolution protocol
//!
//! A lookup asks the store for the single highest-version match on `name`
//! (`size: 1`, descending `version` sort), optionally pinned to an exact
//! version. Exactly one hit must come back: zero and many are both
//! [`RegistryError::SchemaNotFound`]. The sole hit's `text` field is parsed
//! as Avro and converted to the record model.
//!
//! Each call is independent and stateless apart from the configuration
//! bound at construction, so a registry value can be shared across
//! concurrent callers without locking.
//!
//! # Example
//!
//! ```ignore
//! use avroreg_core::SchemaIdentifier;
//! use avroreg_registry::{ElasticsearchSchemaRegistry, SchemaRegistry};
//! use avroreg_search_client::HttpSearchClient;
//!
//! let client = HttpSearchClient::new("http://localhost:9200");
//! let registry = ElasticsearchSchemaRegistry::with_defaults(client);
//!
//! let schema = registry
//!     .retrieve_schema(&SchemaIdentifier::named("user-event"))
//!     .await?;
//! ```

mod error;
mod query;

pub use error::{RegistryError, Result};
pub use query::schema_query;

use async_trait::async_trait;
use avroreg_core::{avro, RecordSchema, SchemaField, SchemaIdentifier, TEXT_FORMAT_AVRO};
use avroreg_search_client::SearchClient;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Default index holding schema documents.
pub const DEFAULT_INDEX: &str = "avro_schemas";

/// Default document type of schema documents.
pub const DEFAULT_DOC_TYPE: &str = "schema";

/// What this registry can supply for a resolved schema.
const SUPPLIED_FIELDS: &[SchemaField] = &[
    SchemaField::SchemaName,
    SchemaField::SchemaText,
    SchemaField::SchemaTextFormat,
];

/// Registry configuration.
///
/// Bound once at construction; never mutated afterwards, so concurrent
/// lookups observe a consistent snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Index to search for schema documents.
    #[serde(default = "default_index")]
    pub index: String,

    /// Document type to search within the index.
    #[serde(default = "default_doc_type")]
    pub doc_type: String,
}

fn default_index() -> String {
    DEFAULT_INDEX.to_string()
}

fn default_doc_type() -> String {
    DEFAULT_DOC_TYPE.to_string()
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            index: default_index(),
            doc_type: default_doc_type(),
        }
    }
}

impl RegistryConfig {
    /// Set the target index.
    pub fn with_index(mut self, index: impl Into<String>) -> Self {
        self.index = index.into();
        self
    }

    /// Set the target document type.
    pub fn with_doc_type(mut self, doc_type: impl Into<String>) -> Self {
        self.doc_type = doc_type.into();
        self
    }
}

/// Schema resolution capability.
///
/// Implementations must be safe to call concurrently; `retrieve_schema`
/// takes `&self` and owns no per-call state.
#[async_trait]
pub trait SchemaRegistry: fmt::Debug + Send + Sync {
    /// Resolve a schema by identifier.
    async fn retrieve_schema(&self, identifier: &SchemaIdentifier) -> Result<RecordSchema>;

    /// The pieces of schema information this registry supplies.
    fn supplied_fields(&self) -> &[SchemaField];
}

/// Schema registry backed by an Elasticsearch index.
///
/// Holds an injected [`SearchClient`] and a fixed [`RegistryConfig`];
/// resolution is read-only and performs no retries — transport failures
/// propagate unchanged.
pub struct ElasticsearchSchemaRegistry<C: SearchClient> {
    /// Search transport.
    client: Arc<C>,
    /// Target index and document type.
    config: RegistryConfig,
}

impl<C: SearchClient> ElasticsearchSchemaRegistry<C> {
    /// Create a registry from a client and configuration.
    pub fn new(client: C, config: RegistryConfig) -> Self {
        Self {
            client: Arc::new(client),
            config,
        }
    }

    /// Create a registry with the default index and document type.
    pub fn with_defaults(client: C) -> Self {
        Self::new(client, RegistryConfig::default())
    }

    /// The configuration this registry was built with.
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }
}

impl<C: SearchClient> fmt::Debug for ElasticsearchSchemaRegistry<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElasticsearchSchemaRegistry")
            .field("client", &self.client)
            .field("config", &self.config)
            .finish()
    }
}

#[async_trait]
impl<C: SearchClient> SchemaRegistry for ElasticsearchSchemaRegistry<C> {
    async fn retrieve_schema(&self, identifier: &SchemaIdentifier) -> Result<RecordSchema> {
        let query = schema_query(identifier);

        if tracing::enabled!(tracing::Level::DEBUG) {
            if let Ok(body) = serde_json::to_string(&query) {
                tracing::debug!(schema = %identifier, query = %body, "built schema search query");
            }
        }

        let response = self
            .client
            .search(&query, &self.config.index, &self.config.doc_type)
            .await?;

        let hits = response.hits();
        if hits.len() != 1 {
            return Err(RegistryError::SchemaNotFound {
                name: identifier.name.clone(),
                version: identifier.version,
                hit_count: hits.len(),
            });
        }

        let text = hits[0]
            .source_str("text")
            .ok_or_else(|| RegistryError::MissingSchemaText {
                name: identifier.name.clone(),
            })?;

        let parsed = avro::parse_schema(text)?;
        let record = avro::record_schema_from_avro(&parsed)?;

        Ok(record
            .with_text(text, TEXT_FORMAT_AVRO)
            .with_identifier(identifier.clone()))
    }

    fn supplied_fields(&self) -> &[SchemaField] {
        SUPPLIED_FIELDS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use avroreg_search_client::{ClientError, Result as ClientResult};
    use avroreg_search_protocol::{SearchHit, SearchQuery, SearchResponse};
    use serde_json::{json, Value};
    use std::sync::Mutex;

    const USER_EVENT_SCHEMA: &str = r#"{"type":"record","name":"UserEvent","fields":[{"name":"id","type":"long"},{"name":"kind","type":"string"}]}"#;

    fn schema_hit(name: &str, version: i32, text: &Value) -> SearchHit {
        let source = match json!({"name": name, "version": version, "text": text}) {
            Value::Object(map) => map,
            _ => unreachable!(),
        };
        SearchHit::from_source(source)
    }

    /// Mock client that records every search and answers with fixed hits.
    #[derive(Debug)]
    struct MockClient {
        hits: Vec<SearchHit>,
        captured: Mutex<Vec<(SearchQuery, String, String)>>,
    }

    impl MockClient {
        fn with_hits(hits: Vec<SearchHit>) -> Self {
            Self {
                hits,
                captured: Mutex::new(Vec::new()),
            }
        }

        fn single(text: &Value) -> Self {
            Self::with_hits(vec![schema_hit("user-event", 3, text)])
        }
    }

    #[async_trait]
    impl SearchClient for MockClient {
        async fn search(
            &self,
            query: &SearchQuery,
            index: &str,
            doc_type: &str,
        ) -> ClientResult<SearchResponse> {
            self.captured.lock().unwrap().push((
                query.clone(),
                index.to_string(),
                doc_type.to_string(),
            ));
            Ok(SearchResponse::with_hits(self.hits.clone()))
        }
    }

    /// Client whose transport always fails.
    #[derive(Debug)]
    struct FailingClient;

    #[async_trait]
    impl SearchClient for FailingClient {
        async fn search(
            &self,
            _query: &SearchQuery,
            _index: &str,
            _doc_type: &str,
        ) -> ClientResult<SearchResponse> {
            Err(ClientError::Connect {
                message: "connection refused".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn test_retrieve_latest_schema() {
        let registry =
            ElasticsearchSchemaRegistry::with_defaults(MockClient::single(&json!(USER_EVENT_SCHEMA)));

        let identifier = SchemaIdentifier::named("user-event");
        let schema = registry.retrieve_schema(&identifier).await.unwrap();

        assert_eq!(schema.name.as_deref(), Some("UserEvent"));
        assert_eq!(schema.fields.len(), 2);
        assert_eq!(schema.text.as_deref(), Some(USER_EVENT_SCHEMA));
        assert_eq!(schema.text_format.as_deref(), Some(TEXT_FORMAT_AVRO));
        assert_eq!(schema.identifier, Some(identifier));
    }

    #[tokio::test]
    async fn test_search_targets_configured_index_and_type() {
        let client = MockClient::single(&json!(USER_EVENT_SCHEMA));
        let registry = ElasticsearchSchemaRegistry::with_defaults(client);

        registry
            .retrieve_schema(&SchemaIdentifier::named("user-event"))
            .await
            .unwrap();

        let captured = registry.client.captured.lock().unwrap();
        let (_, index, doc_type) = &captured[0];
        assert_eq!(index, DEFAULT_INDEX);
        assert_eq!(doc_type, DEFAULT_DOC_TYPE);
    }

    #[tokio::test]
    async fn test_custom_config_is_used() {
        let client = MockClient::single(&json!(USER_EVENT_SCHEMA));
        let config = RegistryConfig::default()
            .with_index("my_schemas")
            .with_doc_type("doc");
        let registry = ElasticsearchSchemaRegistry::new(client, config);

        registry
            .retrieve_schema(&SchemaIdentifier::named("user-event"))
            .await
            .unwrap();

        let captured = registry.client.captured.lock().unwrap();
        let (_, index, doc_type) = &captured[0];
        assert_eq!(index, "my_schemas");
        assert_eq!(doc_type, "doc");
    }

    #[tokio::test]
    async fn test_version_pin_reaches_the_query() {
        let client = MockClient::single(&json!(USER_EVENT_SCHEMA));
        let registry = ElasticsearchSchemaRegistry::with_defaults(client);

        registry
            .retrieve_schema(&SchemaIdentifier::versioned("user-event", 3))
            .await
            .unwrap();

        let captured = registry.client.captured.lock().unwrap();
        let (query, _, _) = &captured[0];
        assert_eq!(
            serde_json::to_string(query).unwrap(),
            r#"{"size":1,"sort":[{"version":{"order":"desc"}}],"query":{"bool":{"must":[{"match":{"name":"user-event"}},{"match":{"version":3}}]}}}"#
        );
    }

    #[tokio::test]
    async fn test_zero_hits_is_not_found() {
        let registry = ElasticsearchSchemaRegistry::with_defaults(MockClient::with_hits(vec![]));

        let err = registry
            .retrieve_schema(&SchemaIdentifier::named("missing"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            RegistryError::SchemaNotFound {
                hit_count: 0,
                version: None,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_multiple_hits_is_not_found() {
        let registry = ElasticsearchSchemaRegistry::with_defaults(MockClient::with_hits(vec![
            schema_hit("user-event", 2, &json!(USER_EVENT_SCHEMA)),
            schema_hit("user-event", 3, &json!(USER_EVENT_SCHEMA)),
        ]));

        let err = registry
            .retrieve_schema(&SchemaIdentifier::named("user-event"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            RegistryError::SchemaNotFound { hit_count: 2, .. }
        ));
    }

    #[tokio::test]
    async fn test_malformed_schema_text_is_parse_error() {
        let registry =
            ElasticsearchSchemaRegistry::with_defaults(MockClient::single(&json!("{not avro")));

        let err = registry
            .retrieve_schema(&SchemaIdentifier::named("user-event"))
            .await
            .unwrap_err();

        assert!(matches!(err, RegistryError::SchemaParse(_)));
    }

    #[tokio::test]
    async fn test_missing_text_field() {
        let source = match json!({"name": "user-event", "version": 3}) {
            Value::Object(map) => map,
            _ => unreachable!(),
        };
        let registry = ElasticsearchSchemaRegistry::with_defaults(MockClient::with_hits(vec![
            SearchHit::from_source(source),
        ]));

        let err = registry
            .retrieve_schema(&SchemaIdentifier::named("user-event"))
            .await
            .unwrap_err();

        assert!(matches!(err, RegistryError::MissingSchemaText { .. }));
    }

    #[tokio::test]
    async fn test_non_string_text_field() {
        let registry =
            ElasticsearchSchemaRegistry::with_defaults(MockClient::single(&json!(42)));

        let err = registry
            .retrieve_schema(&SchemaIdentifier::named("user-event"))
            .await
            .unwrap_err();

        assert!(matches!(err, RegistryError::MissingSchemaText { .. }));
    }

    #[tokio::test]
    async fn test_transport_failure_propagates() {
        let registry = ElasticsearchSchemaRegistry::with_defaults(FailingClient);

        let err = registry
            .retrieve_schema(&SchemaIdentifier::named("user-event"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            RegistryError::Transport(ClientError::Connect { .. })
        ));
    }

    #[tokio::test]
    async fn test_non_record_schema_is_conversion_error() {
        let registry =
            ElasticsearchSchemaRegistry::with_defaults(MockClient::single(&json!(r#""string""#)));

        let err = registry
            .retrieve_schema(&SchemaIdentifier::named("user-event"))
            .await
            .unwrap_err();

        assert!(matches!(err, RegistryError::Conversion(_)));
    }

    #[test]
    fn test_supplied_fields() {
        let registry = ElasticsearchSchemaRegistry::with_defaults(FailingClient);

        let fields = registry.supplied_fields();
        assert_eq!(fields.len(), 3);
        assert!(fields.contains(&SchemaField::SchemaName));
        assert!(fields.contains(&SchemaField::SchemaText));
        assert!(fields.contains(&SchemaField::SchemaTextFormat));
    }
}
