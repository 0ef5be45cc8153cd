//! Search response types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Search response envelope.
///
/// Returned by the `_search` endpoint. The registry only consults
/// `hits.hits`; the surrounding metadata is kept for diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Time the store spent on the query, in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub took: Option<u64>,

    /// Whether the store truncated the search due to its own timeout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timed_out: Option<bool>,

    /// The hits envelope.
    pub hits: HitsEnvelope,
}

impl SearchResponse {
    /// Create a response wrapping the given hits.
    pub fn with_hits(hits: Vec<SearchHit>) -> Self {
        Self {
            took: None,
            timed_out: None,
            hits: HitsEnvelope {
                total: Some(TotalHits::Count(hits.len() as u64)),
                max_score: None,
                hits,
            },
        }
    }

    /// The matched documents, in store ranking order.
    pub fn hits(&self) -> &[SearchHit] {
        &self.hits.hits
    }

    /// Number of hits actually returned (after store-side truncation).
    pub fn hit_count(&self) -> usize {
        self.hits.hits.len()
    }
}

/// The `hits` object of a search response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HitsEnvelope {
    /// Total number of matching documents, before truncation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<TotalHits>,

    /// Highest relevance score among the hits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_score: Option<f64>,

    /// The returned documents, in descending rank order.
    #[serde(default)]
    pub hits: Vec<SearchHit>,
}

/// Total hit count.
///
/// Older stores report a bare number; newer ones report
/// `{"value": n, "relation": "eq"}`. Both forms are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TotalHits {
    /// Bare count.
    Count(u64),
    /// Count with a relation qualifier.
    Detailed {
        /// The count.
        value: u64,
        /// How `value` relates to the true total (`"eq"` or `"gte"`).
        #[serde(default, skip_serializing_if = "Option::is_none")]
        relation: Option<String>,
    },
}

impl TotalHits {
    /// The reported count, whichever form it arrived in.
    pub fn value(&self) -> u64 {
        match self {
            TotalHits::Count(n) => *n,
            TotalHits::Detailed { value, .. } => *value,
        }
    }
}

/// A single matched document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    /// Index the document came from.
    #[serde(rename = "_index", default, skip_serializing_if = "Option::is_none")]
    pub index: Option<String>,

    /// Document id.
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Relevance score. Absent when the query sorts on a field instead.
    #[serde(rename = "_score", default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,

    /// The stored document body.
    #[serde(rename = "_source", default)]
    pub source: Map<String, Value>,
}

impl SearchHit {
    /// Create a hit with only a source body, as test fixtures need.
    pub fn from_source(source: Map<String, Value>) -> Self {
        Self {
            index: None,
            id: None,
            score: None,
            source,
        }
    }

    /// A string field of the source document, if present and a string.
    pub fn source_str(&self, field: &str) -> Option<&str> {
        self.source.get(field).and_then(Value::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn source(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_response_deserialization() {
        let body = r#"{
            "took": 4,
            "timed_out": false,
            "hits": {
                "total": {"value": 1, "relation": "eq"},
                "max_score": null,
                "hits": [
                    {
                        "_index": "avro_schemas",
                        "_id": "user-event-3",
                        "_score": null,
                        "_source": {"name": "user-event", "version": 3, "text": "{}"}
                    }
                ]
            }
        }"#;

        let response: SearchResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.took, Some(4));
        assert_eq!(response.hit_count(), 1);

        let hit = &response.hits()[0];
        assert_eq!(hit.index.as_deref(), Some("avro_schemas"));
        assert_eq!(hit.source_str("name"), Some("user-event"));
        assert_eq!(hit.source_str("text"), Some("{}"));
    }

    #[test]
    fn test_numeric_total_accepted() {
        let body = r#"{"hits": {"total": 2, "hits": []}}"#;

        let response: SearchResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.hits.total.as_ref().map(TotalHits::value), Some(2));
        assert_eq!(response.hit_count(), 0);
    }

    #[test]
    fn test_missing_hits_array_defaults_empty() {
        let body = r#"{"hits": {}}"#;

        let response: SearchResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.hit_count(), 0);
    }

    #[test]
    fn test_source_str_rejects_non_strings() {
        let hit = SearchHit::from_source(source(json!({"text": 42, "name": "a"})));
        assert_eq!(hit.source_str("text"), None);
        assert_eq!(hit.source_str("name"), Some("a"));
        assert_eq!(hit.source_str("missing"), None);
    }

    #[test]
    fn test_with_hits_counts() {
        let response = SearchResponse::with_hits(vec![
            SearchHit::from_source(source(json!({"name": "a"}))),
            SearchHit::from_source(source(json!({"name": "b"}))),
        ]);

        assert_eq!(response.hit_count(), 2);
        assert_eq!(response.hits.total.as_ref().map(TotalHits::value), Some(2));
    }
}
