//! Search query types.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Search query envelope.
///
/// This is the body POSTed to the `_search` endpoint. The registry builds
/// one fresh per lookup; nothing here is cached or reused across calls.
///
/// # Semantics
///
/// - **`size`**: If `Some(n)`, ask the store to return at most `n` hits.
///   Truncation happens store-side; clients do not re-sort or re-limit.
/// - **`sort`**: Applied before truncation, so `size: 1` plus a descending
///   sort selects the single best-ranked document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Maximum number of hits the store should return.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<usize>,

    /// Sort clauses, applied in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sort: Vec<SortClause>,

    /// The query clause.
    pub query: QueryClause,
}

impl SearchQuery {
    /// Create a query with no size limit or sort.
    pub fn new(query: QueryClause) -> Self {
        Self {
            size: None,
            sort: Vec::new(),
            query,
        }
    }

    /// Set the maximum number of hits.
    pub fn with_size(mut self, size: usize) -> Self {
        self.size = Some(size);
        self
    }

    /// Append a sort clause.
    pub fn with_sort(mut self, sort: SortClause) -> Self {
        self.sort.push(sort);
        self
    }
}

/// Top-level query clause.
///
/// The variant name is the JSON key, giving the engine's single-key nesting
/// (`{"bool": {...}}`) directly from the tagged representation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryClause {
    /// Boolean compound query.
    Bool(BoolQuery),
}

/// Boolean compound query.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BoolQuery {
    /// Clauses that every hit must satisfy.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub must: Vec<MustClause>,
}

/// A clause usable inside `bool.must`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MustClause {
    /// Full-text / term match on a single field: `{"match": {"field": value}}`.
    Match(BTreeMap<String, Value>),
}

impl MustClause {
    /// Create a match clause on one field.
    pub fn match_field(field: impl Into<String>, value: impl Into<Value>) -> Self {
        let mut fields = BTreeMap::new();
        fields.insert(field.into(), value.into());
        MustClause::Match(fields)
    }
}

/// A single sort clause: `{"field": {"order": "desc"}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SortClause(BTreeMap<String, SortSpec>);

impl SortClause {
    /// Sort on `field` in the given order.
    pub fn new(field: impl Into<String>, order: SortOrder) -> Self {
        let mut map = BTreeMap::new();
        map.insert(field.into(), SortSpec { order });
        Self(map)
    }

    /// Sort on `field` descending.
    pub fn desc(field: impl Into<String>) -> Self {
        Self::new(field, SortOrder::Desc)
    }

    /// Sort on `field` ascending.
    pub fn asc(field: impl Into<String>) -> Self {
        Self::new(field, SortOrder::Asc)
    }
}

/// Per-field sort options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SortSpec {
    /// Sort direction.
    pub order: SortOrder,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Ascending.
    Asc,
    /// Descending.
    Desc,
}
