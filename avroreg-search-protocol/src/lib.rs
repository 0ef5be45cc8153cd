//! Search wire types for the avroreg schema registry.
//!
//! This crate defines the subset of the Elasticsearch search API that the
//! registry speaks: the query envelope sent to `_search` and the response
//! envelope that comes back. These types are used by:
//!
//! - The search client (HTTP transport)
//! - The registry service (query construction, hit extraction)
//! - Tests that assert the exact wire shape
//!
//! # Wire fidelity
//!
//! Field names and nesting serialize exactly as the search engine expects.
//! A schema lookup for the latest `user-event` schema serializes as:
//!
//! ```json
//! {
//!   "size": 1,
//!   "sort": [{"version": {"order": "desc"}}],
//!   "query": {"bool": {"must": [{"match": {"name": "user-event"}}]}}
//! }
//! ```
//!
//! # Example
//!
//! ```rust
//! use avroreg_search_protocol::{BoolQuery, MustClause, QueryClause, SearchQuery, SortClause};
//!
//! let query = SearchQuery::new(QueryClause::Bool(BoolQuery {
//!     must: vec![MustClause::match_field("name", "user-event")],
//! }))
//! .with_size(1)
//! .with_sort(SortClause::desc("version"));
//!
//! let json = serde_json::to_string(&query).unwrap();
//! assert!(json.starts_with(r#"{"size":1"#));
//! ```

mod query;
mod response;

pub use query::{BoolQuery, MustClause, QueryClause, SearchQuery, SortClause, SortOrder, SortSpec};
pub use response::{HitsEnvelope, SearchHit, SearchResponse, TotalHits};
