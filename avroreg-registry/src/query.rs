//! Schema lookup query construction.

use avroreg_core::SchemaIdentifier;
use avroreg_search_protocol::{BoolQuery, MustClause, QueryClause, SearchQuery, SortClause};

/// Build the search query for a schema identifier.
///
/// The query asks for the single highest-version match: `size: 1` with a
/// descending sort on `version`, so store-side truncation selects the
/// latest. A pinned version adds an exact-match clause.
pub fn schema_query(identifier: &SchemaIdentifier) -> SearchQuery {
    let mut must = vec![MustClause::match_field("name", identifier.name.as_str())];
    if let Some(version) = identifier.version {
        must.push(MustClause::match_field("version", version));
    }

    SearchQuery::new(QueryClause::Bool(BoolQuery { must }))
        .with_size(1)
        .with_sort(SortClause::desc("version"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_version_query() {
        let query = schema_query(&SchemaIdentifier::named("user-event"));

        let json = serde_json::to_string(&query).unwrap();
        assert_eq!(
            json,
            r#"{"size":1,"sort":[{"version":{"order":"desc"}}],"query":{"bool":{"must":[{"match":{"name":"user-event"}}]}}}"#
        );
    }

    #[test]
    fn test_pinned_version_query() {
        let query = schema_query(&SchemaIdentifier::versioned("user-event", 3));

        let json = serde_json::to_string(&query).unwrap();
        assert_eq!(
            json,
            r#"{"size":1,"sort":[{"version":{"order":"desc"}}],"query":{"bool":{"must":[{"match":{"name":"user-event"}},{"match":{"version":3}}]}}}"#
        );
    }

    #[test]
    fn test_query_is_rebuilt_per_identifier() {
        let a = schema_query(&SchemaIdentifier::named("a"));
        let b = schema_query(&SchemaIdentifier::named("b"));
        assert_ne!(a, b);
    }
}
