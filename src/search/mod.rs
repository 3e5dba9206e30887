//! Project search.
//!
//! A search runs in two steps:
//!
//! 1. One request to `/v2/search` with the query, the compiled facets (see
//!    [`compile_facets`]), sort index, paging and raw filters.
//! 2. One request per hit to resolve it into a full [`Project`]. Hits are
//!    resolved concurrently, bounded by the client's concurrency setting,
//!    and kept in the order the API ranked them. Any failed resolution
//!    fails the whole search.

mod facets;

pub use facets::compile_facets;

use futures_util::stream::{self, StreamExt, TryStreamExt};

use crate::client::ModrinthClient;
use crate::error::Result;
use crate::gateway::QueryPairs;
use crate::models::{Project, SearchCriteria, SearchPayload, SearchResult};

/// Search endpoint path
pub const SEARCH_PATH: &str = "/v2/search";

/// Build the query parameters for a search request.
///
/// `facets` is left out when no facet dimension has values, and `filters`
/// when the raw filter expression is empty. Values are raw; the gateway
/// encodes them.
pub fn build_query(criteria: &SearchCriteria) -> QueryPairs {
    let mut query = vec![("query".to_string(), criteria.query.clone())];

    let facets = compile_facets(criteria);
    if !facets.is_empty() {
        query.push(("facets".to_string(), facets));
    }

    query.push(("index".to_string(), criteria.index.to_string()));
    query.push(("offset".to_string(), criteria.offset.to_string()));
    query.push(("limit".to_string(), criteria.limit.to_string()));

    if !criteria.filters.is_empty() {
        query.push(("filters".to_string(), criteria.filters.clone()));
    }

    query
}

impl ModrinthClient {
    /// Search projects and resolve every hit
    pub async fn search(&self, criteria: &SearchCriteria) -> Result<SearchResult> {
        let query = build_query(criteria);
        tracing::debug!(query = %criteria.query, index = %criteria.index, "searching projects");

        let body = self.gateway.get_json(SEARCH_PATH, &query).await?;
        let payload: SearchPayload = serde_json::from_value(body)?;

        tracing::debug!(
            hits = payload.hits.len(),
            total = payload.total_hits,
            "resolving search hits"
        );

        let client = self;
        let hits: Vec<Project> = stream::iter(payload.hits)
            .map(move |hit| async move { client.resolve_project(&hit.project_id).await })
            .buffered(self.max_concurrent)
            .try_collect()
            .await?;

        Ok(SearchResult {
            hits,
            offset: payload.offset,
            limit: payload.limit,
            total: payload.total_hits,
        })
    }
}
