//! Search criteria and result models.

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::str::FromStr;

use crate::models::Project;

/// Sort index for search results
///
/// Unrecognized names are kept in [`SortIndex::Other`] and sent verbatim;
/// the API may grow new indexes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum SortIndex {
    #[default]
    Relevance,
    Downloads,
    Follows,
    Newest,
    Updated,
    Other(String),
}

impl SortIndex {
    /// Get the wire name of this index
    pub fn as_str(&self) -> &str {
        match self {
            SortIndex::Relevance => "relevance",
            SortIndex::Downloads => "downloads",
            SortIndex::Follows => "follows",
            SortIndex::Newest => "newest",
            SortIndex::Updated => "updated",
            SortIndex::Other(name) => name,
        }
    }
}

impl FromStr for SortIndex {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "relevance" => SortIndex::Relevance,
            "downloads" => SortIndex::Downloads,
            "follows" => SortIndex::Follows,
            "newest" => SortIndex::Newest,
            "updated" => SortIndex::Updated,
            other => SortIndex::Other(other.to_string()),
        })
    }
}

impl std::fmt::Display for SortIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for SortIndex {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SortIndex {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(name.parse().unwrap_or_else(|never: Infallible| match never {}))
    }
}

/// Search criteria.
///
/// The four facet dimensions are independent; each is rendered into its own
/// facet group by [`crate::search::compile_facets`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchCriteria {
    /// Free-text query
    pub query: String,

    /// Category facet values
    #[serde(default)]
    pub categories: Vec<String>,

    /// Game version facet values
    #[serde(default)]
    pub versions: Vec<String>,

    /// Project type facet values (mod, modpack, ...)
    #[serde(default)]
    pub project_types: Vec<String>,

    /// License facet values
    #[serde(default)]
    pub licenses: Vec<String>,

    /// Sort index
    #[serde(default)]
    pub index: SortIndex,

    /// Number of hits to skip
    #[serde(default)]
    pub offset: usize,

    /// Maximum number of hits to return
    #[serde(default = "default_limit")]
    pub limit: usize,

    /// Raw filter expression, passed through verbatim
    #[serde(default)]
    pub filters: String,
}

fn default_limit() -> usize {
    10
}

impl Default for SearchCriteria {
    fn default() -> Self {
        Self {
            query: String::new(),
            categories: Vec::new(),
            versions: Vec::new(),
            project_types: Vec::new(),
            licenses: Vec::new(),
            index: SortIndex::default(),
            offset: 0,
            limit: default_limit(),
            filters: String::new(),
        }
    }
}

impl SearchCriteria {
    /// Create new search criteria
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    /// Add a category facet value
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.categories.push(category.into());
        self
    }

    /// Add a game version facet value
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.versions.push(version.into());
        self
    }

    /// Add a project type facet value
    pub fn project_type(mut self, project_type: impl Into<String>) -> Self {
        self.project_types.push(project_type.into());
        self
    }

    /// Add a license facet value
    pub fn license(mut self, license: impl Into<String>) -> Self {
        self.licenses.push(license.into());
        self
    }

    /// Set the sort index
    pub fn index(mut self, index: SortIndex) -> Self {
        self.index = index;
        self
    }

    /// Set the offset
    pub fn offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    /// Set the limit
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Set the raw filter expression
    pub fn filters(mut self, filters: impl Into<String>) -> Self {
        self.filters = filters.into();
        self
    }
}

/// One unresolved hit of a search response
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SearchHit {
    pub project_id: String,
}

/// Search body as the API returns it
#[derive(Debug, Deserialize)]
pub(crate) struct SearchPayload {
    pub hits: Vec<SearchHit>,
    pub offset: usize,
    pub limit: usize,
    pub total_hits: usize,
}

/// Search result with fully resolved projects in ranking order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    /// Resolved projects, in the order the API ranked them
    pub hits: Vec<Project>,

    /// Offset echoed by the API
    pub offset: usize,

    /// Limit echoed by the API
    pub limit: usize,

    /// Total number of matching projects
    pub total: usize,
}

impl SearchResult {
    /// Number of hits on this page
    pub fn len(&self) -> usize {
        self.hits.len()
    }

    /// Whether this page has no hits
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// Whether the API has hits beyond this page
    pub fn has_more(&self) -> bool {
        self.offset + self.hits.len() < self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_index_round_trip_known() {
        for name in ["relevance", "downloads", "follows", "newest", "updated"] {
            let index: SortIndex = name.parse().unwrap();
            assert!(!matches!(index, SortIndex::Other(_)));
            assert_eq!(index.as_str(), name);
        }
    }

    #[test]
    fn test_sort_index_passes_unknown_through() {
        let index: SortIndex = "trending".parse().unwrap();
        assert_eq!(index, SortIndex::Other("trending".to_string()));
        assert_eq!(index.to_string(), "trending");
    }

    #[test]
    fn test_criteria_builder() {
        let criteria = SearchCriteria::new("sodium")
            .category("optimization")
            .category("utility")
            .version("1.20.1")
            .project_type("mod")
            .license("MIT")
            .index(SortIndex::Downloads)
            .offset(20)
            .limit(5)
            .filters("downloads > 1000");

        assert_eq!(criteria.query, "sodium");
        assert_eq!(criteria.categories, vec!["optimization", "utility"]);
        assert_eq!(criteria.versions, vec!["1.20.1"]);
        assert_eq!(criteria.index, SortIndex::Downloads);
        assert_eq!(criteria.offset, 20);
        assert_eq!(criteria.limit, 5);
        assert_eq!(criteria.filters, "downloads > 1000");
    }

    #[test]
    fn test_criteria_defaults() {
        let criteria = SearchCriteria::new("x");
        assert_eq!(criteria.index, SortIndex::Relevance);
        assert_eq!(criteria.offset, 0);
        assert_eq!(criteria.limit, 10);
        assert!(criteria.filters.is_empty());
    }

    #[test]
    fn test_criteria_deserialize_with_defaults() {
        let criteria: SearchCriteria =
            serde_json::from_str(r#"{"query": "lithium", "index": "follows"}"#).unwrap();
        assert_eq!(criteria.index, SortIndex::Follows);
        assert_eq!(criteria.limit, 10);
    }
}
