use serde::{Deserialize, Serialize};

use crate::models::domain::PageCursor;

/// Options for raw paged listings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageOptions {
    /// Records per page. Omitted means the API default.
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub offset: Option<PageCursor>,
    /// Property names to include on each record.
    #[serde(default)]
    pub properties: Vec<String>,
}

/// Options for the recently created/modified listings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecentOptions {
    #[serde(default)]
    pub count: Option<u32>,
    #[serde(default)]
    pub offset: Option<PageCursor>,
    /// Only records created or modified after this instant.
    #[serde(default)]
    pub since: Option<chrono::DateTime<chrono::Utc>>,
}

/// Options for scored property search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyMatchOptions {
    /// Maximum results returned.
    #[serde(default = "default_match_limit")]
    pub limit: usize,
    /// Extra properties to fetch on the matched records, on top of the
    /// criteria properties.
    #[serde(default, rename = "returnProperties")]
    pub return_properties: Vec<String>,
    /// Allow the search to fetch beyond the first page. When false only
    /// the first page is ever scored.
    #[serde(default = "default_true")]
    pub recursive: bool,
    /// Score every page the walk reaches before ranking, instead of
    /// stopping at the first page with matches.
    #[serde(default)]
    pub exhaustive: bool,
    /// Hard bound on pages fetched in one search.
    #[serde(default = "default_max_pages", rename = "maxPages")]
    pub max_pages: usize,
}

impl Default for PropertyMatchOptions {
    fn default() -> Self {
        Self {
            limit: default_match_limit(),
            return_properties: Vec::new(),
            recursive: default_true(),
            exhaustive: false,
            max_pages: default_max_pages(),
        }
    }
}

/// Options for fuzzy name search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FuzzySearchOptions {
    /// Maximum results returned.
    #[serde(default = "default_match_limit")]
    pub limit: usize,
    /// Properties compared against the query. Empty means the resource
    /// default (for companies: name and website).
    #[serde(default, rename = "searchProperties")]
    pub search_properties: Vec<String>,
    /// Extra properties to fetch on the matched records.
    #[serde(default, rename = "returnProperties")]
    pub return_properties: Vec<String>,
    /// Minimum similarity (0.0 to 1.0) for a record to rank.
    #[serde(default = "default_similarity_threshold")]
    pub threshold: f64,
    /// Hard bound on pages fetched in one search.
    #[serde(default = "default_max_pages", rename = "maxPages")]
    pub max_pages: usize,
}

impl Default for FuzzySearchOptions {
    fn default() -> Self {
        Self {
            limit: default_match_limit(),
            search_properties: Vec::new(),
            return_properties: Vec::new(),
            threshold: default_similarity_threshold(),
            max_pages: default_max_pages(),
        }
    }
}

fn default_match_limit() -> usize {
    5
}

fn default_true() -> bool {
    true
}

fn default_max_pages() -> usize {
    100
}

fn default_similarity_threshold() -> f64 {
    0.70
}
