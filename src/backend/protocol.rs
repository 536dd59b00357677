//! Elasticsearch Wire Protocol
//!
//! Response DTOs for `POST /{indexes}/_search`, covering only the fields the gateway reads.

use crate::search::types::{Hit, SearchResult};
use serde::Deserialize;
use serde_json::Value;

/// Path suffix of the search API.
pub const ENDPOINT_SEARCH: &str = "/_search";

/// Error type Elasticsearch reports for a missing index.
pub const INDEX_NOT_FOUND: &str = "index_not_found_exception";

#[derive(Debug, Deserialize)]
pub struct EsSearchResponse {
    /// Execution time in milliseconds.
    #[serde(default)]
    pub took: u64,
    pub hits: EsHits,
}

#[derive(Debug, Deserialize)]
pub struct EsHits {
    pub total: Option<EsTotal>,
    #[serde(default)]
    pub hits: Vec<EsHit>,
}

/// `hits.total` is a bare number before Elasticsearch 7 and an object from 7 on.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum EsTotal {
    Count(u64),
    Object { value: u64 },
}

#[derive(Debug, Deserialize)]
pub struct EsHit {
    #[serde(rename = "_index")]
    pub index: String,
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_score")]
    pub score: Option<f64>,
    #[serde(rename = "_source", default)]
    pub source: Value,
    pub highlight: Option<Value>,
}

/// Body of a non-2xx response.
#[derive(Debug, Deserialize)]
pub struct EsErrorResponse {
    pub error: EsErrorDetail,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum EsErrorDetail {
    Structured {
        #[serde(rename = "type")]
        kind: String,
        #[serde(default)]
        reason: Option<String>,
        #[serde(default)]
        index: Option<String>,
    },
    Text(String),
}

impl From<EsSearchResponse> for SearchResult {
    fn from(response: EsSearchResponse) -> Self {
        let hits: Vec<Hit> = response
            .hits
            .hits
            .into_iter()
            .map(|hit| Hit {
                id: hit.id,
                index: hit.index,
                score: hit.score,
                doc: hit.source,
                highlight: hit.highlight,
            })
            .collect();

        let total = match response.hits.total {
            Some(EsTotal::Count(total)) | Some(EsTotal::Object { value: total }) => total,
            None => hits.len() as u64,
        };

        SearchResult {
            hits,
            total,
            search_time: response.took,
        }
    }
}
