//! Search Backend Module
//!
//! The seam between the gateway and the search engine. The pipeline only sees the
//! [`SearchBackend`] trait; `elasticsearch` provides the HTTP implementation.
//!
//! ## Submodules
//! - **`elasticsearch`**: `reqwest` client for the Elasticsearch `_search` API.
//! - **`protocol`**: Wire shapes of Elasticsearch search and error responses.

pub mod elasticsearch;
pub mod protocol;

use crate::query::types::ComposedQuery;
use crate::rpc::error::RpcError;
use crate::search::types::SearchResult;
use async_trait::async_trait;

/// Executes composed queries. Implementations must not retry and must bound every call
/// with a timeout, failing with `BackendUnavailable` when it expires.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    async fn search(&self, query: &ComposedQuery) -> Result<SearchResult, RpcError>;
}

#[cfg(test)]
pub(crate) mod fake;
