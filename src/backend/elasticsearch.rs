//! Elasticsearch Search Client
//!
//! Sends a [`ComposedQuery`] to `POST {url}/{idx1,idx2}/_search` and classifies every
//! failure into the gateway's error kinds. Backend error detail stays in the logs.

use super::SearchBackend;
use super::protocol::{
    ENDPOINT_SEARCH, EsErrorDetail, EsErrorResponse, EsSearchResponse, INDEX_NOT_FOUND,
};
use crate::config::BackendConfig;
use crate::query::types::ComposedQuery;
use crate::rpc::error::RpcError;
use crate::search::types::SearchResult;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::{Map, Value};

pub struct ElasticsearchClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl ElasticsearchClient {
    /// Builds a pooled client with the configured request and connect timeouts.
    pub fn new(config: &BackendConfig) -> Result<Self, reqwest::Error> {
        let http_client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;

        Ok(Self {
            http_client,
            base_url: config.url.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn search_url(&self, query: &ComposedQuery) -> String {
        format!(
            "{}/{}{}",
            self.base_url,
            query.indexes.to_path_segment(),
            ENDPOINT_SEARCH
        )
    }
}

/// Request body for the `_search` API.
pub fn search_body(query: &ComposedQuery) -> Value {
    let mut body = Map::new();
    body.insert("query".to_string(), query.query.clone());
    body.insert("from".to_string(), Value::from(query.from));
    if let Some(size) = query.size {
        body.insert("size".to_string(), Value::from(size));
    }
    if let Some(sort) = &query.sort {
        body.insert("sort".to_string(), sort.clone());
    }
    if let Some(highlight) = &query.highlight {
        body.insert("highlight".to_string(), highlight.clone());
    }
    body.insert("track_total_hits".to_string(), Value::Bool(true));
    Value::Object(body)
}

#[async_trait]
impl SearchBackend for ElasticsearchClient {
    async fn search(&self, query: &ComposedQuery) -> Result<SearchResult, RpcError> {
        let url = self.search_url(query);
        tracing::debug!("Querying {} (from={}, size={:?})", url, query.from, query.size);

        let response = self
            .http_client
            .post(&url)
            .json(&search_body(query))
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if status.is_success() {
            let parsed = response.json::<EsSearchResponse>().await.map_err(|e| {
                if e.is_timeout() {
                    transport_error(e)
                } else {
                    tracing::error!("Unreadable search response from {}: {}", url, e);
                    RpcError::BackendUnavailable { timed_out: false }
                }
            })?;
            return Ok(parsed.into());
        }

        let body = response.text().await.unwrap_or_default();
        Err(classify_failure(status, &body, query))
    }
}

fn transport_error(e: reqwest::Error) -> RpcError {
    if e.is_timeout() {
        tracing::warn!("Search backend timed out: {}", e);
        RpcError::BackendUnavailable { timed_out: true }
    } else {
        tracing::warn!("Search backend unreachable: {}", e);
        RpcError::BackendUnavailable { timed_out: false }
    }
}

/// Maps a non-2xx backend response onto an error kind.
pub fn classify_failure(status: StatusCode, body: &str, query: &ComposedQuery) -> RpcError {
    let detail = serde_json::from_str::<EsErrorResponse>(body).ok().map(|e| e.error);

    if status == StatusCode::NOT_FOUND {
        if let Some(EsErrorDetail::Structured { kind, index, .. }) = &detail {
            if kind == INDEX_NOT_FOUND {
                let index = index
                    .clone()
                    .unwrap_or_else(|| query.indexes.to_path_segment());
                tracing::info!("Index not found: {}", index);
                return RpcError::BackendIndexNotFound(index);
            }
        }
    }

    let reason = match &detail {
        Some(EsErrorDetail::Structured { kind, reason, .. }) => {
            format!("{}: {}", kind, reason.as_deref().unwrap_or(""))
        }
        Some(EsErrorDetail::Text(text)) => text.clone(),
        None => body.chars().take(200).collect(),
    };

    if status.is_client_error() && status != StatusCode::TOO_MANY_REQUESTS {
        tracing::warn!("Search backend rejected query ({}): {}", status, reason);
        RpcError::BackendQueryError
    } else {
        tracing::error!("Search backend failed ({}): {}", status, reason);
        RpcError::BackendUnavailable { timed_out: false }
    }
}
