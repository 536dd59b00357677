//! Fake Elasticsearch server and in-memory backend for tests.
//!
//! `FakeElasticsearch` spins up a minimal axum server on a random port bound to
//! 127.0.0.1 that answers every `POST` with a canned status and body, recording what it
//! was sent. `RecordingBackend` skips HTTP entirely and counts calls.

use super::SearchBackend;
use crate::query::types::ComposedQuery;
use crate::rpc::error::RpcError;
use crate::search::types::{Hit, SearchResult};
use async_trait::async_trait;
use axum::extract::State;
use axum::http::{StatusCode, Uri};
use axum::response::IntoResponse;
use axum::{Json, Router};
use serde_json::{Value, json};
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

/// A canned backend reply.
#[derive(Clone)]
struct Reply {
    status: StatusCode,
    body: Value,
    delay: Duration,
}

#[derive(Default)]
struct FakeState {
    reply: Option<Reply>,
    requests: Vec<(String, Value)>,
}

/// Handle to the running fake server.
pub struct FakeElasticsearch {
    addr: SocketAddr,
    state: Arc<Mutex<FakeState>>,
}

impl FakeElasticsearch {
    pub async fn start() -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let state = Arc::new(Mutex::new(FakeState::default()));

        let app = Router::new()
            .fallback(handle_any)
            .with_state(state.clone());

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Ok(Self { addr, state })
    }

    /// Base URL, e.g. `http://127.0.0.1:PORT`.
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub async fn reply(&self, status: StatusCode, body: Value) {
        self.reply_after(status, body, Duration::ZERO).await;
    }

    pub async fn reply_after(&self, status: StatusCode, body: Value, delay: Duration) {
        let mut state = self.state.lock().await;
        state.reply = Some(Reply { status, body, delay });
    }

    /// Replies with `count` hits out of `total`.
    pub async fn reply_hits(&self, index: &str, count: usize, total: u64) {
        self.reply(StatusCode::OK, es_hits_body(index, count, total)).await;
    }

    /// Every `(path, body)` received so far.
    pub async fn requests(&self) -> Vec<(String, Value)> {
        self.state.lock().await.requests.clone()
    }
}

async fn handle_any(
    State(state): State<Arc<Mutex<FakeState>>>,
    uri: Uri,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    let reply = {
        let mut state = state.lock().await;
        state.requests.push((uri.path().to_string(), body));
        state.reply.clone()
    };

    match reply {
        Some(reply) => {
            if !reply.delay.is_zero() {
                tokio::time::sleep(reply.delay).await;
            }
            (reply.status, Json(reply.body))
        }
        None => (StatusCode::OK, Json(es_hits_body("unset", 0, 0))),
    }
}

/// An Elasticsearch 7 style `_search` response body.
pub fn es_hits_body(index: &str, count: usize, total: u64) -> Value {
    let hits: Vec<Value> = (0..count)
        .map(|i| {
            json!({
                "_index": index,
                "_id": format!("doc-{}", i),
                "_score": 1.0 + i as f64,
                "_source": {"obj_name": format!("object {}", i), "is_public": true}
            })
        })
        .collect();

    json!({
        "took": 3,
        "timed_out": false,
        "hits": {
            "total": {"value": total, "relation": "eq"},
            "max_score": 1.0,
            "hits": hits
        }
    })
}

pub fn es_index_not_found_body(index: &str) -> Value {
    json!({
        "error": {
            "root_cause": [{"type": "index_not_found_exception", "reason": "no such index", "index": index}],
            "type": "index_not_found_exception",
            "reason": format!("no such index [{}]", index),
            "index": index
        },
        "status": 404
    })
}

/// In-memory backend returning a fixed outcome and recording every query.
pub struct RecordingBackend {
    outcome: Result<SearchResult, RpcError>,
    calls: AtomicUsize,
    last_query: std::sync::Mutex<Option<ComposedQuery>>,
}

impl RecordingBackend {
    pub fn returning(outcome: Result<SearchResult, RpcError>) -> Arc<Self> {
        Arc::new(Self {
            outcome,
            calls: AtomicUsize::new(0),
            last_query: std::sync::Mutex::new(None),
        })
    }

    /// Backend answering with `count` hits out of `total`.
    pub fn with_hits(count: usize, total: u64) -> Arc<Self> {
        let hits = (0..count)
            .map(|i| Hit {
                id: format!("doc-{}", i),
                index: "prefix_genome".to_string(),
                score: Some(1.0),
                doc: json!({"n": i}),
                highlight: None,
            })
            .collect();

        Self::returning(Ok(SearchResult {
            hits,
            total,
            search_time: 2,
        }))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_query(&self) -> Option<ComposedQuery> {
        self.last_query.lock().unwrap().clone()
    }
}

#[async_trait]
impl SearchBackend for RecordingBackend {
    async fn search(&self, query: &ComposedQuery) -> Result<SearchResult, RpcError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_query.lock().unwrap() = Some(query.clone());
        self.outcome.clone()
    }
}
