use super::engine::SearchService;
use crate::rpc::envelope::parse_search_params;
use crate::rpc::error::RpcError;
use crate::rpc::response::{RpcResponse, format_error, format_response};
use axum::body::Bytes;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::Instrument;

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub state: String,
    pub version: String,
}

/// Routes: JSON-RPC over `POST` on any path, liveness on `GET /status`.
pub fn router(service: Arc<SearchService>) -> Router {
    Router::new()
        .route("/", post(handle_rpc))
        .route("/status", get(handle_status).post(handle_rpc))
        .route("/*path", post(handle_rpc))
        .layer(Extension(service))
        .layer(TraceLayer::new_for_http())
}

/// Parses the envelope, runs the search and formats the outcome.
///
/// If the client disconnects, hyper drops this future and the in-flight backend request
/// with it; nothing partial is ever returned.
pub async fn handle_rpc(
    Extension(service): Extension<Arc<SearchService>>,
    body: Bytes,
) -> (StatusCode, Json<RpcResponse>) {
    let request_id = uuid::Uuid::new_v4();
    let span = tracing::info_span!("rpc", %request_id);

    async move {
        let parsed = parse_search_params(&body);
        let id = parsed.id;
        let params = match parsed.params {
            Ok(params) => params,
            Err(e) => return reject(id, e),
        };

        let outcome = service.search_objects(&params).await;
        match &outcome {
            Ok(result) => tracing::info!(
                "search_objects ok: {} hits, total {}",
                result.hits.len(),
                result.total
            ),
            Err(e) if e.is_validation_error() => {
                tracing::info!("search_objects rejected: {} ({})", e, e.code())
            }
            Err(e) => tracing::warn!("search_objects failed: {} ({})", e, e.code()),
        }

        format_response(id, outcome)
    }
    .instrument(span)
    .await
}

pub async fn handle_status() -> Json<StatusResponse> {
    Json(StatusResponse {
        state: "OK".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

fn reject(id: Option<Value>, error: RpcError) -> (StatusCode, Json<RpcResponse>) {
    tracing::info!("Rejected request: {} ({})", error, error.code());
    format_error(id, &error)
}
