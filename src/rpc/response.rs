//! Response Formatter
//!
//! Wraps a search result or an error into the JSON-RPC response envelope. Exactly one of
//! `result` / `error` is serialized, and the HTTP status always agrees with it: 200 for a
//! result, the error's own status otherwise.

use super::error::RpcError;
use crate::search::types::SearchObjectsResult;
use axum::Json;
use axum::http::StatusCode;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Serialize)]
pub struct RpcResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(flatten)]
    pub outcome: RpcOutcome,
}

/// Serializes as `{"result": ...}` or `{"error": ...}`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RpcOutcome {
    Result(SearchObjectsResult),
    Error(RpcErrorBody),
}

#[derive(Debug, Serialize)]
pub struct RpcErrorBody {
    pub code: &'static str,
    pub message: String,
}

pub fn format_success(
    id: Option<Value>,
    result: SearchObjectsResult,
) -> (StatusCode, Json<RpcResponse>) {
    (
        StatusCode::OK,
        Json(RpcResponse {
            id,
            outcome: RpcOutcome::Result(result),
        }),
    )
}

pub fn format_error(id: Option<Value>, error: &RpcError) -> (StatusCode, Json<RpcResponse>) {
    (
        error.status(),
        Json(RpcResponse {
            id,
            outcome: RpcOutcome::Error(RpcErrorBody {
                code: error.code(),
                message: error.to_string(),
            }),
        }),
    )
}

/// Formats whichever side of the pipeline outcome is present.
pub fn format_response(
    id: Option<Value>,
    outcome: Result<SearchObjectsResult, RpcError>,
) -> (StatusCode, Json<RpcResponse>) {
    match outcome {
        Ok(result) => format_success(id, result),
        Err(error) => format_error(id, &error),
    }
}
