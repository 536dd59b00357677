//! RPC Error Taxonomy
//!
//! Every failure the gateway can report to a client. Each variant name doubles as the
//! stable machine-readable `code` in the JSON-RPC error envelope, and each maps to exactly
//! one HTTP status.

use axum::http::StatusCode;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RpcError {
    /// The body is not valid JSON, is not an object, or a field has the wrong JSON type.
    #[error("malformed request: {0}")]
    MalformedRequest(String),

    /// A required field is absent. Carries the field name.
    #[error("missing required field '{0}'")]
    MissingField(String),

    #[error("unsupported method '{0}'")]
    UnsupportedMethod(String),

    #[error("invalid index set: {0}")]
    InvalidIndexSet(String),

    #[error("only_public and only_private cannot both be true")]
    ConflictingVisibilityFlags,

    #[error("invalid pagination: {0}")]
    InvalidPagination(String),

    /// Carries the logical (unprefixed) index name.
    #[error("index '{0}' does not exist")]
    BackendIndexNotFound(String),

    /// The backend rejected the composed query. Backend detail is logged, never returned.
    #[error("the search backend rejected the query")]
    BackendQueryError,

    /// Connection failure, backend-side failure or timeout.
    #[error("the search backend is unavailable")]
    BackendUnavailable { timed_out: bool },
}

impl RpcError {
    /// Stable error code exposed in `error.code`.
    pub fn code(&self) -> &'static str {
        match self {
            RpcError::MalformedRequest(_) => "MalformedRequest",
            RpcError::MissingField(_) => "MissingField",
            RpcError::UnsupportedMethod(_) => "UnsupportedMethod",
            RpcError::InvalidIndexSet(_) => "InvalidIndexSet",
            RpcError::ConflictingVisibilityFlags => "ConflictingVisibilityFlags",
            RpcError::InvalidPagination(_) => "InvalidPagination",
            RpcError::BackendIndexNotFound(_) => "BackendIndexNotFound",
            RpcError::BackendQueryError => "BackendQueryError",
            RpcError::BackendUnavailable { .. } => "BackendUnavailable",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            RpcError::BackendIndexNotFound(_) => StatusCode::NOT_FOUND,
            RpcError::BackendUnavailable { timed_out: true } => StatusCode::GATEWAY_TIMEOUT,
            RpcError::BackendUnavailable { timed_out: false } => StatusCode::BAD_GATEWAY,
            RpcError::MalformedRequest(_)
            | RpcError::MissingField(_)
            | RpcError::UnsupportedMethod(_)
            | RpcError::InvalidIndexSet(_)
            | RpcError::ConflictingVisibilityFlags
            | RpcError::InvalidPagination(_)
            | RpcError::BackendQueryError => StatusCode::BAD_REQUEST,
        }
    }

    /// True for failures detected before the backend is contacted.
    pub fn is_validation_error(&self) -> bool {
        !matches!(
            self,
            RpcError::BackendIndexNotFound(_)
                | RpcError::BackendQueryError
                | RpcError::BackendUnavailable { .. }
        )
    }
}
