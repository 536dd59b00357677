//! Visibility Filter Builder
//!
//! The single place where public/private access filtering is decided. Every query path
//! goes through [`visibility_filter`] before it reaches the composer.

use crate::rpc::error::RpcError;
use serde_json::{Value, json};

/// Document field holding the public flag.
pub const PUBLIC_FIELD: &str = "is_public";

/// Builds the access-control fragment for the given flags.
///
/// Returns `Ok(None)` when neither flag is set (public and private documents are both
/// eligible), and `ConflictingVisibilityFlags` when both are.
pub fn visibility_filter(only_public: bool, only_private: bool) -> Result<Option<Value>, RpcError> {
    match (only_public, only_private) {
        (true, true) => Err(RpcError::ConflictingVisibilityFlags),
        (true, false) => Ok(Some(is_public_term(true))),
        (false, true) => Ok(Some(is_public_term(false))),
        (false, false) => Ok(None),
    }
}

fn is_public_term(public: bool) -> Value {
    json!({ "term": { PUBLIC_FIELD: public } })
}
