//! Query Composer
//!
//! Combines the caller query with the visibility filter. The combination is structural:
//! the caller query always sits inside `bool.must` and the filter inside `bool.filter`,
//! so nothing in the caller query can replace or drop the filter.

use super::types::{ComposedQuery, ResolvedIndexSet};
use crate::rpc::error::RpcError;
use crate::search::types::SearchParams;
use serde_json::{Map, Value, json};

pub fn compose_query(
    params: &SearchParams,
    indexes: ResolvedIndexSet,
    visibility: Option<Value>,
) -> Result<ComposedQuery, RpcError> {
    let size = match params.size {
        Some(size) => Some(non_negative("size", size)?),
        None => None,
    };
    let from = non_negative("from", params.from)?;

    let highlight = if params.post_processing.normalized().include_highlight {
        Some(
            params
                .highlight
                .clone()
                .unwrap_or_else(|| json!({ "fields": { "*": {} } })),
        )
    } else {
        None
    };

    Ok(ComposedQuery {
        indexes,
        query: and_clause(&params.query, visibility),
        size,
        from,
        sort: params.sort.clone(),
        highlight,
    })
}

/// `caller AND visibility` as a backend `bool` query.
pub fn and_clause(caller: &Value, visibility: Option<Value>) -> Value {
    let must = match caller {
        Value::Object(clause) if clause.is_empty() => json!({ "match_all": {} }),
        clause => clause.clone(),
    };

    let mut bool_query = Map::new();
    bool_query.insert("must".to_string(), Value::Array(vec![must]));
    if let Some(filter) = visibility {
        bool_query.insert("filter".to_string(), Value::Array(vec![filter]));
    }

    json!({ "bool": bool_query })
}

fn non_negative(name: &str, value: i64) -> Result<u64, RpcError> {
    u64::try_from(value).map_err(|_| {
        RpcError::InvalidPagination(format!("'{}' must not be negative, got {}", name, value))
    })
}
