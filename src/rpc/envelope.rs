//! Request Envelope Parser
//!
//! Turns a raw HTTP body into a validated [`SearchParams`] plus the caller's id.
//! Pure: no I/O, no logging.
//! The checks run in a fixed order so the first problem found is the one reported:
//! body shape, presence of `method`/`params`, the method name, then each parameter.

use super::error::RpcError;
use crate::search::types::{METHOD_SEARCH_OBJECTS, PostProcessing, SearchParams};
use serde_json::{Map, Value};

/// Outcome of parsing one request body.
///
/// The id is kept apart from the params so that a request rejected after its id was read
/// still gets the id echoed on the error response.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRequest {
    /// Caller-chosen correlation id. `None` when absent, null, or the body is unreadable.
    pub id: Option<Value>,
    pub params: Result<SearchParams, RpcError>,
}

/// Parses and validates a whole `search_objects` body.
pub fn parse_search_params(body: &[u8]) -> ParsedRequest {
    let mut object = match decode_body(body) {
        Ok(object) => object,
        Err(e) => {
            return ParsedRequest {
                id: None,
                params: Err(e),
            };
        }
    };

    let id = object.remove("id").filter(|id| !id.is_null());
    let params = check_envelope(object).and_then(|params| search_params(&params));
    ParsedRequest { id, params }
}

/// Decodes the body into a JSON object.
fn decode_body(body: &[u8]) -> Result<Map<String, Value>, RpcError> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| RpcError::MalformedRequest(format!("body is not valid JSON: {}", e)))?;

    match value {
        Value::Object(object) => Ok(object),
        other => Err(RpcError::MalformedRequest(format!(
            "body must be a JSON object, got {}",
            json_type(&other)
        ))),
    }
}

/// Checks `method` and `params` and hands back the params object.
fn check_envelope(mut object: Map<String, Value>) -> Result<Map<String, Value>, RpcError> {
    let method = object
        .remove("method")
        .ok_or_else(|| RpcError::MissingField("method".to_string()))?;
    let params = object
        .remove("params")
        .ok_or_else(|| RpcError::MissingField("params".to_string()))?;

    let method = match method {
        Value::String(method) => method,
        other => {
            return Err(RpcError::MalformedRequest(format!(
                "'method' must be a string, got {}",
                json_type(&other)
            )));
        }
    };

    if method != METHOD_SEARCH_OBJECTS {
        return Err(RpcError::UnsupportedMethod(method));
    }

    match params {
        Value::Object(params) => Ok(params),
        other => Err(RpcError::MalformedRequest(format!(
            "'params' must be an object, got {}",
            json_type(&other)
        ))),
    }
}

/// Extracts `search_objects` parameters, applying defaults for omitted optional fields.
fn search_params(params: &Map<String, Value>) -> Result<SearchParams, RpcError> {
    let query = match field(params, "query") {
        Some(Value::Object(query)) => Value::Object(query.clone()),
        Some(other) => return Err(wrong_type("query", "an object", other)),
        None => return Err(RpcError::MissingField("query".to_string())),
    };

    let indexes = match field(params, "indexes") {
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::String(name) => Ok(name.clone()),
                other => Err(RpcError::InvalidIndexSet(format!(
                    "index names must be strings, got {}",
                    json_type(other)
                ))),
            })
            .collect::<Result<Vec<_>, _>>()?,
        Some(other) => {
            return Err(RpcError::InvalidIndexSet(format!(
                "'indexes' must be an array of strings, got {}",
                json_type(other)
            )));
        }
        None => return Err(RpcError::MissingField("indexes".to_string())),
    };

    let sort = match field(params, "sort") {
        Some(sort @ (Value::Array(_) | Value::Object(_))) => Some(sort.clone()),
        Some(other) => return Err(wrong_type("sort", "an array or object", other)),
        None => None,
    };

    let highlight = match field(params, "highlight") {
        Some(highlight @ Value::Object(_)) => Some(highlight.clone()),
        Some(other) => return Err(wrong_type("highlight", "an object", other)),
        None => None,
    };

    let post_processing = post_processing(params, highlight.is_some())?;

    Ok(SearchParams {
        query,
        indexes,
        only_public: optional_bool(params, "only_public")?.unwrap_or(false),
        only_private: optional_bool(params, "only_private")?.unwrap_or(false),
        size: optional_int(params, "size")?,
        from: optional_int(params, "from")?.unwrap_or(0),
        sort,
        highlight,
        post_processing,
    })
}

/// Reads `post_processing`. Unknown keys are ignored.
fn post_processing(
    params: &Map<String, Value>,
    has_highlight: bool,
) -> Result<PostProcessing, RpcError> {
    let options = match field(params, "post_processing") {
        Some(Value::Object(options)) => options,
        Some(other) => return Err(wrong_type("post_processing", "an object", other)),
        None => {
            return Ok(PostProcessing {
                include_highlight: has_highlight,
                ..PostProcessing::default()
            });
        }
    };

    let flag = |name: &str| -> Result<Option<bool>, RpcError> {
        match field(options, name) {
            Some(Value::Bool(flag)) => Ok(Some(*flag)),
            Some(value) => match value.as_u64() {
                Some(0) => Ok(Some(false)),
                Some(1) => Ok(Some(true)),
                _ => Err(wrong_type(
                    &format!("post_processing.{}", name),
                    "a boolean or 0/1",
                    value,
                )),
            },
            None => Ok(None),
        }
    };

    let post = PostProcessing {
        ids_only: flag("ids_only")?.unwrap_or(false),
        skip_data: flag("skip_data")?.unwrap_or(false),
        include_highlight: flag("include_highlight")?.unwrap_or(has_highlight),
    };
    Ok(post.normalized())
}

/// Looks up a field, treating an explicit `null` as absent.
fn field<'a>(params: &'a Map<String, Value>, name: &str) -> Option<&'a Value> {
    params.get(name).filter(|value| !value.is_null())
}

fn optional_bool(params: &Map<String, Value>, name: &str) -> Result<Option<bool>, RpcError> {
    match field(params, name) {
        Some(Value::Bool(flag)) => Ok(Some(*flag)),
        Some(other) => Err(wrong_type(name, "a boolean", other)),
        None => Ok(None),
    }
}

fn optional_int(params: &Map<String, Value>, name: &str) -> Result<Option<i64>, RpcError> {
    match field(params, name) {
        Some(value) => value
            .as_i64()
            .map(Some)
            .ok_or_else(|| wrong_type(name, "an integer", value)),
        None => Ok(None),
    }
}

fn wrong_type(name: &str, expected: &str, got: &Value) -> RpcError {
    RpcError::MalformedRequest(format!(
        "'{}' must be {}, got {}",
        name,
        expected,
        json_type(got)
    ))
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
