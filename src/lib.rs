//! Search Gateway Library
//!
//! A JSON-RPC front for Elasticsearch exposing a single method, `search_objects`, with a
//! mandatory public/private visibility policy applied to every query.
//! The binary (`main.rs`) only wires configuration, logging and the HTTP listener.
//!
//! ## Architecture Modules
//! - **`rpc`**: The JSON-RPC envelope: request parsing, response formatting and the error
//!   taxonomy with its HTTP status mapping.
//! - **`query`**: Pure query translation: index name resolution, the visibility filter
//!   and the AND-composition of caller query and filter.
//! - **`backend`**: The `SearchBackend` seam and its Elasticsearch implementation.
//! - **`search`**: The `search_objects` pipeline and its axum handlers.
//! - **`config`**: Command line / environment configuration.

pub mod backend;
pub mod config;
pub mod query;
pub mod rpc;
pub mod search;
