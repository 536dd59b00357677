//! JSON-RPC Envelope Module
//!
//! Everything about the wire envelope of `search_objects`, independent of how a search is
//! executed.
//!
//! ## Submodules
//! - **`envelope`**: Parses the raw HTTP body into validated search params.
//! - **`response`**: Builds the `result` / `error` response envelope and its HTTP status.
//! - **`error`**: The error taxonomy shared by the whole pipeline.

pub mod envelope;
pub mod error;
pub mod response;
