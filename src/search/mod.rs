//! Search Service Module
//!
//! The `search_objects` pipeline and its HTTP surface.
//!
//! ## Overview
//! A request flows through parse → resolve indexes → build visibility filter → compose →
//! backend → format. Each step is fail-fast; nothing is carried over between requests.
//!
//! ## Submodules
//! - **`engine`**: `SearchService`, which runs the pipeline for parsed params.
//! - **`handlers`**: Axum router and request handlers.
//! - **`types`**: Search params, hits and results.

pub mod engine;
pub mod handlers;
pub mod types;
