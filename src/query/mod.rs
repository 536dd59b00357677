//! Query Translation Module
//!
//! Pure building blocks that turn validated `search_objects` params into a backend query.
//!
//! ## Submodules
//! - **`indexes`**: Resolves logical index names to prefixed backend names.
//! - **`visibility`**: Builds the public/private access-control filter.
//! - **`composer`**: ANDs the caller query with the filter and attaches pagination.
//! - **`types`**: `ResolvedIndexSet` and `ComposedQuery`.

pub mod composer;
pub mod indexes;
pub mod types;
pub mod visibility;
