use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The only method this gateway answers.
pub const METHOD_SEARCH_OBJECTS: &str = "search_objects";

/// Validated `params` of a `search_objects` call, with defaults applied.
///
/// `size` and `from` stay signed here: range checks belong to the query composer,
/// which rejects negative values before anything is sent to the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchParams {
    /// Caller-controlled backend query. Always a JSON object.
    pub query: Value,
    /// Logical index names as supplied by the caller.
    pub indexes: Vec<String>,
    pub only_public: bool,
    pub only_private: bool,
    /// `None` leaves the page size to the backend.
    pub size: Option<i64>,
    pub from: i64,
    pub sort: Option<Value>,
    pub highlight: Option<Value>,
    pub post_processing: PostProcessing,
}

/// Result shaping options from `params.post_processing`.
///
/// Flags accept booleans or the integers `0`/`1`. `ids_only` implies `skip_data` and
/// turns `include_highlight` off.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PostProcessing {
    pub ids_only: bool,
    /// Drop the stored document from every hit.
    pub skip_data: bool,
    /// Return backend highlights. Defaults to true when a `highlight` clause was sent.
    pub include_highlight: bool,
}

impl PostProcessing {
    /// Applies the `ids_only` shortcut.
    pub fn normalized(self) -> Self {
        if self.ids_only {
            Self {
                ids_only: true,
                skip_data: true,
                include_highlight: false,
            }
        } else {
            self
        }
    }
}

impl SearchParams {
    /// Params with only the required fields set.
    pub fn new(query: Value, indexes: Vec<String>) -> Self {
        Self {
            query,
            indexes,
            only_public: false,
            only_private: false,
            size: None,
            from: 0,
            sort: None,
            highlight: None,
            post_processing: PostProcessing::default(),
        }
    }
}

/// A single matching document as returned by the backend. Never sent to clients as is:
/// the index name is backend-qualified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hit {
    /// Backend document id.
    pub id: String,
    /// Backend-qualified index the document lives in.
    pub index: String,
    /// Relevance score. `None` when the backend skipped scoring (e.g. explicit sort).
    pub score: Option<f64>,
    /// Stored source document, passed through untouched.
    pub doc: Value,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub highlight: Option<Value>,
}

/// Backend result for one query: a page of hits plus the total match count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub hits: Vec<Hit>,
    pub total: u64,
    /// Backend-reported execution time in milliseconds.
    pub search_time: u64,
}

/// A hit as returned to the client, with the backend naming scheme removed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectHit {
    pub id: String,
    /// Logical index name without prefix or version suffix, e.g. `genome`.
    pub index_name: String,
    /// Version suffix of the backend index, 0 when unversioned.
    pub index_version: u32,
    pub score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight: Option<Value>,
}

/// The `result` payload of a successful `search_objects` call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchObjectsResult {
    pub hits: Vec<ObjectHit>,
    pub total: u64,
    pub search_time: u64,
}
