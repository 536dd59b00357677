use crate::backend::SearchBackend;
use crate::query::composer::compose_query;
use crate::query::indexes::IndexResolver;
use crate::query::visibility::visibility_filter;
use crate::rpc::error::RpcError;
use crate::search::types::{Hit, ObjectHit, PostProcessing, SearchObjectsResult, SearchParams};
use std::sync::Arc;

/// Runs `search_objects` for already-parsed params.
///
/// Validation is fail-fast: the backend is only called once indexes, visibility and
/// pagination have all been accepted.
pub struct SearchService {
    resolver: IndexResolver,
    backend: Arc<dyn SearchBackend>,
}

impl SearchService {
    pub fn new(resolver: IndexResolver, backend: Arc<dyn SearchBackend>) -> Self {
        Self { resolver, backend }
    }

    pub async fn search_objects(
        &self,
        params: &SearchParams,
    ) -> Result<SearchObjectsResult, RpcError> {
        let indexes = self.resolver.resolve(&params.indexes)?;
        let visibility = visibility_filter(params.only_public, params.only_private)?;
        let query = compose_query(params, indexes, visibility)?;

        tracing::debug!(
            "search_objects on [{}] (public={}, private={})",
            query.indexes.to_path_segment(),
            params.only_public,
            params.only_private
        );

        let result = self.backend.search(&query).await.map_err(|e| match e {
            RpcError::BackendIndexNotFound(index) => {
                RpcError::BackendIndexNotFound(self.resolver.logical_names(&index))
            }
            other => other,
        })?;

        tracing::debug!(
            "search_objects returned {} of {} hits in {}ms",
            result.hits.len(),
            result.total,
            result.search_time
        );

        let post = params.post_processing.normalized();
        Ok(SearchObjectsResult {
            hits: result
                .hits
                .into_iter()
                .map(|hit| self.object_hit(hit, post))
                .collect(),
            total: result.total,
            search_time: result.search_time,
        })
    }

    /// Replaces the backend index name with its logical name and version, then drops
    /// whatever `post_processing` asked to leave out.
    fn object_hit(&self, hit: Hit, post: PostProcessing) -> ObjectHit {
        let (index_name, index_version) = self.resolver.split_version(&hit.index);
        ObjectHit {
            id: hit.id,
            index_name,
            index_version,
            score: hit.score,
            doc: (!post.skip_data).then_some(hit.doc),
            highlight: hit.highlight.filter(|_| post.include_highlight),
        }
    }
}
