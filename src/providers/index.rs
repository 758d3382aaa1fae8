//! Vector index trait

use async_trait::async_trait;

use crate::error::Result;
use crate::retrieval::RetrievalResult;

/// Trait for top-K semantic retrieval over the ingested collection
///
/// Implementations:
/// - `SemanticIndex`: embedding provider + persistent chunk store +
///   generation provider
#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Retrieve the `top_k` chunks nearest to the query. Read-only: must
    /// not mutate the index. An empty result is meaningful ("no relevant
    /// context").
    async fn retrieve(&self, query: &str, top_k: usize) -> Result<RetrievalResult>;

    /// Generate an answer to the query grounded in already-retrieved
    /// context. Lets a caller that has just retrieved reuse the result
    /// instead of embedding and scanning again.
    async fn generate_with_context(
        &self,
        query: &str,
        retrieved: &RetrievalResult,
    ) -> Result<String>;

    /// Combined retrieve + prompt + generate: answer the query from
    /// retrieved context in one call.
    async fn query_with_generation(&self, query: &str, top_k: usize) -> Result<String> {
        let retrieved = self.retrieve(query, top_k).await?;
        self.generate_with_context(query, &retrieved).await
    }
}
