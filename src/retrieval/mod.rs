//! Semantic retrieval over the ingested collection

pub mod store;

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;
use crate::generation::PromptBuilder;
use crate::providers::{EmbeddingProvider, GenerationProvider, VectorIndex};
use crate::types::Chunk;

pub use store::{cosine_similarity, ChunkStore};

/// A retrieved chunk with its similarity score
#[derive(Debug, Clone)]
pub struct ScoredChunk {
    /// The retrieved chunk
    pub chunk: Chunk,
    /// Similarity score (higher is more similar)
    pub similarity: f32,
}

/// Ordered retrieval outcome: at most `top_k` chunks, non-increasing by
/// similarity. Empty is a valid, meaningful result.
#[derive(Debug, Clone, Default)]
pub struct RetrievalResult {
    results: Vec<ScoredChunk>,
}

impl RetrievalResult {
    /// An empty result ("no relevant context")
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a result from scored chunks, enforcing the ordering and
    /// length invariants regardless of input order.
    pub fn from_scored(mut results: Vec<ScoredChunk>, top_k: usize) -> Self {
        results.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        results.truncate(top_k);
        Self { results }
    }

    /// Whether any chunk was retrieved
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Number of retrieved chunks
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Iterate chunks most relevant first
    pub fn iter(&self) -> impl Iterator<Item = &ScoredChunk> {
        self.results.iter()
    }

    /// Best similarity score, if any chunk was retrieved
    pub fn best_similarity(&self) -> Option<f32> {
        self.results.first().map(|r| r.similarity)
    }
}

/// Concrete vector index: embeds the query, scans the persistent store,
/// and (for the combined operation) generates a grounded answer.
pub struct SemanticIndex {
    embedder: Arc<dyn EmbeddingProvider>,
    store: Arc<ChunkStore>,
    generator: Arc<dyn GenerationProvider>,
    /// Chunks scoring below this are dropped before the relevance gate.
    /// 0.0 disables the floor.
    similarity_floor: f32,
}

impl SemanticIndex {
    /// Create a new index over the given store and providers
    pub fn new(
        embedder: Arc<dyn EmbeddingProvider>,
        store: Arc<ChunkStore>,
        generator: Arc<dyn GenerationProvider>,
        similarity_floor: f32,
    ) -> Self {
        Self {
            embedder,
            store,
            generator,
            similarity_floor,
        }
    }
}

#[async_trait]
impl VectorIndex for SemanticIndex {
    async fn retrieve(&self, query: &str, top_k: usize) -> Result<RetrievalResult> {
        let query_embedding = self.embedder.embed(query).await?;
        let mut scored = self.store.search(&query_embedding, top_k)?;

        if self.similarity_floor > 0.0 {
            scored.retain(|r| r.similarity >= self.similarity_floor);
        }

        let result = RetrievalResult::from_scored(scored, top_k);
        tracing::debug!(
            retrieved = result.len(),
            best = ?result.best_similarity(),
            "retrieval complete"
        );
        Ok(result)
    }

    async fn generate_with_context(
        &self,
        query: &str,
        retrieved: &RetrievalResult,
    ) -> Result<String> {
        let context = PromptBuilder::build_context(retrieved);
        let prompt = PromptBuilder::build_grounded_prompt(query, &context);
        self.generator.complete(&prompt).await
    }
}
