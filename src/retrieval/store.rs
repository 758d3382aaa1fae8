//! Persistent chunk store with cosine similarity search

use std::fs;
use std::path::PathBuf;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::config::StoreConfig;
use crate::error::{Error, Result};
use crate::types::{Chunk, Document};

use super::ScoredChunk;

/// On-disk layout of a collection
#[derive(Debug, Default, Serialize, Deserialize)]
struct CollectionFile {
    dimensions: usize,
    documents: Vec<Document>,
    chunks: Vec<Chunk>,
}

/// Persistent chunk store.
///
/// Chunks live in memory and are flushed to a single JSON collection
/// file; search is an exact cosine scan over the collection. Read-only
/// during a chat session.
pub struct ChunkStore {
    path: PathBuf,
    dimensions: usize,
    inner: RwLock<CollectionFile>,
}

impl ChunkStore {
    /// Open (or create) the collection at the configured path.
    ///
    /// A collection created with different embedding dimensions is
    /// rejected: its vectors are not comparable to new queries.
    pub fn open(config: &StoreConfig, dimensions: usize) -> Result<Self> {
        fs::create_dir_all(&config.storage_path).map_err(|e| {
            Error::config(format!(
                "cannot create store directory '{}': {}",
                config.storage_path.display(),
                e
            ))
        })?;

        let path = config.collection_file();
        let inner = if path.exists() {
            let raw = fs::read_to_string(&path)?;
            let collection: CollectionFile = serde_json::from_str(&raw).map_err(|e| {
                Error::vector_db(format!(
                    "corrupt collection file '{}': {}",
                    path.display(),
                    e
                ))
            })?;

            if collection.dimensions != 0 && collection.dimensions != dimensions {
                return Err(Error::config(format!(
                    "collection '{}' was built with {} dimensions, configured model produces {}",
                    path.display(),
                    collection.dimensions,
                    dimensions
                )));
            }
            collection
        } else {
            CollectionFile {
                dimensions,
                ..Default::default()
            }
        };

        Ok(Self {
            path,
            dimensions,
            inner: RwLock::new(inner),
        })
    }

    /// Insert a chunk. Rejects chunks whose embedding dimension does not
    /// match the collection.
    pub fn insert_chunk(&self, chunk: Chunk) -> Result<()> {
        if chunk.embedding.len() != self.dimensions {
            return Err(Error::vector_db(format!(
                "chunk has {} dimensions, collection expects {}",
                chunk.embedding.len(),
                self.dimensions
            )));
        }

        self.inner.write().chunks.push(chunk);
        Ok(())
    }

    /// Record an ingested document
    pub fn insert_document(&self, document: Document) {
        self.inner.write().documents.push(document);
    }

    /// Look up a previously ingested document by source name
    pub fn find_document(&self, source: &str) -> Option<Document> {
        self.inner
            .read()
            .documents
            .iter()
            .find(|d| d.source == source)
            .cloned()
    }

    /// Remove a document and all its chunks. Returns the number of chunks
    /// removed.
    pub fn remove_document(&self, source: &str) -> usize {
        let mut inner = self.inner.write();

        let doc_ids: Vec<uuid::Uuid> = inner
            .documents
            .iter()
            .filter(|d| d.source == source)
            .map(|d| d.id)
            .collect();

        let before = inner.chunks.len();
        inner.chunks.retain(|c| !doc_ids.contains(&c.document_id));
        inner.documents.retain(|d| d.source != source);

        before - inner.chunks.len()
    }

    /// Search for the `top_k` chunks most similar to the query embedding.
    /// Results are ordered by non-increasing similarity. Does not mutate
    /// the store.
    pub fn search(&self, query_embedding: &[f32], top_k: usize) -> Result<Vec<ScoredChunk>> {
        if query_embedding.len() != self.dimensions {
            return Err(Error::vector_db(format!(
                "query embedding has {} dimensions, collection expects {}",
                query_embedding.len(),
                self.dimensions
            )));
        }

        let inner = self.inner.read();

        let mut results: Vec<ScoredChunk> = inner
            .chunks
            .iter()
            .map(|chunk| ScoredChunk {
                similarity: cosine_similarity(query_embedding, &chunk.embedding),
                chunk: chunk.clone(),
            })
            .collect();

        results.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        results.truncate(top_k);

        Ok(results)
    }

    /// Flush the collection to disk. Writes to a sibling temp file first
    /// so a crash mid-write cannot corrupt the collection.
    pub fn persist(&self) -> Result<()> {
        let inner = self.inner.read();
        let raw = serde_json::to_string(&*inner)?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, raw)?;
        fs::rename(&tmp, &self.path)?;

        tracing::debug!(
            chunks = inner.chunks.len(),
            documents = inner.documents.len(),
            path = %self.path.display(),
            "collection persisted"
        );
        Ok(())
    }

    /// Number of chunks stored
    pub fn len(&self) -> usize {
        self.inner.read().chunks.len()
    }

    /// Whether the store holds no chunks
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of documents stored
    pub fn document_count(&self) -> usize {
        self.inner.read().documents.len()
    }
}

/// Cosine similarity between two equal-length vectors
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}
