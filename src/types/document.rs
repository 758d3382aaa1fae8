//! Document and chunk types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A document that has been ingested. Immutable once stored; re-ingesting
/// the same source replaces it wholesale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Unique document ID
    pub id: Uuid,
    /// Source identifier (file name or path as given at ingestion)
    pub source: String,
    /// Content hash for change detection
    pub content_hash: String,
    /// Number of chunks created from this document
    pub total_chunks: u32,
    /// Ingestion timestamp
    pub ingested_at: chrono::DateTime<chrono::Utc>,
}

impl Document {
    /// Create a new document record
    pub fn new(source: String, content_hash: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            source,
            content_hash,
            total_chunks: 0,
            ingested_at: chrono::Utc::now(),
        }
    }
}

/// A chunk of text from a document, the atomic unit of the vector store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    /// Unique chunk ID
    pub id: Uuid,
    /// Parent document ID
    pub document_id: Uuid,
    /// Text content
    pub content: String,
    /// Embedding vector; its length must match the store's dimensions
    pub embedding: Vec<f32>,
    /// Source back-reference (document file name)
    pub source: String,
    /// Chunk index within the document
    pub chunk_index: u32,
    /// Character span in the original document text
    pub char_start: usize,
    pub char_end: usize,
}

impl Chunk {
    /// Create a new chunk without an embedding
    pub fn new(
        document_id: Uuid,
        content: String,
        source: String,
        chunk_index: u32,
        char_start: usize,
        char_end: usize,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            document_id,
            content,
            embedding: Vec::new(),
            source,
            chunk_index,
            char_start,
            char_end,
        }
    }
}
