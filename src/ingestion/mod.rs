//! Offline document ingestion
//!
//! Reads text files from a directory, chunks and embeds them, and writes
//! the chunks into the persistent store. Runs as a separate step, never
//! during a chat session.

pub mod chunker;
pub mod reader;

use std::path::Path;
use std::sync::Arc;

use sha2::{Digest, Sha256};

use crate::error::Result;
use crate::providers::EmbeddingProvider;
use crate::retrieval::ChunkStore;
use crate::types::Document;

pub use chunker::TextChunker;
pub use reader::{collect_files, source_name};

/// What happened to a single file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    /// Chunked, embedded, and stored (chunk count)
    Ingested(usize),
    /// Content hash unchanged since the last run
    SkippedUnchanged,
    /// Produced no chunks (empty or below the minimum chunk size)
    Empty,
}

/// Summary of an ingestion run
#[derive(Debug, Default, Clone, Copy)]
pub struct IngestReport {
    pub files_seen: usize,
    pub files_ingested: usize,
    pub files_skipped: usize,
    pub chunks_created: usize,
}

/// Drives chunking, embedding, and storage for a document directory
pub struct Ingestor {
    embedder: Arc<dyn EmbeddingProvider>,
    store: Arc<ChunkStore>,
    chunker: TextChunker,
}

impl Ingestor {
    /// Create an ingestor
    pub fn new(
        embedder: Arc<dyn EmbeddingProvider>,
        store: Arc<ChunkStore>,
        chunker: TextChunker,
    ) -> Self {
        Self {
            embedder,
            store,
            chunker,
        }
    }

    /// Ingest a single file. Unchanged files (same content hash) are
    /// skipped; changed files replace their previous chunks.
    pub async fn ingest_file(&self, root: &Path, path: &Path) -> Result<FileOutcome> {
        let content = tokio::fs::read_to_string(path).await?;
        let source = source_name(root, path);
        let hash = content_hash(&content);

        if let Some(existing) = self.store.find_document(&source) {
            if existing.content_hash == hash {
                tracing::debug!(source = %source, "unchanged, skipping");
                return Ok(FileOutcome::SkippedUnchanged);
            }
            let removed = self.store.remove_document(&source);
            tracing::info!(source = %source, removed, "replacing changed document");
        }

        let mut document = Document::new(source, hash);
        let mut chunks = self
            .chunker
            .chunk(document.id, &document.source, &content);

        if chunks.is_empty() {
            tracing::warn!(source = %document.source, "no chunks produced");
            return Ok(FileOutcome::Empty);
        }

        for chunk in &mut chunks {
            chunk.embedding = self.embedder.embed(&chunk.content).await?;
        }

        let count = chunks.len();
        document.total_chunks = count as u32;
        self.store.insert_document(document);
        for chunk in chunks {
            self.store.insert_chunk(chunk)?;
        }
        self.store.persist()?;

        Ok(FileOutcome::Ingested(count))
    }

    /// Ingest every text document under `dir`. Creates the directory if
    /// it does not exist yet (first run) and returns an empty report.
    pub async fn ingest_directory(&self, dir: &Path) -> Result<IngestReport> {
        if !dir.exists() {
            std::fs::create_dir_all(dir)?;
            tracing::info!(dir = %dir.display(), "created empty document directory");
            return Ok(IngestReport::default());
        }

        let files = collect_files(dir)?;
        let mut report = IngestReport {
            files_seen: files.len(),
            ..Default::default()
        };

        for path in &files {
            match self.ingest_file(dir, path).await? {
                FileOutcome::Ingested(count) => {
                    report.files_ingested += 1;
                    report.chunks_created += count;
                }
                FileOutcome::SkippedUnchanged => report.files_skipped += 1,
                FileOutcome::Empty => {}
            }
        }

        Ok(report)
    }
}

/// Hex-encoded SHA-256 of the document content
pub fn content_hash(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    hex::encode(hasher.finalize())
}
