//! End-to-end pipeline tests with stub providers over a real store

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;

use docent::config::{ChunkingConfig, StoreConfig};
use docent::engine::{QueryEngine, DISCLOSURE_PREFIX};
use docent::error::{Error, Result};
use docent::ingestion::{Ingestor, TextChunker};
use docent::providers::{EmbeddingProvider, GenerationProvider, VectorIndex};
use docent::retrieval::{ChunkStore, SemanticIndex};
use docent::types::Provenance;

const DIMENSIONS: usize = 3;

/// Embedder that maps every text to the same direction, so any stored
/// chunk is a perfect match for any query.
struct UniformEmbedder;

#[async_trait]
impl EmbeddingProvider for UniformEmbedder {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
        Ok(vec![1.0, 0.0, 0.0])
    }

    fn dimensions(&self) -> usize {
        DIMENSIONS
    }

    fn name(&self) -> &str {
        "uniform"
    }
}

/// Generator that echoes its prompt, or fails unconditionally
struct EchoGenerator {
    fail: bool,
}

#[async_trait]
impl GenerationProvider for EchoGenerator {
    async fn complete(&self, prompt: &str) -> Result<String> {
        if self.fail {
            return Err(Error::generation("request timed out"));
        }
        Ok(format!("GEN<{prompt}>"))
    }

    fn name(&self) -> &str {
        "echo"
    }

    fn model(&self) -> &str {
        "echo-model"
    }
}

fn open_store(dir: &Path) -> Arc<ChunkStore> {
    let config = StoreConfig {
        storage_path: dir.to_path_buf(),
        collection: "pipeline".to_string(),
    };
    Arc::new(ChunkStore::open(&config, DIMENSIONS).unwrap())
}

async fn ingest_crisis_doc(store: &Arc<ChunkStore>, docs_dir: &Path) {
    std::fs::write(
        docs_dir.join("emergency.txt"),
        "Crisis line: 112. Call it for any emergency.",
    )
    .unwrap();

    let chunker = TextChunker::new(&ChunkingConfig {
        chunk_size: 200,
        chunk_overlap: 20,
        min_chunk_size: 5,
    });
    let ingestor = Ingestor::new(Arc::new(UniformEmbedder), store.clone(), chunker);
    let report = ingestor.ingest_directory(docs_dir).await.unwrap();
    assert_eq!(report.files_ingested, 1);
}

fn build_engine(store: Arc<ChunkStore>, generator_fails: bool) -> QueryEngine {
    let generator = Arc::new(EchoGenerator {
        fail: generator_fails,
    });
    let index = Arc::new(SemanticIndex::new(
        Arc::new(UniformEmbedder),
        store,
        generator.clone(),
        0.0,
    ));
    QueryEngine::new(index, generator, 5)
}

#[tokio::test]
async fn empty_collection_answers_directly_with_disclosure() {
    let data = tempfile::tempdir().unwrap();
    let store = open_store(data.path());

    let engine = build_engine(store, false);
    let response = engine.answer("What is 2+2?", None).await;

    assert_eq!(response.provenance, Provenance::Direct);
    assert!(response.text.starts_with(DISCLOSURE_PREFIX));
    assert!(response.text.contains("What is 2+2?"));
}

#[tokio::test]
async fn ingested_document_grounds_the_answer() {
    let data = tempfile::tempdir().unwrap();
    let docs = tempfile::tempdir().unwrap();
    let store = open_store(data.path());
    ingest_crisis_doc(&store, docs.path()).await;

    let engine = build_engine(store, false);
    let response = engine.answer("I need emergency help", None).await;

    assert_eq!(response.provenance, Provenance::DocumentBacked);
    // The echo generator proves the retrieved chunk reached the prompt
    assert!(response.text.contains("Crisis line: 112"));
    assert!(response.text.contains("I need emergency help"));
    assert!(!response.text.starts_with(DISCLOSURE_PREFIX));
}

#[tokio::test]
async fn generation_timeout_on_both_attempts_yields_apology() {
    let data = tempfile::tempdir().unwrap();
    let docs = tempfile::tempdir().unwrap();
    let store = open_store(data.path());
    ingest_crisis_doc(&store, docs.path()).await;

    let engine = build_engine(store, true);
    let response = engine.answer("I need emergency help", None).await;

    assert_eq!(response.provenance, Provenance::Direct);
    assert!(response.text.starts_with(DISCLOSURE_PREFIX));
    assert!(response.text.contains("I'm sorry"));
    assert!(response.text.contains("request timed out"));
}

#[tokio::test]
async fn combined_query_operation_grounds_in_retrieved_chunks() {
    let data = tempfile::tempdir().unwrap();
    let docs = tempfile::tempdir().unwrap();
    let store = open_store(data.path());
    ingest_crisis_doc(&store, docs.path()).await;

    let index = SemanticIndex::new(
        Arc::new(UniformEmbedder),
        store,
        Arc::new(EchoGenerator { fail: false }),
        0.0,
    );

    let answer = index
        .query_with_generation("I need emergency help", 5)
        .await
        .unwrap();
    assert!(answer.contains("Crisis line: 112"));
    assert!(answer.contains("I need emergency help"));
}

#[tokio::test]
async fn retrieval_respects_top_k() {
    let data = tempfile::tempdir().unwrap();
    let docs = tempfile::tempdir().unwrap();
    let store = open_store(data.path());

    // Several small documents, all perfect matches under UniformEmbedder
    for i in 0..4 {
        std::fs::write(
            docs.path().join(format!("note{i}.txt")),
            format!("Note number {i} with enough text to pass the minimum."),
        )
        .unwrap();
    }
    let chunker = TextChunker::new(&ChunkingConfig {
        chunk_size: 200,
        chunk_overlap: 20,
        min_chunk_size: 5,
    });
    let ingestor = Ingestor::new(Arc::new(UniformEmbedder), store.clone(), chunker);
    ingestor.ingest_directory(docs.path()).await.unwrap();
    assert_eq!(store.len(), 4);

    let index = SemanticIndex::new(
        Arc::new(UniformEmbedder),
        store,
        Arc::new(EchoGenerator { fail: false }),
        0.0,
    );

    let retrieved = index.retrieve("anything", 2).await.unwrap();
    assert_eq!(retrieved.len(), 2);

    let scores: Vec<f32> = retrieved.iter().map(|r| r.similarity).collect();
    for pair in scores.windows(2) {
        assert!(pair[0] >= pair[1]);
    }
}

#[tokio::test]
async fn similarity_floor_filters_weak_matches() {
    let data = tempfile::tempdir().unwrap();
    let store = open_store(data.path());

    // One chunk orthogonal to every query embedding
    let mut chunk = docent::types::Chunk::new(
        uuid::Uuid::new_v4(),
        "unrelated content".to_string(),
        "other.txt".to_string(),
        0,
        0,
        17,
    );
    chunk.embedding = vec![0.0, 1.0, 0.0];
    store.insert_chunk(chunk).unwrap();

    let index = SemanticIndex::new(
        Arc::new(UniformEmbedder),
        store,
        Arc::new(EchoGenerator { fail: false }),
        0.5,
    );

    let retrieved = index.retrieve("query", 5).await.unwrap();
    assert!(retrieved.is_empty());
}
