//! Provider abstractions for embeddings, generation, and the vector index
//!
//! The engine depends only on these narrow traits; any concrete backend
//! is a swappable implementation.

pub mod embedding;
pub mod index;
pub mod llm;
pub mod ollama;

pub use embedding::EmbeddingProvider;
pub use index::VectorIndex;
pub use llm::GenerationProvider;
pub use ollama::{OllamaEmbedder, OllamaGenerator};
