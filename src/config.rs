//! Configuration for the assistant

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Environment variable naming an alternative config file
pub const CONFIG_ENV_VAR: &str = "DOCENT_CONFIG";

/// Default config file looked up in the working directory
pub const CONFIG_FILE: &str = "docent.toml";

/// Main assistant configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocentConfig {
    /// Persistent chunk store configuration
    #[serde(default)]
    pub store: StoreConfig,
    /// Embedding endpoint configuration
    #[serde(default)]
    pub embedding: EmbeddingConfig,
    /// Generation endpoint configuration
    #[serde(default)]
    pub generation: GenerationConfig,
    /// Retrieval configuration
    #[serde(default)]
    pub retrieval: RetrievalConfig,
    /// Chunking configuration (ingestion only)
    #[serde(default)]
    pub chunking: ChunkingConfig,
    /// Progressive output configuration
    #[serde(default)]
    pub display: DisplayConfig,
}

impl DocentConfig {
    /// Load configuration for the process.
    ///
    /// Resolution order: explicit `--config` path, then `DOCENT_CONFIG`,
    /// then `docent.toml` in the working directory, then built-in
    /// defaults. A named file that is missing or unparseable is fatal.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let named = explicit
            .map(PathBuf::from)
            .or_else(|| std::env::var(CONFIG_ENV_VAR).ok().map(PathBuf::from));

        let config = match named {
            Some(path) => Self::from_file(&path)?,
            None => {
                let default = PathBuf::from(CONFIG_FILE);
                if default.exists() {
                    Self::from_file(&default)?
                } else {
                    Self::default()
                }
            }
        };

        config.validate()?;
        Ok(config)
    }

    /// Parse a config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("cannot read config file '{}': {}", path.display(), e))
        })?;
        toml::from_str(&raw)
            .map_err(|e| Error::config(format!("invalid config file '{}': {}", path.display(), e)))
    }

    /// Validate configuration values. All violations are fatal at startup.
    pub fn validate(&self) -> Result<()> {
        if self.embedding.model.trim().is_empty() {
            return Err(Error::config("embedding.model must not be empty"));
        }
        if self.generation.model.trim().is_empty() {
            return Err(Error::config("generation.model must not be empty"));
        }
        if self.embedding.dimensions == 0 {
            return Err(Error::config("embedding.dimensions must be at least 1"));
        }
        if self.retrieval.top_k == 0 {
            return Err(Error::config("retrieval.top_k must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.retrieval.similarity_floor) {
            return Err(Error::config(
                "retrieval.similarity_floor must be between 0.0 and 1.0",
            ));
        }
        if self.generation.timeout_secs == 0 {
            return Err(Error::config("generation.timeout_secs must be at least 1"));
        }
        if self.chunking.chunk_size == 0 {
            return Err(Error::config("chunking.chunk_size must be at least 1"));
        }
        if self.chunking.chunk_overlap >= self.chunking.chunk_size {
            return Err(Error::config(
                "chunking.chunk_overlap must be smaller than chunking.chunk_size",
            ));
        }
        Ok(())
    }
}

/// Persistent chunk store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Directory holding the collection files
    pub storage_path: PathBuf,
    /// Collection name (one file per collection)
    pub collection: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        let storage_path = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("docent");

        Self {
            storage_path,
            collection: "docent_collection".to_string(),
        }
    }
}

impl StoreConfig {
    /// Path of the collection file on disk
    pub fn collection_file(&self) -> PathBuf {
        self.storage_path.join(format!("{}.json", self.collection))
    }
}

/// Embedding endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Ollama base URL
    pub base_url: String,
    /// Embedding model name
    pub model: String,
    /// Embedding dimensions (1024 for mxbai-embed-large, 768 for nomic-embed-text)
    pub dimensions: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".to_string(),
            model: "mxbai-embed-large".to_string(),
            dimensions: 1024,
            timeout_secs: 30,
        }
    }
}

/// Generation endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Ollama base URL
    pub base_url: String,
    /// Generation model name
    pub model: String,
    /// Request timeout in seconds; an elapsed timeout is a generation
    /// failure and triggers the engine's recovery path
    pub timeout_secs: u64,
    /// Temperature for generation
    pub temperature: f32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".to_string(),
            model: "llama3.2:3b".to_string(),
            timeout_secs: 60,
            temperature: 0.3,
        }
    }
}

/// Retrieval configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Number of chunks to retrieve per query
    pub top_k: usize,
    /// Minimum similarity for a chunk to count as retrieved.
    /// 0.0 disables the floor: any nearest neighbor passes the gate.
    pub similarity_floor: f32,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: 5,
            similarity_floor: 0.0,
        }
    }
}

/// Chunking configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkingConfig {
    /// Target chunk size in characters
    pub chunk_size: usize,
    /// Overlap between consecutive chunks
    pub chunk_overlap: usize,
    /// Chunks shorter than this are discarded
    pub min_chunk_size: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: 1024,
            chunk_overlap: 200,
            min_chunk_size: 100,
        }
    }
}

/// Progressive output pacing style
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PacingStyle {
    /// Emit word by word, pausing on punctuation
    #[default]
    Word,
    /// Emit character by character with sentence pauses
    Character,
}

/// Progressive output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Pacing variant
    pub style: PacingStyle,
    /// Pause after sentence-ending punctuation (ms)
    pub sentence_pause_ms: u64,
    /// Pause after clause punctuation (ms)
    pub clause_pause_ms: u64,
    /// Pause between ordinary words (ms)
    pub word_pause_ms: u64,
    /// Per-character delay in the character variant (ms)
    pub char_pause_ms: u64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            style: PacingStyle::Word,
            sentence_pause_ms: 400,
            clause_pause_ms: 250,
            word_pause_ms: 100,
            char_pause_ms: 30,
        }
    }
}
