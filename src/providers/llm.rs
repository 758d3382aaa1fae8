//! Generation provider trait

use async_trait::async_trait;

use crate::error::Result;

/// Trait for free-text completion
///
/// Implementations:
/// - `OllamaGenerator`: local Ollama server (llama3.2, phi3, etc.)
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    /// Produce a completion for the given prompt. May fail with a
    /// provider error (network, timeout, model not found).
    async fn complete(&self, prompt: &str) -> Result<String>;

    /// Provider name for logging
    fn name(&self) -> &str;

    /// The model being used
    fn model(&self) -> &str;
}
