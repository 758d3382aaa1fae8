//! Retrieval-augmented query engine
//!
//! For each incoming query, produce exactly one response. Every exit is a
//! normally-returned `ChatResponse`: retrieval and generation failures
//! are recovered locally and never reach the caller.

use std::sync::Arc;

use crate::error::Error;
use crate::generation::PromptBuilder;
use crate::providers::{GenerationProvider, VectorIndex};
use crate::retrieval::RetrievalResult;
use crate::types::{ChatResponse, ConversationState};

/// Prefix disclosing that an answer is not grounded in the collection
pub const DISCLOSURE_PREFIX: &str = "Based on my general knowledge: ";

/// Per-query phase, logged as the engine moves through its states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Retrieving,
    DocumentPath,
    DirectPath,
    RecoveryDirectPath,
}

/// Orchestrates retrieval, the relevance gate, prompt composition,
/// generation, and the fallback chain.
pub struct QueryEngine {
    index: Arc<dyn VectorIndex>,
    generator: Arc<dyn GenerationProvider>,
    top_k: usize,
}

impl QueryEngine {
    /// Create an engine over the given index and generator
    pub fn new(
        index: Arc<dyn VectorIndex>,
        generator: Arc<dyn GenerationProvider>,
        top_k: usize,
    ) -> Self {
        Self {
            index,
            generator,
            top_k,
        }
    }

    /// Answer a query. Never fails: the worst outcome is an apology
    /// response carrying the failure's description.
    ///
    /// Relevance gate: any retrieved chunk is sufficient evidence to
    /// attempt document-backed generation; an empty retrieval (or a
    /// retrieval failure) routes to direct generation. Every response
    /// that is not document-backed carries the disclosure prefix.
    pub async fn answer(
        &self,
        query: &str,
        history: Option<&ConversationState>,
    ) -> ChatResponse {
        tracing::debug!(phase = ?Phase::Retrieving, query_chars = query.len(), "answering");

        let retrieved = match self.index.retrieve(query, self.top_k).await {
            Ok(result) => result,
            Err(e) => {
                // Index unreachable or query malformed: treated as "no
                // relevant context", not as a user-facing failure.
                tracing::warn!(error = %e, "retrieval failed, continuing without context");
                RetrievalResult::empty()
            }
        };

        if !retrieved.is_empty() {
            tracing::debug!(phase = ?Phase::DocumentPath, chunks = retrieved.len(), "context found");
            // The gate's retrieval is reused here: the query is embedded
            // and the store scanned once per turn.
            match self.index.generate_with_context(query, &retrieved).await {
                Ok(text) => return ChatResponse::document_backed(text),
                Err(e) => {
                    tracing::warn!(error = %e, "document-backed generation failed");
                    return self.recover(query, history).await;
                }
            }
        }

        tracing::debug!(phase = ?Phase::DirectPath, "no relevant context");
        match self.direct(query, history).await {
            Ok(text) => ChatResponse::direct(format!("{DISCLOSURE_PREFIX}{text}")),
            Err(e) => {
                tracing::warn!(error = %e, "direct generation failed");
                self.recover(query, history).await
            }
        }
    }

    /// Raw completion on the original query (plus any session history)
    async fn direct(
        &self,
        query: &str,
        history: Option<&ConversationState>,
    ) -> Result<String, Error> {
        let prompt = PromptBuilder::build_direct_prompt(query, history);
        tracing::debug!(prompt_chars = prompt.len(), "direct generation");
        self.generator.complete(&prompt).await
    }

    /// The guaranteed secondary attempt: one more direct generation,
    /// regardless of which path originally failed. If this also fails the
    /// user gets the apology template instead of an error. Either way the
    /// answer is not document-backed, so it carries the disclosure prefix.
    async fn recover(&self, query: &str, history: Option<&ConversationState>) -> ChatResponse {
        tracing::debug!(phase = ?Phase::RecoveryDirectPath, "attempting recovery");

        match self.direct(query, history).await {
            Ok(text) => ChatResponse::direct(format!("{DISCLOSURE_PREFIX}{text}")),
            Err(e) => {
                tracing::error!(error = %e, "recovery generation failed");
                ChatResponse::direct(format!("{DISCLOSURE_PREFIX}{}", apology(&e)))
            }
        }
    }
}

/// Fixed apology template embedding the failure's description
fn apology(cause: &Error) -> String {
    format!(
        "I'm sorry, I'm having technical difficulties at the moment ({cause}). Please try again."
    )
}
