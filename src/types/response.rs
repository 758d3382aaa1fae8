//! Response types

use serde::{Deserialize, Serialize};

/// Whether a response was grounded in retrieved document chunks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    /// At least one retrieved chunk was part of the prompt sent to the
    /// generator
    DocumentBacked,
    /// Answered from the model's own knowledge (no context, or fallback)
    Direct,
}

/// The answer returned to the user for a single query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    /// User-visible answer text
    pub text: String,
    /// Grounding classification
    pub provenance: Provenance,
}

impl ChatResponse {
    /// Create a document-backed response
    pub fn document_backed(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            provenance: Provenance::DocumentBacked,
        }
    }

    /// Create a direct response
    pub fn direct(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            provenance: Provenance::Direct,
        }
    }

    /// Whether the response was grounded in retrieved chunks
    pub fn is_document_backed(&self) -> bool {
        self.provenance == Provenance::DocumentBacked
    }
}
