//! Multi-turn conversation state

use serde::{Deserialize, Serialize};

/// One completed exchange
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    /// What the user asked
    pub query: String,
    /// What the assistant answered
    pub response: String,
}

/// Ordered history of a chat session. Grows for the lifetime of the
/// session and is discarded at process exit.
#[derive(Debug, Clone, Default)]
pub struct ConversationState {
    turns: Vec<Turn>,
}

impl ConversationState {
    /// Create an empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a completed turn
    pub fn push(&mut self, query: impl Into<String>, response: impl Into<String>) {
        self.turns.push(Turn {
            query: query.into(),
            response: response.into(),
        });
    }

    /// Iterate turns oldest first
    pub fn iter(&self) -> impl Iterator<Item = &Turn> {
        self.turns.iter()
    }

    /// Number of completed turns
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Whether any turn has been recorded
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn turns_keep_insertion_order() {
        let mut state = ConversationState::new();
        state.push("first", "one");
        state.push("second", "two");

        let queries: Vec<&str> = state.iter().map(|t| t.query.as_str()).collect();
        assert_eq!(queries, vec!["first", "second"]);
        assert_eq!(state.len(), 2);
    }
}
