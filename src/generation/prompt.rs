//! Prompt templates

use crate::retrieval::RetrievalResult;
use crate::types::ConversationState;

/// Prompt builder for grounded and direct generation
pub struct PromptBuilder;

impl PromptBuilder {
    /// Build context from retrieved chunks, most relevant first.
    ///
    /// Chunk ordering is preserved as retrieved. Known limitation: the
    /// combined context size is not capped; a large corpus with large
    /// chunks can exceed the generator's input window. The composed size
    /// is logged so this is observable.
    pub fn build_context(retrieved: &RetrievalResult) -> String {
        let mut context = String::new();

        for (i, result) in retrieved.iter().enumerate() {
            context.push_str(&format!(
                "[{}] {}\n\n{}\n\n---\n\n",
                i + 1,
                result.chunk.source,
                result.chunk.content
            ));
        }

        context
    }

    /// Build the document-grounded prompt
    pub fn build_grounded_prompt(question: &str, context: &str) -> String {
        format!(
            r#"Based on the following context, answer the question. Only use information from the context. If the answer is not in the context, say so.

Context:
{context}

Question: {question}

Answer:"#
        )
    }

    /// Build the direct prompt: the bare query when the session carries
    /// no history, otherwise a transcript followed by the new question.
    pub fn build_direct_prompt(question: &str, history: Option<&ConversationState>) -> String {
        match history {
            Some(state) if !state.is_empty() => {
                let mut prompt = String::from("The following is a conversation so far:\n\n");
                for turn in state.iter() {
                    prompt.push_str(&format!("User: {}\nAssistant: {}\n\n", turn.query, turn.response));
                }
                prompt.push_str(&format!("User: {}\nAssistant:", question));
                prompt
            }
            _ => question.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::retrieval::ScoredChunk;
    use crate::types::Chunk;
    use uuid::Uuid;

    fn scored(content: &str, source: &str, similarity: f32) -> ScoredChunk {
        ScoredChunk {
            chunk: Chunk::new(
                Uuid::new_v4(),
                content.to_string(),
                source.to_string(),
                0,
                0,
                content.len(),
            ),
            similarity,
        }
    }

    #[test]
    fn context_preserves_retrieval_order() {
        let retrieved = RetrievalResult::from_scored(
            vec![
                scored("second best", "b.txt", 0.5),
                scored("most relevant", "a.txt", 0.9),
            ],
            5,
        );

        let context = PromptBuilder::build_context(&retrieved);
        let first = context.find("most relevant").unwrap();
        let second = context.find("second best").unwrap();
        assert!(first < second);
        assert!(context.contains("[1] a.txt"));
        assert!(context.contains("[2] b.txt"));
    }

    #[test]
    fn grounded_prompt_contains_question_and_context() {
        let prompt = PromptBuilder::build_grounded_prompt("What is X?", "X is 42.");
        assert!(prompt.contains("What is X?"));
        assert!(prompt.contains("X is 42."));
    }

    #[test]
    fn direct_prompt_without_history_is_the_bare_query() {
        assert_eq!(
            PromptBuilder::build_direct_prompt("What is 2+2?", None),
            "What is 2+2?"
        );

        let empty = ConversationState::new();
        assert_eq!(
            PromptBuilder::build_direct_prompt("What is 2+2?", Some(&empty)),
            "What is 2+2?"
        );
    }

    #[test]
    fn direct_prompt_with_history_includes_prior_turns() {
        let mut state = ConversationState::new();
        state.push("Who wrote Dune?", "Frank Herbert.");

        let prompt = PromptBuilder::build_direct_prompt("When was it published?", Some(&state));
        assert!(prompt.contains("Who wrote Dune?"));
        assert!(prompt.contains("Frank Herbert."));
        assert!(prompt.ends_with("User: When was it published?\nAssistant:"));
    }
}
