//! Interactive chat loop

pub mod render;

use std::io::Write;

use console::style;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::engine::QueryEngine;
use crate::error::Result;
use crate::types::ConversationState;

pub use render::TypingRenderer;

/// Name the assistant goes by in the terminal
pub const ASSISTANT_NAME: &str = "Docent";

const FAREWELL: &str = "Goodbye! Have a great day!";

/// Whether the input is an explicit request to end the session
pub fn is_exit_command(input: &str) -> bool {
    matches!(
        input.trim().to_lowercase().as_str(),
        "exit" | "quit" | "q"
    )
}

/// Drives the query engine turn by turn and renders responses
/// progressively.
pub struct ChatSession {
    engine: QueryEngine,
    renderer: TypingRenderer,
    /// Accumulate turns and forward them to the generator. Disabled by
    /// the stateless entry point.
    remember: bool,
    state: ConversationState,
}

impl ChatSession {
    /// Create a session
    pub fn new(engine: QueryEngine, renderer: TypingRenderer, remember: bool) -> Self {
        Self {
            engine,
            renderer,
            state: ConversationState::new(),
            remember,
        }
    }

    /// Run the loop until an exit command, Ctrl-C, or end of input.
    /// One query at a time: each turn runs to completion before the next
    /// prompt is shown.
    pub async fn run(&mut self) -> Result<()> {
        println!(
            "Welcome to {}! Ask about your documents, or type 'exit' to quit.",
            style(ASSISTANT_NAME).cyan().bold()
        );

        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        loop {
            print!("\n{} ", style("You:").green().bold());
            std::io::stdout().flush()?;

            let line = tokio::select! {
                result = lines.next_line() => result?,
                _ = tokio::signal::ctrl_c() => {
                    println!();
                    self.say(FAREWELL).await?;
                    return Ok(());
                }
            };

            let Some(input) = line else {
                // End of input (piped stdin ran out)
                println!();
                self.say(FAREWELL).await?;
                return Ok(());
            };

            let input = input.trim().to_string();
            if input.is_empty() {
                continue;
            }

            if is_exit_command(&input) {
                self.say(FAREWELL).await?;
                return Ok(());
            }

            let thinking = format!("{ASSISTANT_NAME} is thinking...");
            print!("\n{}", style(&thinking).dim());
            std::io::stdout().flush()?;

            let history = self.remember.then_some(&self.state);
            let response = self.engine.answer(&input, history).await;

            // Clear the thinking indicator before rendering
            print!("\r{}\r", " ".repeat(thinking.len()));
            std::io::stdout().flush()?;

            tracing::info!(provenance = ?response.provenance, "turn complete");

            self.say(&response.text).await?;

            if self.remember {
                self.state.push(input, response.text);
            }
        }
    }

    async fn say(&self, text: &str) -> Result<()> {
        print!("{} ", style(format!("{ASSISTANT_NAME}:")).cyan().bold());
        std::io::stdout().flush()?;
        self.renderer.render(text).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_exit_commands() {
        assert!(is_exit_command("exit"));
        assert!(is_exit_command("QUIT"));
        assert!(is_exit_command("q"));
        assert!(is_exit_command("  exit  "));
    }

    #[test]
    fn ordinary_queries_are_not_exit_commands() {
        assert!(!is_exit_command("how do I exit vim?"));
        assert!(!is_exit_command("quit smoking tips"));
        assert!(!is_exit_command(""));
    }
}
