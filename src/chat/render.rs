//! Progressive output rendering
//!
//! The pacing policy is a pure producer of `(fragment, pause)` pairs;
//! `TypingRenderer` consumes the sequence and performs the actual sleeps.
//! Concatenating the fragments always reproduces the input byte for byte.

use std::io::Write;
use std::time::Duration;

use unicode_segmentation::UnicodeSegmentation;

use crate::config::{DisplayConfig, PacingStyle};

/// A piece of text to emit, followed by a pause
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fragment<'a> {
    pub text: &'a str,
    pub pause: Duration,
}

fn has_sentence_punctuation(text: &str) -> bool {
    text.chars().any(|c| matches!(c, '.' | '!' | '?'))
}

fn has_clause_punctuation(text: &str) -> bool {
    text.chars().any(|c| matches!(c, ',' | ';' | ':'))
}

/// Word-level pacing: emit whitespace-delimited pieces, pausing longest
/// after sentence punctuation, medium after clause punctuation, briefly
/// otherwise. Whitespace runs are emitted without a pause of their own.
pub fn word_fragments<'a>(
    text: &'a str,
    config: &DisplayConfig,
) -> impl Iterator<Item = Fragment<'a>> + 'a {
    let sentence = Duration::from_millis(config.sentence_pause_ms);
    let clause = Duration::from_millis(config.clause_pause_ms);
    let word = Duration::from_millis(config.word_pause_ms);

    text.split_inclusive(char::is_whitespace).map(move |piece| {
        let pause = if piece.trim().is_empty() {
            Duration::ZERO
        } else if has_sentence_punctuation(piece) {
            sentence
        } else if has_clause_punctuation(piece) {
            clause
        } else {
            word
        };
        Fragment { text: piece, pause }
    })
}

/// Character-level pacing: emit grapheme by grapheme with a fixed delay,
/// pausing longer after sentence-ending punctuation.
pub fn char_fragments<'a>(
    text: &'a str,
    config: &DisplayConfig,
) -> impl Iterator<Item = Fragment<'a>> + 'a {
    let sentence = Duration::from_millis(config.sentence_pause_ms);
    let per_char = Duration::from_millis(config.char_pause_ms);

    text.graphemes(true).map(move |grapheme| {
        let pause = if has_sentence_punctuation(grapheme) {
            sentence
        } else {
            per_char
        };
        Fragment {
            text: grapheme,
            pause,
        }
    })
}

/// Renders a complete response progressively. Purely presentational: the
/// emitted text is exactly the input, only its timing is shaped.
pub struct TypingRenderer {
    config: DisplayConfig,
}

impl TypingRenderer {
    /// Create a renderer with the given pacing configuration
    pub fn new(config: DisplayConfig) -> Self {
        Self { config }
    }

    /// Emit `text` to `out` fragment by fragment, sleeping between
    /// fragments according to the configured pacing.
    pub async fn render_to<W: Write>(&self, out: &mut W, text: &str) -> std::io::Result<()> {
        match self.config.style {
            PacingStyle::Word => {
                for fragment in word_fragments(text, &self.config) {
                    Self::emit(out, fragment).await?;
                }
            }
            PacingStyle::Character => {
                for fragment in char_fragments(text, &self.config) {
                    Self::emit(out, fragment).await?;
                }
            }
        }
        out.write_all(b"\n")?;
        out.flush()
    }

    /// Emit to stdout
    pub async fn render(&self, text: &str) -> std::io::Result<()> {
        let mut stdout = std::io::stdout();
        self.render_to(&mut stdout, text).await
    }

    async fn emit<W: Write>(out: &mut W, fragment: Fragment<'_>) -> std::io::Result<()> {
        out.write_all(fragment.text.as_bytes())?;
        out.flush()?;
        if !fragment.pause.is_zero() {
            tokio::time::sleep(fragment.pause).await;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zero_delay(style: PacingStyle) -> DisplayConfig {
        DisplayConfig {
            style,
            sentence_pause_ms: 0,
            clause_pause_ms: 0,
            word_pause_ms: 0,
            char_pause_ms: 0,
        }
    }

    const SAMPLE: &str = "Hello there, friend!  How are you?\nI'm fine: thanks.";

    #[test]
    fn word_fragments_concatenate_to_input() {
        let config = DisplayConfig::default();
        let rebuilt: String = word_fragments(SAMPLE, &config).map(|f| f.text).collect();
        assert_eq!(rebuilt, SAMPLE);
    }

    #[test]
    fn char_fragments_concatenate_to_input() {
        let config = DisplayConfig::default();
        let rebuilt: String = char_fragments(SAMPLE, &config).map(|f| f.text).collect();
        assert_eq!(rebuilt, SAMPLE);
    }

    #[test]
    fn fragments_preserve_unicode_text() {
        let text = "Grüße aus Zürich — ça va? 日本語もOK。🦀 done";
        let config = DisplayConfig::default();

        let words: String = word_fragments(text, &config).map(|f| f.text).collect();
        assert_eq!(words, text);

        let chars: String = char_fragments(text, &config).map(|f| f.text).collect();
        assert_eq!(chars, text);
    }

    #[test]
    fn word_pauses_rank_sentence_over_clause_over_word() {
        let config = DisplayConfig::default();
        let fragments: Vec<Fragment> = word_fragments("plain word, done. ", &config).collect();

        let pause_for = |needle: &str| {
            fragments
                .iter()
                .find(|f| f.text.starts_with(needle))
                .map(|f| f.pause)
                .unwrap()
        };

        let word = pause_for("plain");
        let clause = pause_for("word,");
        let sentence = pause_for("done.");
        assert!(sentence > clause);
        assert!(clause > word);
    }

    #[test]
    fn whitespace_runs_carry_no_pause() {
        let config = DisplayConfig::default();
        let fragments: Vec<Fragment> = word_fragments("a  b", &config).collect();

        // "a " then " " then "b"
        assert_eq!(fragments.len(), 3);
        assert_eq!(fragments[1].text, " ");
        assert_eq!(fragments[1].pause, Duration::ZERO);
    }

    #[test]
    fn char_pacing_pauses_longest_on_sentence_end() {
        let mut config = DisplayConfig {
            style: PacingStyle::Character,
            ..DisplayConfig::default()
        };
        config.sentence_pause_ms = 200;
        config.char_pause_ms = 30;

        let fragments: Vec<Fragment> = char_fragments("ok.", &config).collect();
        assert_eq!(fragments[0].pause, Duration::from_millis(30));
        assert_eq!(fragments[2].pause, Duration::from_millis(200));
    }

    #[tokio::test]
    async fn rendered_output_is_input_plus_trailing_newline() {
        for style in [PacingStyle::Word, PacingStyle::Character] {
            let renderer = TypingRenderer::new(zero_delay(style));
            let mut out: Vec<u8> = Vec::new();
            renderer.render_to(&mut out, SAMPLE).await.unwrap();
            assert_eq!(out, format!("{SAMPLE}\n").into_bytes());
        }
    }

    #[tokio::test]
    async fn empty_text_renders_bare_newline() {
        let renderer = TypingRenderer::new(zero_delay(PacingStyle::Word));
        let mut out: Vec<u8> = Vec::new();
        renderer.render_to(&mut out, "").await.unwrap();
        assert_eq!(out, b"\n");
    }
}
