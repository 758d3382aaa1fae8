//! Sentence-aware text chunking

use unicode_segmentation::UnicodeSegmentation;
use uuid::Uuid;

use crate::config::ChunkingConfig;
use crate::types::Chunk;

/// Text chunker with configurable size and overlap
pub struct TextChunker {
    chunk_size: usize,
    overlap: usize,
    min_size: usize,
}

impl TextChunker {
    /// Create a chunker from config
    pub fn new(config: &ChunkingConfig) -> Self {
        Self {
            chunk_size: config.chunk_size,
            overlap: config.chunk_overlap,
            min_size: config.min_chunk_size,
        }
    }

    /// Split `text` into chunks for `document_id`, accumulating whole
    /// sentences up to the target size, with overlap carried between
    /// consecutive chunks. Chunks below the minimum size are dropped.
    pub fn chunk(&self, document_id: Uuid, source: &str, text: &str) -> Vec<Chunk> {
        let mut chunks = Vec::new();
        let mut current = String::new();
        let mut current_start = 0usize;
        let mut char_pos = 0usize;
        let mut index = 0u32;

        for sentence in text.split_sentence_bounds() {
            if !current.is_empty() && current.len() + sentence.len() > self.chunk_size {
                if current.trim().len() >= self.min_size {
                    chunks.push(Chunk::new(
                        document_id,
                        current.trim().to_string(),
                        source.to_string(),
                        index,
                        current_start,
                        char_pos,
                    ));
                    index += 1;
                }

                current = self.overlap_text(&current);
                current_start = char_pos.saturating_sub(self.overlap);
            }

            current.push_str(sentence);
            char_pos += sentence.len();
        }

        if current.trim().len() >= self.min_size {
            chunks.push(Chunk::new(
                document_id,
                current.trim().to_string(),
                source.to_string(),
                index,
                current_start,
                char_pos,
            ));
        }

        chunks
    }

    /// Tail of the previous chunk carried into the next one, preferring a
    /// sentence or word boundary
    fn overlap_text(&self, text: &str) -> String {
        if text.len() <= self.overlap {
            return text.to_string();
        }

        let mut start = text.len().saturating_sub(self.overlap);
        while start > 0 && !text.is_char_boundary(start) {
            start -= 1;
        }

        let tail = &text[start..];

        if let Some(pos) = tail.find(". ") {
            return tail[pos + 2..].to_string();
        }

        if let Some(pos) = tail.find(' ') {
            return tail[pos + 1..].to_string();
        }

        tail.to_string()
    }
}
