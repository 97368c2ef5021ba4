//! Boundary-aware character chunking.
//!
//! Each chunk is cut at the strongest natural boundary found in the back half
//! of its window (paragraph, then line, then sentence, then word) and falls
//! back to a hard cut at the size limit. The next chunk always starts exactly
//! `chunk_overlap` characters before the previous cut.

use super::{Chunk, ChunkingConfig};
use crate::error::Result;
use tracing::debug;

/// Boundaries in priority order. A cut is placed after the separator.
const SEPARATORS: [&str; 6] = ["\n\n", "\n", ". ", "? ", "! ", " "];

/// Character chunker that prefers natural boundaries.
#[derive(Debug, Clone)]
pub struct RecursiveChunker {
    config: ChunkingConfig,
    separators: Vec<Vec<char>>,
}

impl RecursiveChunker {
    pub fn new(config: ChunkingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            separators: SEPARATORS.iter().map(|s| s.chars().collect()).collect(),
        })
    }

    pub fn config(&self) -> ChunkingConfig {
        self.config
    }

    /// Split text into ordered, overlapping chunks.
    pub fn split(&self, text: &str) -> Vec<Chunk> {
        let chars: Vec<char> = text.chars().collect();
        let total = chars.len();
        let mut chunks = Vec::new();

        if total == 0 {
            return chunks;
        }

        let mut start = 0;
        loop {
            let end = if total - start <= self.config.chunk_size {
                total
            } else {
                self.find_cut(&chars, start)
            };

            chunks.push(Chunk {
                content: chars[start..end].iter().collect(),
                order: chunks.len(),
                char_offset: start,
            });

            if end == total {
                break;
            }
            start = end - self.config.chunk_overlap;
        }

        debug!(
            "Split {} chars into {} chunks (size {}, overlap {})",
            total,
            chunks.len(),
            self.config.chunk_size,
            self.config.chunk_overlap
        );
        chunks
    }

    /// End position for a chunk starting at `start`, where the text does not fit.
    fn find_cut(&self, chars: &[char], start: usize) -> usize {
        let max_end = start + self.config.chunk_size;
        // Past the overlap so the next start moves forward.
        let min_end = start + (self.config.chunk_overlap + 1).max(self.config.chunk_size / 2);

        self.separators
            .iter()
            .find_map(|sep| last_boundary(chars, sep, min_end, max_end))
            .unwrap_or(max_end)
    }
}

/// Largest `end` in `min_end..=max_end` where `chars[..end]` ends with `sep`.
fn last_boundary(chars: &[char], sep: &[char], min_end: usize, max_end: usize) -> Option<usize> {
    (min_end.max(sep.len())..=max_end)
        .rev()
        .find(|&end| chars[end - sep.len()..end] == *sep)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunking::reassemble;

    fn chunker(size: usize, overlap: usize) -> RecursiveChunker {
        RecursiveChunker::new(ChunkingConfig::new(size, overlap).unwrap()).unwrap()
    }

    fn sample_texts() -> Vec<String> {
        vec![
            "The quick brown fox jumps over the lazy dog. ".repeat(40),
            "Paragraph one talks about Rust.\n\nParagraph two is about ownership!\nA new line? Yes. ".repeat(25),
            "x".repeat(333),
            "héllo wörld ñandú — naïve café ".repeat(30),
            "short".to_string(),
        ]
    }

    fn assert_invariants(text: &str, size: usize, overlap: usize) {
        let chunks = chunker(size, overlap).split(text);

        for chunk in &chunks {
            assert!(chunk.char_len() <= size, "chunk of {} > {}", chunk.char_len(), size);
        }
        for pair in chunks.windows(2) {
            let tail: String = pair[0].content.chars().skip(pair[0].char_len() - overlap).collect();
            let head: String = pair[1].content.chars().take(overlap).collect();
            assert_eq!(tail, head);
            assert_eq!(pair[1].char_offset, pair[0].char_offset + pair[0].char_len() - overlap);
        }
        for (i, chunk) in chunks.iter().enumerate() {
            assert_eq!(chunk.order, i);
        }
        assert_eq!(reassemble(&chunks, overlap), text);
    }

    #[test]
    fn test_size_bound_and_reconstruction() {
        for text in sample_texts() {
            for (size, overlap) in [(1, 0), (2, 1), (10, 0), (10, 9), (37, 5), (100, 30), (1000, 200)] {
                assert_invariants(&text, size, overlap);
            }
        }
    }

    #[test]
    fn test_deterministic() {
        let c = chunker(120, 25);
        for text in sample_texts() {
            assert_eq!(c.split(&text), c.split(&text));
        }
    }

    #[test]
    fn test_empty_and_short_text() {
        assert!(chunker(10, 2).split("").is_empty());

        let chunks = chunker(100, 20).split("fits in one chunk");
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].content, "fits in one chunk");
        assert_eq!(chunks[0].char_offset, 0);
    }

    #[test]
    fn test_prefers_word_boundaries() {
        let chunks = chunker(20, 0).split("The quick brown fox jumps over the lazy dog");

        let contents: Vec<&str> = chunks.iter().map(|c| c.content.as_str()).collect();
        assert_eq!(contents, vec!["The quick brown fox ", "jumps over the lazy ", "dog"]);
    }

    #[test]
    fn test_prefers_paragraph_over_word() {
        let text = format!("{}\n\n{}", "a ".repeat(15), "b ".repeat(30));
        let chunks = chunker(50, 0).split(&text);

        assert!(chunks[0].content.ends_with("\n\n"));
        assert_eq!(chunks[0].char_len(), 32);
    }

    #[test]
    fn test_hard_cut_without_boundaries() {
        let chunks = chunker(10, 3).split(&"x".repeat(25));

        let offsets: Vec<usize> = chunks.iter().map(|c| c.char_offset).collect();
        assert_eq!(offsets, vec![0, 7, 14, 21]);
        assert_eq!(chunks[3].char_len(), 4);
    }

    #[test]
    fn test_chunk_count_formula() {
        // ceil((5000 - 200) / (1000 - 200)) = 6
        let expected = 6i64;

        let unbroken = "x".repeat(5000);
        assert_eq!(chunker(1000, 200).split(&unbroken).len() as i64, expected);

        let words: String = "lorem ".repeat(834).chars().take(5000).collect();
        let count = chunker(1000, 200).split(&words).len() as i64;
        assert!((count - expected).abs() <= 1, "got {} chunks", count);
    }
}
