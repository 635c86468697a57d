//! Page chunking for embedding generation
//!
//! Splits page text into overlapping segments suitable for embedding models.
//! Sizes are measured in characters (Unicode scalar values), not bytes.

use crate::document::Page;
use crate::pipeline::config::{CHUNK_OVERLAP, CHUNK_SIZE};

/// Configuration for the page chunker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkerConfig {
    /// Maximum number of characters per chunk
    pub max_chunk_chars: usize,
    /// Number of characters to overlap between adjacent chunks
    pub overlap_chars: usize,
}

impl ChunkerConfig {
    /// Overlap is clamped below the chunk size.
    pub fn new(max_chunk_chars: usize, overlap_chars: usize) -> Self {
        let max_chunk_chars = max_chunk_chars.max(1);
        Self {
            max_chunk_chars,
            overlap_chars: overlap_chars.min(max_chunk_chars - 1),
        }
    }
}

impl Default for ChunkerConfig {
    fn default() -> Self {
        Self::new(CHUNK_SIZE, CHUNK_OVERLAP)
    }
}

/// A chunk of text from a page
#[derive(Debug, Clone, PartialEq)]
pub struct Chunk {
    /// The text content of this chunk
    pub text: String,
    /// Source page number (1-based)
    pub page_number: u32,
    /// Index of this chunk within its page (0-based)
    pub chunk_index: usize,
    /// Total number of chunks for the page
    pub total_chunks: usize,
}

/// Chunker for splitting pages into smaller pieces
#[derive(Debug, Clone)]
pub struct PageChunker {
    config: ChunkerConfig,
}

impl PageChunker {
    pub fn new(config: ChunkerConfig) -> Self {
        Self {
            config: ChunkerConfig::new(config.max_chunk_chars, config.overlap_chars),
        }
    }

    /// Chunk a single text string
    pub fn chunk_text(&self, text: &str) -> Vec<String> {
        let text = text.trim();

        if text.is_empty() {
            return vec![];
        }

        let chars: Vec<char> = text.chars().collect();
        if chars.len() <= self.config.max_chunk_chars {
            return vec![text.to_string()];
        }

        // offsets[i] is the byte offset of char i; the extra entry marks the end
        let offsets: Vec<usize> = text
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(text.len()))
            .collect();

        let len = chars.len();
        let mut chunks = Vec::new();
        let mut start = 0;

        loop {
            let end = (start + self.config.max_chunk_chars).min(len);
            let cut = if end < len {
                self.find_break_point(&chars, start, end)
            } else {
                end
            };

            let chunk = text[offsets[start]..offsets[cut]].trim();
            if !chunk.is_empty() {
                chunks.push(chunk.to_string());
            }

            if cut >= len {
                break;
            }

            start = self.next_start(&chars, start, cut);
        }

        chunks
    }

    /// Find a good break point in the tail of the window, preferring
    /// paragraph, then sentence, then line, then word boundaries.
    fn find_break_point(&self, chars: &[char], start: usize, end: usize) -> usize {
        let window_start = end.saturating_sub(self.config.overlap_chars).max(start);
        let window = &chars[window_start..end];

        // Paragraph break
        for i in (0..window.len().saturating_sub(1)).rev() {
            if window[i] == '\n' && window[i + 1] == '\n' {
                return window_start + i + 2;
            }
        }

        // Sentence end followed by whitespace
        for (i, c) in window.iter().enumerate().rev() {
            if matches!(c, '.' | '!' | '?') {
                let next = window_start + i + 1;
                if chars.get(next).is_some_and(|n| n.is_whitespace()) {
                    return next;
                }
            }
        }

        // Line break
        if let Some(pos) = window.iter().rposition(|&c| c == '\n') {
            return window_start + pos + 1;
        }

        // Word break
        if let Some(pos) = window.iter().rposition(|c| c.is_whitespace()) {
            return window_start + pos + 1;
        }

        end
    }

    /// Where the next chunk starts: `overlap` chars before the cut, moved
    /// forward to a word start when that lands mid-word.
    fn next_start(&self, chars: &[char], start: usize, cut: usize) -> usize {
        let mut next = cut.saturating_sub(self.config.overlap_chars);
        if next <= start {
            return cut;
        }

        let mid_word = !chars[next - 1].is_whitespace() && !chars[next].is_whitespace();
        if mid_word {
            if let Some(offset) = chars[next..cut].iter().position(|c| c.is_whitespace()) {
                next += offset + 1;
            }
        }

        next
    }

    /// Chunk a single page
    pub fn chunk_page(&self, page: &Page) -> Vec<Chunk> {
        let text_chunks = self.chunk_text(&page.text);
        let total_chunks = text_chunks.len();

        text_chunks
            .into_iter()
            .enumerate()
            .map(|(i, text)| Chunk {
                text,
                page_number: page.number,
                chunk_index: i,
                total_chunks,
            })
            .collect()
    }

    /// Chunk all pages, preserving page order
    pub fn chunk_pages(&self, pages: &[Page]) -> Vec<Chunk> {
        pages.iter().flat_map(|p| self.chunk_page(p)).collect()
    }
}

impl Default for PageChunker {
    fn default() -> Self {
        Self::new(ChunkerConfig::default())
    }
}
