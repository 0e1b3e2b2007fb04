//! Recursive character splitting with overlap (LangChain-style).
//!
//! The fallback when a document has no usable structure: no question
//! headings, no tables, just a wall of extracted text.
//!
//! ## The Algorithm
//!
//! Given separators `["\n\n", "\n", " ", ""]`, size `1000`, overlap `200`:
//!
//! ```text
//! 1. Split on "\n\n" (paragraphs), keeping each separator on its piece
//! 2. Any piece > 1000 bytes? Split that piece on "\n"
//! 3. Still too big? Split on " "
//! 4. Still too big? Split between graphemes ("")
//! 5. Merge pieces greedily up to 1000 bytes; when a chunk closes, the
//!    trailing pieces totalling <= 200 bytes open the next one
//! ```
//!
//! Unlike the structural chunker this knows nothing about questions: every
//! chunk is `text` with empty question context.

use std::collections::VecDeque;
use std::ops::Range;

use unicode_segmentation::UnicodeSegmentation;

use crate::{Chunk, ChunkKind, ChunkMetadata, Chunker, ChunkerConfig, Result, SplitterConfig};

/// Recursive splitter with overlap.
///
/// ## Example
///
/// ```rust
/// use rubric::{Chunker, RecursiveChunker, SplitterConfig};
///
/// let chunker = RecursiveChunker::new(SplitterConfig::new(40, 10)?)?;
/// let text = "Paragraph one is short.\n\nParagraph two is a little longer than that.";
/// let chunks = chunker.chunk("notes", text);
///
/// assert!(chunks.len() >= 2);
/// assert!(chunks.iter().all(|c| c.len() <= 40));
/// # Ok::<(), rubric::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct RecursiveChunker {
    config: SplitterConfig,
}

impl RecursiveChunker {
    /// Create a splitter from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` does not validate.
    pub fn new(config: SplitterConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The configuration in use.
    #[must_use]
    pub fn config(&self) -> &SplitterConfig {
        &self.config
    }

    /// Split `range` of `text` into contiguous pieces no larger than the
    /// chunk size, trying separators from `sep_index` on.
    fn split_recursive(&self, text: &str, range: Range<usize>, sep_index: usize) -> Vec<Range<usize>> {
        if range.len() <= self.config.size {
            return vec![range];
        }
        let Some(sep) = self.config.separators.get(sep_index) else {
            return self.force_split(text, range);
        };
        if sep.is_empty() {
            return self.force_split(text, range);
        }

        let slice = &text[range.clone()];
        let parts: Vec<&str> = slice.split_inclusive(sep.as_str()).collect();
        if parts.len() == 1 {
            // Separator not found, try next one
            return self.split_recursive(text, range, sep_index + 1);
        }

        let mut pieces = Vec::new();
        let mut offset = range.start;
        for part in parts {
            let piece = offset..offset + part.len();
            offset = piece.end;
            if piece.len() <= self.config.size {
                pieces.push(piece);
            } else {
                pieces.extend(self.split_recursive(text, piece, sep_index + 1));
            }
        }
        pieces
    }

    /// Split at grapheme boundaries when no separator works.
    ///
    /// A single grapheme larger than the chunk size becomes its own piece.
    fn force_split(&self, text: &str, range: Range<usize>) -> Vec<Range<usize>> {
        let mut pieces = Vec::new();
        let mut start = range.start;
        let mut end = range.start;

        for (offset, grapheme) in text[range.clone()].grapheme_indices(true) {
            let g_start = range.start + offset;
            let g_end = g_start + grapheme.len();
            if g_end - start > self.config.size && end > start {
                pieces.push(start..end);
                start = end;
            }
            end = g_end;
        }
        if end > start {
            pieces.push(start..end);
        }
        pieces
    }

    /// Merge pieces into chunk ranges, carrying up to `overlap` bytes of
    /// trailing pieces into each following chunk.
    fn merge(&self, pieces: Vec<Range<usize>>) -> Vec<Range<usize>> {
        let size = self.config.size;
        let overlap = self.config.overlap;
        let mut windows = Vec::new();
        let mut window: VecDeque<Range<usize>> = VecDeque::new();
        let mut total = 0;

        for piece in pieces {
            let len = piece.len();
            if !window.is_empty() && total + len > size {
                windows.push(span(&window));
                while let Some(front) = window.front() {
                    if total > overlap || (total + len > size && total > 0) {
                        total -= front.len();
                        window.pop_front();
                    } else {
                        break;
                    }
                }
            }
            total += len;
            window.push_back(piece);
        }
        if !window.is_empty() {
            windows.push(span(&window));
        }
        windows
    }
}

fn span(window: &VecDeque<Range<usize>>) -> Range<usize> {
    let start = window.front().map_or(0, |r| r.start);
    let end = window.back().map_or(start, |r| r.end);
    start..end
}

/// Zero-based line indices touched by a byte range.
fn line_span(text: &str, range: &Range<usize>) -> Range<usize> {
    let first = text[..range.start].matches('\n').count();
    let last = first + text[range.clone()].trim_end_matches('\n').matches('\n').count();
    first..last + 1
}

impl Chunker for RecursiveChunker {
    fn chunk(&self, source: &str, text: &str) -> Vec<Chunk> {
        if text.trim().is_empty() {
            return vec![];
        }

        let pieces = self.split_recursive(text, 0..text.len(), 0);
        let width = ChunkerConfig::new().id_width;

        let mut chunks = Vec::with_capacity(self.estimate_chunks(text.len()));
        for range in self.merge(pieces) {
            let trimmed = text[range.clone()].trim();
            if trimmed.is_empty() {
                continue;
            }
            chunks.push(Chunk {
                id: Chunk::format_id(source, ChunkKind::Text, chunks.len(), width),
                text: trimmed.to_string(),
                metadata: ChunkMetadata {
                    source: source.to_string(),
                    kind: ChunkKind::Text,
                    question: None,
                    subpart: None,
                    marks: None,
                },
                lines: line_span(text, &range),
            });
        }
        tracing::debug!(source, chunks = chunks.len(), "recursive split complete");
        chunks
    }

    fn estimate_chunks(&self, text_len: usize) -> usize {
        (text_len / (self.config.size - self.config.overlap)).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunker(size: usize, overlap: usize) -> RecursiveChunker {
        RecursiveChunker::new(SplitterConfig::new(size, overlap).unwrap()).unwrap()
    }

    #[test]
    fn test_paragraph_split() {
        let text = "Short.\n\nThis is a longer paragraph that might need splitting into smaller pieces.";
        let chunks = chunker(50, 0).chunk("doc", text);

        assert!(chunks.len() >= 2);
        assert!(chunks[0].text.contains("Short"));
    }

    #[test]
    fn test_respects_max_size() {
        let text = "The quick brown fox jumps over the lazy dog.";
        for chunk in chunker(20, 5).chunk("doc", text) {
            assert!(chunk.len() <= 20, "Chunk too large: {} bytes", chunk.len());
        }
    }

    #[test]
    fn test_overlap_carries_context() {
        let text = "alpha beta gamma delta epsilon zeta eta theta";
        let chunks = chunker(20, 8).chunk("doc", text);
        assert!(chunks.len() >= 2);
        for pair in chunks.windows(2) {
            let last_word = pair[0].text.split_whitespace().last().unwrap();
            assert!(
                pair[1].text.starts_with(last_word),
                "{:?} does not continue {:?}",
                pair[1].text,
                pair[0].text
            );
        }
    }

    #[test]
    fn test_no_overlap_when_zero() {
        let text = "one two three four five six seven eight nine ten";
        let chunks = chunker(12, 0).chunk("doc", text);
        let rejoined: Vec<&str> = chunks.iter().flat_map(|c| c.text.split_whitespace()).collect();
        assert_eq!(rejoined, text.split_whitespace().collect::<Vec<_>>());
    }

    #[test]
    fn test_empty_text() {
        assert!(chunker(100, 10).chunk("doc", "").is_empty());
        assert!(chunker(100, 10).chunk("doc", " \n\n ").is_empty());
    }

    #[test]
    fn test_small_text_single_chunk() {
        let chunks = chunker(100, 10).chunk("doc", "Small text.");
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].id, "doc_text_0000");
        assert_eq!(chunks[0].lines, 0..1);
        assert_eq!(chunks[0].metadata.question, None);
    }

    #[test]
    fn test_unicode_force_split() {
        let text = "日本語日本語日本語日本語";
        let chunks = chunker(7, 0).chunk("doc", text);
        for chunk in &chunks {
            assert!(chunk.len() <= 7);
        }
        let rejoined: String = chunks.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(rejoined, text);
    }

    #[test]
    fn test_line_span() {
        let text = "a\nb\nc\nd";
        assert_eq!(line_span(text, &(0..2)), 0..1);
        assert_eq!(line_span(text, &(2..5)), 1..3);
        assert_eq!(line_span(text, &(6..7)), 3..4);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = SplitterConfig {
            size: 10,
            overlap: 20,
            separators: vec![" ".into()],
        };
        assert!(RecursiveChunker::new(config).is_err());
    }
}
