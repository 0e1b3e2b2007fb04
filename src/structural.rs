//! Structure-aware chunking of exam papers and marking schemes.
//!
//! ## The Scan
//!
//! One forward pass over the lines, no backtracking. For each line:
//!
//! ```text
//!   classify(line, regime) ──► regime transition?
//!            │                      │ yes: flush the buffer under the old regime
//!            ▼                      ▼
//!   Evidence::scan(line) ──► new question heading in plain text?
//!            │                      │ yes: flush under the old context
//!            ▼                      ▼
//!   StickyMetadata::apply ──► buffer.push(line) ──► closing fence? flush as code
//! ```
//!
//! At end of input the buffer is flushed once more, as whatever kind the
//! active regime implies (an unterminated fence still yields a code chunk).
//!
//! ## Guarantees
//!
//! - A fenced block or a run of table rows always lands in exactly one
//!   chunk, never split and never mixed with surrounding text.
//! - Every chunk carries the question context in force when it closed.
//! - Chunk ids are deterministic: same input, same source, same ids.

use tracing::{debug, trace};

use crate::assembler::ChunkAssembler;
use crate::classify::{classify, Regime};
use crate::tracker::{Evidence, StickyMetadata};
use crate::{Chunk, Chunker, ChunkerConfig, Result};

/// The structural chunking engine.
///
/// ## Example
///
/// ```rust
/// use rubric::{ChunkKind, Chunker, StructuralChunker};
///
/// let md = "1. What is TCP? [4 marks]\nIt is a protocol.\n| 2 | (a) | Explain UDP |";
/// let chunks = StructuralChunker::default().chunk("qp", md);
///
/// assert_eq!(chunks.len(), 2);
/// assert_eq!(chunks[0].kind(), ChunkKind::Text);
/// assert_eq!(chunks[0].metadata.question.as_deref(), Some("1"));
/// assert_eq!(chunks[0].metadata.marks, Some(4));
/// assert_eq!(chunks[1].kind(), ChunkKind::Table);
/// assert_eq!(chunks[1].metadata.question.as_deref(), Some("2"));
/// assert_eq!(chunks[1].metadata.subpart.as_deref(), Some("a"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct StructuralChunker {
    config: ChunkerConfig,
}

impl StructuralChunker {
    /// Create a chunker with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration does not validate.
    pub fn new(config: ChunkerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The configuration in use.
    #[must_use]
    pub fn config(&self) -> &ChunkerConfig {
        &self.config
    }
}

impl Chunker for StructuralChunker {
    fn chunk(&self, source: &str, text: &str) -> Vec<Chunk> {
        let mut scan = Scan::new(source, &self.config);
        for (index, line) in text.lines().enumerate() {
            scan.step(index, line);
        }
        let chunks = scan.finish();
        debug!(source, chunks = chunks.len(), "structural scan complete");
        chunks
    }

    fn estimate_chunks(&self, text_len: usize) -> usize {
        // Exam questions run a few hundred bytes.
        (text_len / 300).max(1)
    }
}

/// State of one scan over one document.
struct Scan<'a> {
    regime: Regime,
    meta: StickyMetadata,
    assembler: ChunkAssembler<'a>,
}

impl<'a> Scan<'a> {
    fn new(source: &'a str, config: &'a ChunkerConfig) -> Self {
        Self {
            regime: Regime::PlainText,
            meta: StickyMetadata::default(),
            assembler: ChunkAssembler::new(source, config),
        }
    }

    fn step(&mut self, index: usize, line: &'a str) {
        let prev = self.regime;
        let class = classify(line, prev);
        if class.next != prev {
            trace!(line = index, from = ?prev, to = ?class.next, "regime transition");
        }

        match (prev, class.next) {
            (Regime::CodeBlock, next) => {
                self.meta.apply(&Evidence::scan(line, Regime::CodeBlock));
                self.assembler.push(index, line);
                if class.fence_toggle {
                    self.flush(Regime::CodeBlock);
                }
                self.regime = next;
            }
            (_, Regime::CodeBlock) => {
                self.flush(prev);
                self.meta.apply(&Evidence::scan(line, Regime::CodeBlock));
                self.assembler.push(index, line);
                self.regime = Regime::CodeBlock;
            }
            (Regime::Table, Regime::Table) => {
                self.meta.apply(&Evidence::scan(line, Regime::Table));
                self.assembler.push(index, line);
            }
            (Regime::PlainText, Regime::Table) => {
                self.flush(Regime::PlainText);
                self.meta.apply(&Evidence::scan(line, Regime::Table));
                self.assembler.push(index, line);
                self.regime = Regime::Table;
            }
            (Regime::Table, Regime::PlainText) => {
                self.flush(Regime::Table);
                self.regime = Regime::PlainText;
                self.plain_line(index, line);
            }
            (Regime::PlainText, Regime::PlainText) => self.plain_line(index, line),
        }
    }

    fn plain_line(&mut self, index: usize, line: &'a str) {
        let evidence = Evidence::scan(line, Regime::PlainText);
        if evidence.names_question() {
            self.flush(Regime::PlainText);
        }
        self.meta.apply(&evidence);
        self.assembler.push(index, line);
    }

    fn flush(&mut self, regime: Regime) {
        self.assembler.flush(regime.chunk_kind(), &self.meta);
    }

    fn finish(mut self) -> Vec<Chunk> {
        self.flush(self.regime);
        self.assembler.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ChunkKind;

    fn chunk(text: &str) -> Vec<Chunk> {
        StructuralChunker::default().chunk("doc", text)
    }

    fn kinds(chunks: &[Chunk]) -> Vec<ChunkKind> {
        chunks.iter().map(Chunk::kind).collect()
    }

    #[test]
    fn test_empty_input() {
        assert!(chunk("").is_empty());
        assert!(chunk("\n\n   \n").is_empty());
    }

    #[test]
    fn test_code_block_kept_whole() {
        let text = "Intro paragraph here.\n```python\n| a | b |\n1. not a heading\n```\nAfter the code.";
        let chunks = chunk(text);
        assert_eq!(kinds(&chunks), vec![ChunkKind::Text, ChunkKind::Code, ChunkKind::Text]);
        assert_eq!(chunks[1].text, "```python\n| a | b |\n1. not a heading\n```");
        assert_eq!(chunks[1].lines, 1..5);
        assert_eq!(chunks[1].metadata.question, None);
    }

    #[test]
    fn test_unterminated_fence_flushes_as_code() {
        let chunks = chunk("Some text first.\n```\nx = 1");
        assert_eq!(kinds(&chunks), vec![ChunkKind::Text, ChunkKind::Code]);
        assert_eq!(chunks[1].text, "```\nx = 1");
    }

    #[test]
    fn test_unterminated_table_flushes_as_table() {
        let chunks = chunk("Header prose.\n| a | b |\n|---|---|");
        assert_eq!(kinds(&chunks), vec![ChunkKind::Text, ChunkKind::Table]);
        assert_eq!(chunks[1].lines, 1..3);
    }

    #[test]
    fn test_fence_directly_after_table() {
        let chunks = chunk("| a | b |\n```\ncode\n```");
        assert_eq!(kinds(&chunks), vec![ChunkKind::Table, ChunkKind::Code]);
        assert_eq!(chunks[0].text, "| a | b |");
    }

    #[test]
    fn test_new_heading_starts_new_chunk() {
        let chunks = chunk("1. First question text.\nMore of it.\n2. Second question text.");
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].text, "1. First question text.\nMore of it.");
        assert_eq!(chunks[0].metadata.question.as_deref(), Some("1"));
        assert_eq!(chunks[1].metadata.question.as_deref(), Some("2"));
    }

    #[test]
    fn test_heading_in_table_does_not_split_table() {
        let chunks = chunk("| 1 | a | x |\n| 2 | b | y |");
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].metadata.question.as_deref(), Some("2"));
        assert_eq!(chunks[0].metadata.subpart.as_deref(), Some("b"));
    }

    #[test]
    fn test_marks_inside_code_still_count() {
        let chunks = chunk("1. Write a loop.\n```\n# [5 marks]\n```\nExplain it please.");
        assert_eq!(chunks[1].metadata.marks, Some(5));
        assert_eq!(chunks[2].metadata.marks, Some(5));
        assert_eq!(chunks[2].metadata.question.as_deref(), Some("1"));
    }

    #[test]
    fn test_ids_sequence_across_kinds() {
        let chunks = chunk("Opening words.\n| a | b |\n```\nc\n```\nClosing words.");
        let ids: Vec<_> = chunks.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["doc_text_0000", "doc_table_0001", "doc_code_0002", "doc_text_0003"]
        );
    }

    #[test]
    fn test_custom_config() {
        let chunker = StructuralChunker::new(ChunkerConfig::new().with_min_text_len(1).with_id_width(2))
            .unwrap();
        let chunks = chunker.chunk("ms", "7");
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].id, "ms_text_00");
        assert!(StructuralChunker::new(ChunkerConfig::new().with_id_width(99)).is_err());
    }
}
