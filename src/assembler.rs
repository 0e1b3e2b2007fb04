//! Line buffering, noise filtering and chunk emission.

use std::ops::Range;

use tracing::debug;
use unicode_segmentation::UnicodeSegmentation;

use crate::tracker::StickyMetadata;
use crate::{Chunk, ChunkKind, ChunkMetadata, ChunkerConfig};

/// Accumulates lines between flush points and turns them into chunks.
///
/// The buffer borrows lines from the input; nothing is copied until a
/// chunk is actually emitted.
#[derive(Debug)]
pub(crate) struct ChunkAssembler<'a> {
    source: &'a str,
    config: &'a ChunkerConfig,
    buffer: Vec<&'a str>,
    /// Index of the first buffered line.
    start: usize,
    seq: usize,
    chunks: Vec<Chunk>,
}

impl<'a> ChunkAssembler<'a> {
    pub(crate) fn new(source: &'a str, config: &'a ChunkerConfig) -> Self {
        Self {
            source,
            config,
            buffer: Vec::new(),
            start: 0,
            seq: 0,
            chunks: Vec::new(),
        }
    }

    /// Append line number `index` to the buffer.
    pub(crate) fn push(&mut self, index: usize, line: &'a str) {
        if self.buffer.is_empty() {
            self.start = index;
        }
        self.buffer.push(line);
    }

    /// Close the buffer as a chunk of `kind`.
    ///
    /// Empty buffers are a no-op. Text shorter than the configured minimum,
    /// or a lone `|`, is discarded unless `kind` is code or table. The
    /// buffer is cleared either way.
    pub(crate) fn flush(&mut self, kind: ChunkKind, meta: &StickyMetadata) {
        if self.buffer.is_empty() {
            return;
        }
        let lines = self.start..self.start + self.buffer.len();
        let joined = self.buffer.join("\n");
        self.buffer.clear();
        let text = joined.trim();

        if !kind.is_structural() && self.is_noise(text) {
            debug!(source = self.source, kind = %kind, ?lines, "discarded noise buffer");
            return;
        }
        self.emit(kind, text, lines, meta);
    }

    /// Chunks emitted so far, in emission order.
    pub(crate) fn finish(self) -> Vec<Chunk> {
        self.chunks
    }

    fn is_noise(&self, text: &str) -> bool {
        text == "|" || text.graphemes(true).count() < self.config.min_text_len
    }

    fn emit(&mut self, kind: ChunkKind, text: &str, lines: Range<usize>, meta: &StickyMetadata) {
        let id = Chunk::format_id(self.source, kind, self.seq, self.config.id_width);
        self.seq += 1;
        debug!(
            id = %id,
            ?lines,
            question = meta.question.as_deref(),
            subpart = meta.subpart.as_deref(),
            marks = meta.marks,
            "emitted chunk"
        );
        self.chunks.push(Chunk {
            id,
            text: text.to_string(),
            metadata: ChunkMetadata {
                source: self.source.to_string(),
                kind,
                question: meta.question.clone(),
                subpart: meta.subpart.clone(),
                marks: meta.marks,
            },
            lines,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(question: &str) -> StickyMetadata {
        StickyMetadata {
            question: Some(question.to_string()),
            ..StickyMetadata::default()
        }
    }

    #[test]
    fn test_empty_flush_is_noop() {
        let config = ChunkerConfig::default();
        let mut asm = ChunkAssembler::new("qp", &config);
        asm.flush(ChunkKind::Text, &meta("1"));
        assert!(asm.finish().is_empty());
    }

    #[test]
    fn test_short_text_discarded_without_consuming_id() {
        let config = ChunkerConfig::default();
        let mut asm = ChunkAssembler::new("qp", &config);
        asm.push(0, "  12 ");
        asm.flush(ChunkKind::Text, &meta("1"));
        asm.push(1, "A real sentence.");
        asm.flush(ChunkKind::Text, &meta("1"));
        let chunks = asm.finish();
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].id, "qp_text_0000");
        assert_eq!(chunks[0].lines, 1..2);
    }

    #[test]
    fn test_structural_kinds_skip_noise_filter() {
        let config = ChunkerConfig::default();
        let mut asm = ChunkAssembler::new("qp", &config);
        asm.push(0, "| |");
        asm.flush(ChunkKind::Table, &meta("1"));
        asm.push(1, "|");
        asm.flush(ChunkKind::Text, &meta("1"));
        let chunks = asm.finish();
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].kind(), ChunkKind::Table);
        assert_eq!(chunks[0].text, "| |");
    }

    #[test]
    fn test_join_and_trim() {
        let config = ChunkerConfig::default();
        let mut asm = ChunkAssembler::new("ms", &config);
        asm.push(4, "");
        asm.push(5, "  First line");
        asm.push(6, "second line  ");
        asm.push(7, "");
        asm.flush(ChunkKind::Text, &meta("2"));
        let chunks = asm.finish();
        assert_eq!(chunks[0].text, "First line\nsecond line");
        assert_eq!(chunks[0].lines, 4..8);
        assert_eq!(chunks[0].metadata.question.as_deref(), Some("2"));
    }

    #[test]
    fn test_min_len_counts_graphemes() {
        let config = ChunkerConfig::default();
        let mut asm = ChunkAssembler::new("qp", &config);
        // Four user-perceived characters, more than five bytes.
        asm.push(0, "日本語!");
        asm.flush(ChunkKind::Text, &meta("1"));
        assert!(asm.finish().is_empty());
    }
}
