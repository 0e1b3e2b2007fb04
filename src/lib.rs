//! # rubric
//!
//! Structure-aware chunking of exam papers and marking schemes for
//! retrieval-augmented grading.
//!
//! ## The Problem
//!
//! A grading prompt for "Question 3(b)" needs the question text for 3(b)
//! and the marking scheme for 3(b). Nothing else. Semantic search alone
//! cannot guarantee that: "explain two advantages of caching" reads much
//! the same in question 3 as in question 7.
//!
//! So every chunk must know where it came from. And the usual splitters
//! make that hard:
//!
//! - A fixed-size window cuts a marking-scheme table in half
//! - A code answer split mid-block is useless to the grader
//! - "[4 marks]" stated on the heading line is lost to the chunk holding
//!   the rest of the question
//!
//! ## Structural Chunking
//!
//! [`StructuralChunker`] scans the extracted markdown once, line by line,
//! tracking two things:
//!
//! ```text
//! Input line                        Regime     Context (question/subpart/marks)
//! ───────────────────────────────── ────────── ────────────────────────────────
//! 1. What is TCP? [4 marks]         PlainText  1 / - / 4       <- new chunk
//! It is a protocol.                 PlainText  1 / - / 4
//! | 2 | (a) | Explain UDP |         Table      2 / a / 4       <- new chunk
//! ```python                         CodeBlock  2 / a / 4       <- new chunk
//! print("| not a table |")          CodeBlock  2 / a / 4
//! ```                               CodeBlock  2 / a / 4       <- closes chunk
//! 3.                                PlainText  3 / - / -       <- new chunk, reset
//! ```
//!
//! - **Regime**: fenced code and tables are atomic. They are never split
//!   and never mixed with prose.
//! - **Sticky context**: question, subpart and marks carry forward until
//!   the text overrides them. A bare new question clears subpart and
//!   marks so nothing leaks from question 1 into question 2.
//! - **Flush points**: regime changes, a new question heading in prose,
//!   end of input. Nothing else.
//!
//! Tiny text fragments (page numbers, stray `|`) are dropped. Code and
//! tables never are.
//!
//! ## Recursive Fallback
//!
//! [`RecursiveChunker`] is the structure-blind alternative: separator
//! hierarchy, size limit, overlap. Use it for documents with no question
//! numbering at all.
//!
//! ## Quick Start
//!
//! ```rust
//! use rubric::{jsonl, Chunker, StructuralChunker};
//!
//! let md = "1. What is TCP? [4 marks]\n\
//!           It is a protocol.\n\
//!           | 2 | (a) | Explain UDP |";
//!
//! let chunker = StructuralChunker::default();
//! let chunks = chunker.chunk("computer_systems_qp", md);
//!
//! assert_eq!(chunks[0].id, "computer_systems_qp_text_0000");
//! assert_eq!(chunks[1].id, "computer_systems_qp_table_0001");
//!
//! // One JSON object per line, ready for a vector-store upsert.
//! let out = jsonl::to_jsonl_string(&chunks).unwrap();
//! assert_eq!(out.lines().count(), 2);
//! ```
//!
//! ## Chunk Records
//!
//! | Field | Meaning |
//! |-------|---------|
//! | `id` | `{source}_{type}_{seq}`, deterministic, the upsert key |
//! | `text` | Trimmed chunk text |
//! | `metadata.source` | Document identifier |
//! | `metadata.type` | `text`, `code` or `table` |
//! | `metadata.question` | Question number or `null` |
//! | `metadata.subpart` | Subpart token or `null` |
//! | `metadata.marks` | Marks available or `null` |

mod assembler;
mod chunk;
mod config;
mod error;
mod recursive;
mod structural;
mod tracker;

pub mod classify;
pub mod jsonl;
pub mod normalize;
pub mod patterns;

pub use chunk::{Chunk, ChunkKind, ChunkMetadata};
pub use crate::config::{ChunkerConfig, Settings, SplitterConfig};
pub use error::{Error, Result};
pub use recursive::RecursiveChunker;
pub use structural::StructuralChunker;
pub use tracker::{Evidence, StickyMetadata};

/// A chunking strategy.
///
/// Chunkers hold no per-document state, so one instance can serve many
/// documents, including from several threads at once:
///
/// ```rust
/// use rubric::{Chunker, RecursiveChunker, StructuralChunker, SplitterConfig};
///
/// fn index(chunker: &dyn Chunker, source: &str, md: &str) -> usize {
///     chunker.chunk(source, md).len()
/// }
///
/// let md = "1. Define bandwidth.\nThe maximum data rate of a link.";
/// let structural = StructuralChunker::default();
/// let fallback = RecursiveChunker::new(SplitterConfig::default()).unwrap();
///
/// assert_eq!(index(&structural, "qp", md), 1);
/// assert_eq!(index(&fallback, "qp", md), 1);
/// ```
pub trait Chunker: Send + Sync {
    /// Split `text` from document `source` into chunks, in document order.
    ///
    /// Total over any input: malformed structure degrades to fewer, larger
    /// chunks, never to an error.
    fn chunk(&self, source: &str, text: &str) -> Vec<Chunk>;

    /// Estimate the number of chunks for a given text length.
    ///
    /// Useful for pre-allocation. May be approximate.
    fn estimate_chunks(&self, text_len: usize) -> usize {
        // Conservative default
        (text_len / 500).max(1)
    }
}
