//! Line classification: which structural regime a line belongs to.
//!
//! ## Regimes
//!
//! Every line of the input lives in exactly one of three regimes:
//!
//! ```text
//! Some prose about question 1.          PlainText
//! ```python                             CodeBlock  (opening fence)
//! | not | a | table |                   CodeBlock  (fences are opaque)
//! ```                                   CodeBlock  -> PlainText after this line
//! | Q | Part | Answer |                  Table
//! |---|------|--------|                  Table
//! Back to prose.                        PlainText
//! ```
//!
//! Classification is purely structural. Question numbers and marks are
//! the tracker's business.

use crate::ChunkKind;

/// The structural regime active at a point of the scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Regime {
    /// Ordinary text.
    #[default]
    PlainText,
    /// Inside a fenced code block.
    CodeBlock,
    /// Inside a run of table rows.
    Table,
}

impl Regime {
    /// The chunk kind a buffer accumulated under this regime flushes as.
    #[must_use]
    pub const fn chunk_kind(self) -> ChunkKind {
        match self {
            Self::PlainText => ChunkKind::Text,
            Self::CodeBlock => ChunkKind::Code,
            Self::Table => ChunkKind::Table,
        }
    }
}

/// Result of classifying one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    /// Regime in force after this line.
    pub next: Regime,
    /// Whether the line is a code fence that opened or closed a block.
    pub fence_toggle: bool,
}

/// Classify `line` given the regime active before it.
///
/// - Inside a code block everything is code; a fence line closes the
///   block (`next == PlainText`) but still belongs to it.
/// - Outside, a fence line opens a block, a table row enters or continues
///   a table, and anything else is plain text.
///
/// ```rust
/// use rubric::classify::{classify, Regime};
///
/// let c = classify("```rust", Regime::PlainText);
/// assert_eq!(c.next, Regime::CodeBlock);
/// assert!(c.fence_toggle);
///
/// let c = classify("| a | b |", Regime::CodeBlock);
/// assert_eq!(c.next, Regime::CodeBlock);
/// ```
#[must_use]
pub fn classify(line: &str, current: Regime) -> Classification {
    if is_fence(line) {
        let next = match current {
            Regime::CodeBlock => Regime::PlainText,
            Regime::PlainText | Regime::Table => Regime::CodeBlock,
        };
        return Classification {
            next,
            fence_toggle: true,
        };
    }

    let next = match current {
        Regime::CodeBlock => Regime::CodeBlock,
        _ if is_table_row(line) => Regime::Table,
        _ => Regime::PlainText,
    };
    Classification {
        next,
        fence_toggle: false,
    }
}

/// Whether `line` is a code fence: three or more backticks, optionally
/// followed by an info string (`python`, `python title="x.py"`).
#[must_use]
pub fn is_fence(line: &str) -> bool {
    let trimmed = line.trim();
    let ticks = trimmed.bytes().take_while(|&b| b == b'`').count();
    if ticks < 3 {
        return false;
    }
    // An info string may not contain backticks, otherwise this is inline code.
    let info = &trimmed[ticks..];
    !info.contains('`')
}

/// Whether `line` looks like a markdown table row.
///
/// After trimming, the line must start with `|` and either end with `|`
/// or split into more than two pipe-separated fields, which tolerates
/// ragged rows without a closing pipe.
#[must_use]
pub fn is_table_row(line: &str) -> bool {
    let trimmed = line.trim();
    if !trimmed.starts_with('|') {
        return false;
    }
    trimmed.ends_with('|') || trimmed.split('|').count() > 2
}
