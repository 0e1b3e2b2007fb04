//! The Chunk type: a retrieval-ready piece of an exam document.

use std::fmt;
use std::ops::Range;

use serde::{Deserialize, Serialize};

/// The structural kind of a chunk.
///
/// Serialized lowercase (`"text"`, `"code"`, `"table"`), which is also the
/// form used inside chunk ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChunkKind {
    /// Running prose, question stems, answers.
    Text,
    /// A fenced code block, fences included.
    Code,
    /// A contiguous run of markdown table rows.
    Table,
}

impl ChunkKind {
    /// The lowercase name used in ids and serialized metadata.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Code => "code",
            Self::Table => "table",
        }
    }

    /// Whether chunks of this kind bypass the minimum-length noise filter.
    ///
    /// Code and tables are emitted whole no matter how short they are.
    #[must_use]
    pub const fn is_structural(self) -> bool {
        matches!(self, Self::Code | Self::Table)
    }
}

impl fmt::Display for ChunkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Positional metadata attached to every chunk.
///
/// `question`, `subpart` and `marks` are the sticky context in force when
/// the chunk was closed. Vector stores filter on `source` and `question`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkMetadata {
    /// Identifier of the document the chunk came from.
    pub source: String,
    /// Structural kind.
    #[serde(rename = "type")]
    pub kind: ChunkKind,
    /// Question number, e.g. `"3"`.
    pub question: Option<String>,
    /// Subpart token, e.g. `"a"` or `"b(i)"`.
    pub subpart: Option<String>,
    /// Marks available, from a `[4 marks]` style declaration.
    pub marks: Option<u32>,
}

/// A chunk of an exam paper or marking scheme, ready to embed and upsert.
///
/// ## Ids
///
/// `id` is `{source}_{type}_{seq}` with `seq` zero-padded. It is unique
/// within one scan and identical across scans of identical input, so a
/// store can use it as an idempotent upsert key:
///
/// ```rust
/// use rubric::{Chunk, ChunkKind};
///
/// assert_eq!(Chunk::format_id("paper1", ChunkKind::Table, 7, 4), "paper1_table_0007");
/// ```
///
/// ## Line Spans
///
/// `lines` is the half-open range of zero-based input line indices the
/// chunk was assembled from, before trimming. It is not part of the
/// serialized record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// Unique, deterministic chunk id.
    pub id: String,
    /// Trimmed chunk text.
    pub text: String,
    /// Source, kind and sticky question context.
    pub metadata: ChunkMetadata,
    /// Input line indices covered by this chunk.
    #[serde(skip)]
    pub lines: Range<usize>,
}

impl Chunk {
    /// Build a chunk id from its parts.
    #[must_use]
    pub fn format_id(source: &str, kind: ChunkKind, seq: usize, width: usize) -> String {
        format!("{source}_{kind}_{seq:0width$}")
    }

    /// The structural kind of this chunk.
    #[must_use]
    pub fn kind(&self) -> ChunkKind {
        self.metadata.kind
    }

    /// The length of the chunk text in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Whether the chunk text is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl fmt::Display for Chunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Chunk {{ id: {}, lines: {}..{}, question: {}, len: {} }}",
            self.id,
            self.lines.start,
            self.lines.end,
            self.metadata.question.as_deref().unwrap_or("-"),
            self.len()
        )
    }
}
