//! Basic Exam Chunking
//!
//! The minimal example: chunk an exam paper for embedding.
//!
//! ```bash
//! cargo run --example 01_basic_chunking
//! ```

use rubric::{Chunker, StructuralChunker};

fn main() {
    let paper = "1. What is TCP? [4 marks]\n\
        It is a connection-oriented transport protocol.\n\
        | 2 | (a) | Explain UDP |\n\
        | 2 | (b) | Give one use of UDP |\n\
        3. Name two layers of the OSI model. [2 marks]";

    let chunker = StructuralChunker::default();
    let chunks = chunker.chunk("networks_qp", paper);

    println!("Document: {} lines", paper.lines().count());
    println!("Chunks: {}\n", chunks.len());

    for chunk in &chunks {
        let meta = &chunk.metadata;
        println!(
            "[{}] q={} sub={} marks={}",
            chunk.id,
            meta.question.as_deref().unwrap_or("-"),
            meta.subpart.as_deref().unwrap_or("-"),
            meta.marks.map_or_else(|| "-".to_string(), |m| m.to_string()),
        );
        println!("    {:?}", chunk.text);
    }

    // Every chunk knows which question it belongs to, so a grader can
    // filter retrieval to "question 2" before ranking by similarity.
}
