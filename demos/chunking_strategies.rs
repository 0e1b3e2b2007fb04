//! Chunking Strategies Comparison
//!
//! Structural versus recursive chunking on the same marking scheme.
//!
//! ```bash
//! cargo run --example chunking_strategies
//! ```

use rubric::{normalize, Chunker, RecursiveChunker, SplitterConfig, StructuralChunker};

fn main() -> rubric::Result<()> {
    println!("Exam Chunking Strategies");
    println!("========================\n");

    let scheme = r"## Question 1

1(a) Define throughput. [2 marks]
..............................................
..............................................

The rate of successful delivery over a channel.

| Question | Answer | Marks |
|----------|--------|-------|
| 1 | (b) | Accept any two valid points | 4 |

```python
def throughput(bits, seconds):
    return bits / seconds
```

Question 2

Award one mark per advantage, up to three.";

    let document = normalize::prepare(scheme);
    println!(
        "Document length: {} bytes ({} before clean-up)\n",
        document.len(),
        scheme.len()
    );

    // Strategy 1: structural
    println!("1. Structural Chunking");
    println!("   -------------------");
    println!("   Tables and code stay whole; each chunk carries its question.\n");

    let structural = StructuralChunker::default();
    for chunk in structural.chunk("ms", &document) {
        let preview = chunk.text.lines().next().unwrap_or_default();
        println!(
            "   [{}] lines {}..{} q={}: \"{}\"",
            chunk.id,
            chunk.lines.start,
            chunk.lines.end,
            chunk.metadata.question.as_deref().unwrap_or("-"),
            preview
        );
    }

    // Strategy 2: recursive
    println!("\n2. Recursive Chunking");
    println!("   ------------------");
    println!("   Paragraph -> line -> word splits with overlap. No question context.\n");

    let recursive = RecursiveChunker::new(SplitterConfig::new(160, 40)?)?;
    let chunks = recursive.chunk("ms", &document);
    for chunk in &chunks {
        let preview = chunk.text.chars().take(50).collect::<String>();
        println!("   [{}] {} bytes: \"{}...\"", chunk.id, chunk.len(), preview);
    }

    if chunks.iter().any(|c| c.text.contains("```") && !c.text.ends_with("```")) {
        println!("\n   Note: a code block was cut mid-way. This is the trade-off.");
    }

    Ok(())
}
