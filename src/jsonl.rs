//! Newline-delimited JSON for chunk streams.
//!
//! One chunk per line, in emission order, in the shape vector-store
//! indexers expect:
//!
//! ```text
//! {"id":"qp_text_0000","text":"1. What is TCP? [4 marks]\nIt is a protocol.","metadata":{"source":"qp","type":"text","question":"1","subpart":null,"marks":4}}
//! ```

use std::io::{BufRead, Write};

use crate::{Chunk, Error, Result};

/// Write `chunks` to `writer`, one compact JSON object per line.
///
/// Returns the number of records written.
///
/// # Errors
///
/// Fails on serialization or I/O errors.
pub fn write_jsonl<'a, W, I>(chunks: I, mut writer: W) -> Result<usize>
where
    W: Write,
    I: IntoIterator<Item = &'a Chunk>,
{
    let mut count = 0;
    for chunk in chunks {
        serde_json::to_writer(&mut writer, chunk)?;
        writer.write_all(b"\n")?;
        count += 1;
    }
    writer.flush()?;
    Ok(count)
}

/// Read chunk records back from a JSONL stream.
///
/// Blank lines are skipped. Line spans are not part of the record and
/// come back empty.
///
/// # Errors
///
/// [`Error::Jsonl`] with the 1-based line number for a malformed record,
/// [`Error::Io`] for read failures.
pub fn read_jsonl<R: BufRead>(reader: R) -> Result<Vec<Chunk>> {
    let mut chunks = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let chunk = serde_json::from_str(&line).map_err(|source| Error::Jsonl {
            line: index + 1,
            source,
        })?;
        chunks.push(chunk);
    }
    Ok(chunks)
}

/// Serialize chunks into a JSONL string.
///
/// # Errors
///
/// Fails only if serialization fails.
pub fn to_jsonl_string(chunks: &[Chunk]) -> Result<String> {
    let mut out = String::new();
    for chunk in chunks {
        out.push_str(&serde_json::to_string(chunk)?);
        out.push('\n');
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ChunkKind, ChunkMetadata};

    fn sample() -> Chunk {
        Chunk {
            id: "qp_text_0000".into(),
            text: "1. What is TCP? [4 marks]\nIt is a protocol.".into(),
            metadata: ChunkMetadata {
                source: "qp".into(),
                kind: ChunkKind::Text,
                question: Some("1".into()),
                subpart: None,
                marks: Some(4),
            },
            lines: 0..2,
        }
    }

    #[test]
    fn test_record_shape() {
        let out = to_jsonl_string(&[sample()]).unwrap();
        assert!(out.ends_with('\n'));
        assert_eq!(out.lines().count(), 1);

        let value: serde_json::Value = serde_json::from_str(out.trim_end()).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 3);
        assert_eq!(value["id"], "qp_text_0000");
        assert_eq!(value["metadata"]["type"], "text");
        assert_eq!(value["metadata"]["question"], "1");
        assert!(value["metadata"]["subpart"].is_null());
        assert_eq!(value["metadata"]["marks"], 4);
        assert_eq!(value["metadata"]["source"], "qp");
    }

    #[test]
    fn test_malformed_line_reports_position() {
        let good = to_jsonl_string(&[sample()]).unwrap();
        let input = format!("{good}\n{{\"id\": 3}}\n");
        match read_jsonl(input.as_bytes()) {
            Err(Error::Jsonl { line, .. }) => assert_eq!(line, 3),
            other => panic!("expected a JSONL error, got {other:?}"),
        }
    }

    #[test]
    fn test_read_skips_blank_lines() {
        let good = to_jsonl_string(&[sample(), sample()]).unwrap();
        let input = format!("\n{good}\n\n");
        let chunks = read_jsonl(input.as_bytes()).unwrap();
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].lines, 0..0);
        assert_eq!(chunks[0].metadata, sample().metadata);
    }
}
