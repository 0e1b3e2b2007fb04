//! Chunk extracted exam markdown into JSONL files.
//!
//! ```bash
//! exam-chunk "Computer Systems QP.md" "Computer Systems MS.md" --output-dir output
//! ```

use std::fs;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{info, warn};

use rubric::{jsonl, normalize, Chunker, RecursiveChunker, Settings, StructuralChunker};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Strategy {
    /// Question-aware structural chunking.
    Structural,
    /// Separator-based splitting with overlap.
    Recursive,
}

#[derive(Debug, Parser)]
#[command(name = "exam-chunk", about = "Chunk exam markdown into vector-store JSONL")]
struct Args {
    /// Markdown files produced by document extraction.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Directory for `<source>_chunks.jsonl` output.
    #[arg(long, env = "RUBRIC_OUTPUT_DIR")]
    output_dir: Option<PathBuf>,

    /// Source name for chunk ids (defaults to the file stem).
    #[arg(long)]
    source: Option<String>,

    /// Chunking strategy.
    #[arg(long, value_enum, default_value_t = Strategy::Structural)]
    strategy: Strategy,

    /// Skip answer-space clean-up.
    #[arg(long)]
    raw: bool,

    /// Settings file (TOML).
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = Args::parse();
    if args.source.is_some() && args.inputs.len() > 1 {
        bail!("--source can only be used with a single input file");
    }

    let settings = Settings::load(args.config.as_deref()).context("failed to load settings")?;
    let chunker: Box<dyn Chunker> = match args.strategy {
        Strategy::Structural => Box::new(StructuralChunker::new(settings.chunker)?),
        Strategy::Recursive => Box::new(RecursiveChunker::new(settings.splitter.clone())?),
    };

    let output_dir = args
        .output_dir
        .clone()
        .or(settings.output_dir)
        .unwrap_or_else(|| PathBuf::from("output"));
    fs::create_dir_all(&output_dir)
        .with_context(|| format!("failed to create {}", output_dir.display()))?;

    for input in &args.inputs {
        let source = match &args.source {
            Some(source) => source.clone(),
            None => source_name(input)?,
        };
        let out = chunk_file(chunker.as_ref(), input, &source, args.raw, &output_dir)?;
        info!("wrote {}", out.display());
    }

    Ok(())
}

fn source_name(path: &Path) -> Result<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(str::to_string)
        .with_context(|| format!("cannot derive a source name from {}", path.display()))
}

fn chunk_file(
    chunker: &dyn Chunker,
    input: &Path,
    source: &str,
    raw: bool,
    output_dir: &Path,
) -> Result<PathBuf> {
    info!("processing {}", input.display());
    let md = fs::read_to_string(input).with_context(|| format!("failed to read {}", input.display()))?;
    let md = if raw { md } else { normalize::prepare(&md) };

    let chunks = chunker.chunk(source, &md);
    if chunks.is_empty() {
        warn!("{} produced no chunks", input.display());
    }

    let out_path = output_dir.join(format!("{source}_chunks.jsonl"));
    let file = fs::File::create(&out_path)
        .with_context(|| format!("failed to create {}", out_path.display()))?;
    let written = jsonl::write_jsonl(&chunks, BufWriter::new(file))?;
    info!("generated {written} vector-ready chunks for {source}");

    Ok(out_path)
}
