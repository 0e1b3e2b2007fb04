//! Benchmarks for exam chunking strategies.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rubric::{normalize, Chunker, RecursiveChunker, SplitterConfig, StructuralChunker};

fn sample_exam(size: usize) -> String {
    // Cycle through one question's worth of mixed structure
    let mut text = String::with_capacity(size + 512);
    let mut q = 1;
    while text.len() < size {
        text.push_str(&format!(
            "{q}. Explain the role of a cache in a processor. [6 marks]\n\
             \n\
             {q}(a) Define cache hit ratio. [2 marks]\n\
             The fraction of accesses served by the cache.\n\
             ..............................................\n\
             \n\
             | {q} | (b) | Accept any two valid points | 4 |\n\
             |---|-----|-----------------------------|---|\n\
             \n\
             ```python\n\
             hits = sum(1 for a in trace if a in cache)\n\
             ```\n\
             \n"
        ));
        q += 1;
    }
    text
}

fn bench_structural_chunker(c: &mut Criterion) {
    let mut group = c.benchmark_group("structural_chunker");

    for size in [1_000, 10_000, 100_000] {
        let text = sample_exam(size);
        let chunker = StructuralChunker::default();

        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::new("structural", size), &text, |b, text| {
            b.iter(|| chunker.chunk("bench", black_box(text)))
        });
    }

    group.finish();
}

fn bench_recursive_chunker(c: &mut Criterion) {
    let mut group = c.benchmark_group("recursive_chunker");

    for size in [1_000, 10_000, 100_000] {
        let text = sample_exam(size);
        let chunker = RecursiveChunker::new(SplitterConfig::default()).unwrap();

        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::new("recursive", size), &text, |b, text| {
            b.iter(|| chunker.chunk("bench", black_box(text)))
        });
    }

    group.finish();
}

fn bench_normalize(c: &mut Criterion) {
    let text = sample_exam(100_000);
    let mut group = c.benchmark_group("normalize");
    group.throughput(Throughput::Bytes(text.len() as u64));
    group.bench_function("prepare", |b| b.iter(|| normalize::prepare(black_box(&text))));
    group.finish();
}

criterion_group!(
    benches,
    bench_structural_chunker,
    bench_recursive_chunker,
    bench_normalize
);
criterion_main!(benches);
