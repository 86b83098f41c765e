//! Benchmarks for token-bounded chunking.

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use pagechunk::{ChunkerConfig, TextChunker};

fn sample_text(size: usize) -> String {
    // Generate realistic text with sentence structure
    let sentences = [
        "The quick brown fox jumps over the lazy dog. ",
        "Pack my box with five dozen liquor jugs. ",
        "How vexingly quick daft zebras jump! ",
        "The five boxing wizards jump quickly. ",
        "Sphinx of black quartz, judge my vow. ",
    ];
    let mut text = String::with_capacity(size);
    let mut i = 0;
    while text.len() < size {
        text.push_str(sentences[i % sentences.len()]);
        i += 1;
    }
    text.truncate(size);
    text
}

fn sample_pages(pages: usize, page_size: usize) -> Vec<(u32, String)> {
    (1..=pages as u32)
        .map(|n| (n, sample_text(page_size)))
        .collect()
}

fn bench_tiktoken_chunker(c: &mut Criterion) {
    let mut group = c.benchmark_group("tiktoken_chunker");
    let chunker = TextChunker::new(ChunkerConfig::new(500, 100)).unwrap();

    for size in [1_000, 10_000, 100_000] {
        let text = sample_text(size);

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("chunk_text", size), &text, |b, text| {
            b.iter(|| chunker.chunk_text(black_box(text), None));
        });
    }

    group.finish();
}

fn bench_word_counter_chunker(c: &mut Criterion) {
    let mut group = c.benchmark_group("word_counter_chunker");
    let words = |text: &str| text.split_whitespace().count();
    let chunker = TextChunker::with_counter(ChunkerConfig::new(200, 40), Arc::new(words)).unwrap();

    for size in [1_000, 10_000, 100_000] {
        let text = sample_text(size);

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("chunk_text", size), &text, |b, text| {
            b.iter(|| chunker.chunk_text(black_box(text), None));
        });
    }

    group.finish();
}

fn bench_oversized_sentence(c: &mut Criterion) {
    let mut group = c.benchmark_group("oversized_sentence");
    let chunker = TextChunker::new(ChunkerConfig::new(100, 20)).unwrap();

    for words in [500, 5_000] {
        // No terminators, so the whole text goes through the word fallback.
        let text = vec!["lorem"; words].join(" ");

        group.throughput(Throughput::Elements(words as u64));
        group.bench_with_input(BenchmarkId::new("split_long", words), &text, |b, text| {
            b.iter(|| chunker.chunk_text(black_box(text), None));
        });
    }

    group.finish();
}

fn bench_chunk_by_pages(c: &mut Criterion) {
    let mut group = c.benchmark_group("chunk_by_pages");
    let chunker = TextChunker::new(ChunkerConfig::new(500, 100)).unwrap();

    for pages in [10, 100] {
        let input = sample_pages(pages, 2_000);

        group.throughput(Throughput::Elements(pages as u64));
        group.bench_with_input(BenchmarkId::new("pages", pages), &input, |b, input| {
            b.iter(|| chunker.chunk_by_pages(black_box(input)));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_tiktoken_chunker,
    bench_word_counter_chunker,
    bench_oversized_sentence,
    bench_chunk_by_pages
);
criterion_main!(benches);
