//! Benchmarks for the manuscript pipeline.
//!
//! Run with: cargo bench

use std::hint::black_box;
use std::io::Cursor;

use criterion::{Criterion, criterion_group, criterion_main};

use folio::export::{EpubExporter, Exporter};
use folio::{BookAssembler, BookModel, classify_body, normalize, segment};

/// A synthetic serial novel: 200 chapters mixing every line category.
fn sample_manuscript() -> String {
    let mut text = String::from("작가의 말\r\n\r\n");
    for i in 1..=200 {
        text.push_str(&format!("제 {i} 화 새로운 시작\r\n"));
        for j in 0..40 {
            match j % 8 {
                3 => text.push_str("\"어디로 가는 거야?\" 그녀가 물었다.\r\n"),
                5 => text.push_str("「모르겠어.」\r\n"),
                7 => text.push_str("***\r\n"),
                _ => text.push_str("바람이 불었다. 나뭇잎이 흔들리며 길 위로 떨어졌다.\r\n"),
            }
            text.push_str("\r\n");
        }
    }
    text
}

fn sample_book(text: &str) -> BookModel {
    let mut assembler = BookAssembler::new("벤치마크", "작가");
    for section in segment(&normalize(text)) {
        assembler.add_chapter(section.title, &section.body);
    }
    assembler.finalize()
}

// ============================================================================
// Text Stage Benchmarks
// ============================================================================

fn bench_normalize(c: &mut Criterion) {
    let text = sample_manuscript();

    c.bench_function("normalize", |b| {
        b.iter(|| normalize(black_box(&text)).len());
    });
}

fn bench_segment(c: &mut Criterion) {
    let text = normalize(&sample_manuscript()).into_owned();

    c.bench_function("segment", |b| {
        b.iter(|| segment(black_box(&text)));
    });
}

fn bench_classify(c: &mut Criterion) {
    let text = normalize(&sample_manuscript()).into_owned();
    let sections = segment(&text);

    c.bench_function("classify", |b| {
        b.iter(|| {
            sections
                .iter()
                .map(|s| classify_body(black_box(&s.body)).len())
                .sum::<usize>()
        });
    });
}

// ============================================================================
// Assembly and Export Benchmarks
// ============================================================================

fn bench_assemble(c: &mut Criterion) {
    let text = sample_manuscript();

    c.bench_function("assemble", |b| {
        b.iter(|| sample_book(black_box(&text)));
    });
}

fn bench_write_epub(c: &mut Criterion) {
    let book = sample_book(&sample_manuscript());

    c.bench_function("write_epub", |b| {
        b.iter(|| {
            let mut output = Cursor::new(Vec::new());
            EpubExporter::new().export(&book, &mut output).unwrap();
        });
    });
}

criterion_group!(
    benches,
    // Text stages
    bench_normalize,
    bench_segment,
    bench_classify,
    // Assembly and export
    bench_assemble,
    bench_write_epub,
);
criterion_main!(benches);
