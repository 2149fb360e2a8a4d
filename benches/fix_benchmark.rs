//! Benchmarks for mdfix throughput.
//!
//! Run with: cargo bench
//!
//! These benchmarks fix synthetic handbook-style documents.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

/// Creates a synthetic Markdown document with the given number of sections.
fn create_test_document(section_count: usize) -> String {
    let mut content = String::new();
    content.push_str("# Handbook\n\n");

    for i in 0..section_count {
        content.push_str(&format!("\n**Section {}:**\n", i + 1));
        content.push_str("Some introductory text with a trailing space \n");
        content.push_str("Reference: https://example.com/section/");
        content.push_str(&format!("{}\n", i));
        content.push_str("Key points:\n");
        content.push_str("- first point\n- second point\n\n- third point\n");
        content.push_str("Example:\n```\nimport requests\nrequests.get(url)\n```\n");
        content.push_str("Request:\n```\nGET /api/v1/items HTTP/1.1\n```\n");
    }

    content
}

/// Benchmark a full fix at various sizes.
fn bench_fix_document(c: &mut Criterion) {
    let mut group = c.benchmark_group("fix_document");

    for section_count in [10, 100, 1000].iter() {
        let text = create_test_document(*section_count);
        let fixer = mdfix::Fixer::default();

        group.bench_function(format!("{}_sections", section_count), |b| {
            b.iter(|| fixer.process(black_box(&text)));
        });
    }

    group.finish();
}

/// Benchmark fence language inference.
fn bench_fence_language(c: &mut Criterion) {
    let lines = [
        "def handler(event):",
        "const x = require('x');",
        "$ curl -s localhost",
        "{\"key\": \"value\"}",
        "POST /login HTTP/1.1",
        "Subject: quarterly report",
    ];

    c.bench_function("infer_fence_language", |b| {
        b.iter(|| {
            for line in lines.iter() {
                black_box(mdfix::infer_fence_language(black_box(line)));
            }
        });
    });
}

/// Benchmark pattern compilation when building a fixer.
fn bench_fixer_creation(c: &mut Criterion) {
    c.bench_function("fixer_creation", |b| {
        b.iter(|| mdfix::Fixer::new(mdfix::FixOptions::new().with_heading_level(2)));
    });
}

criterion_group!(
    benches,
    bench_fix_document,
    bench_fence_language,
    bench_fixer_creation,
);
criterion_main!(benches);
