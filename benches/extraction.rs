//! Performance benchmarks for rs-readerview.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use rs_readerview::{extract, harvest_metadata, is_probably_readerable};

/// A synthetic article page with the usual chrome around it.
fn sample_page() -> String {
    let paragraph = "Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do \
                     eiusmod tempor incididunt ut labore et dolore magna aliqua. Ut enim \
                     ad minim veniam, quis nostrud exercitation ullamco laboris. ";
    let body: String = (0..20)
        .map(|_| format!("<p>{paragraph}</p>"))
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Sample Article | Example Site</title>
    <meta property="og:title" content="Sample Article">
    <meta name="description" content="A sample article for benchmarking.">
</head>
<body>
    <nav class="menu"><a href="/">Home</a> <a href="/about">About</a></nav>
    <div class="sidebar"><ul><li><a href="/x">Related one</a></li></ul></div>
    <article>
        <div class="byline">By John Doe</div>
        {body}
    </article>
    <footer><p>Copyright 2024</p></footer>
</body>
</html>"#
    )
}

fn bench_extract(c: &mut Criterion) {
    let html = sample_page();
    let mut group = c.benchmark_group("extract");
    group.throughput(Throughput::Bytes(html.len() as u64));
    group.bench_function("default_options", |b| {
        b.iter(|| extract(black_box(&html)));
    });
    group.finish();
}

fn bench_readerable(c: &mut Criterion) {
    let html = sample_page();
    c.bench_function("is_probably_readerable", |b| {
        b.iter(|| is_probably_readerable(black_box(&html)));
    });
}

fn bench_metadata(c: &mut Criterion) {
    let html = sample_page();
    c.bench_function("harvest_metadata", |b| {
        b.iter(|| harvest_metadata(black_box(&html)));
    });
}

criterion_group!(benches, bench_extract, bench_readerable, bench_metadata);
criterion_main!(benches);
