use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use article_share_core::{
    Document, DomTree, ExtractorConfig, SummaryRequest, extract_article, extract_main_content, summarize,
};

fn load(name: &str) -> String {
    std::fs::read_to_string(format!("../../tests/fixtures/{name}")).unwrap()
}

fn bench_parse(c: &mut Criterion) {
    let html = load("semantic_article.html");
    let mut group = c.benchmark_group("parse");

    group.bench_with_input(BenchmarkId::new("document", "semantic"), &html, |b, html| {
        b.iter(|| Document::parse(black_box(html)))
    });
    group.bench_with_input(BenchmarkId::new("dom_tree", "semantic"), &html, |b, html| {
        b.iter(|| DomTree::from_html(black_box(html)))
    });

    group.finish();
}

fn bench_content_tiers(c: &mut Criterion) {
    let config = ExtractorConfig::default();
    let mut group = c.benchmark_group("content_tiers");

    for (tier, fixture) in [
        ("selector_scan", "semantic_article.html"),
        ("densest_parent", "dense_parent.html"),
        ("paragraph_concat", "short_paragraphs.html"),
    ] {
        let doc = Document::parse(&load(fixture));
        group.bench_function(tier, |b| b.iter(|| extract_main_content(black_box(&doc), black_box(&config))));
    }

    group.finish();
}

fn bench_full_extraction(c: &mut Criterion) {
    let doc = Document::parse(&load("json_ld_article.html"));
    c.bench_function("full_extraction", |b| b.iter(|| extract_article(black_box(&doc))));
}

fn bench_summarize(c: &mut Criterion) {
    let content = "Each sentence in this benchmark article carries a handful of ordinary words. ".repeat(60);
    let request = SummaryRequest::new(&content, "Benchmark", "measuring throughput", "technical-team");

    c.bench_function("summarize", |b| b.iter(|| summarize(black_box(&request))));
}

criterion_group!(benches, bench_parse, bench_content_tiers, bench_full_extraction, bench_summarize);
criterion_main!(benches);
