//! Benchmarks for search index building.

#![allow(clippy::format_push_string)] // Benchmark setup code, performance not critical

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use helpdocs_search::{PageInput, SearchIndex, strip_html};

/// Generate a rendered page with the given number of sections.
fn generate_html(sections: usize) -> String {
    let mut html = String::from("<html><body><div id=\"content\">\n<h1>Syncing Notes</h1>\n");
    for i in 0..sections {
        html.push_str(&format!("<h2 id=\"section-{i}\">Section {i}</h2>\n"));
        html.push_str(
            "<p>Syncing keeps your <b>notes</b> current across devices. \
             Conflicts are resolved by keeping both versions.</p>\n",
        );
        html.push_str(&format!("<h3 id=\"details-{i}\">Details</h3>\n<pre><code>sync --all</code></pre>\n"));
    }
    html.push_str("</div></body></html>\n");
    html
}

fn bench_add_page(c: &mut Criterion) {
    let keywords = vec!["sync".to_owned()];
    let mut group = c.benchmark_group("add_page");

    for sections in [5, 20, 50] {
        let html = generate_html(sections);
        group.throughput(Throughput::Bytes(html.len() as u64));
        group.bench_with_input(BenchmarkId::new("sections", sections), &html, |b, html| {
            b.iter(|| {
                let mut index = SearchIndex::new();
                index.add_page(&PageInput {
                    title: "Syncing",
                    location: "sync.html",
                    html,
                    keywords: &keywords,
                });
                index
            });
        });
    }

    group.finish();
}

fn bench_strip_html(c: &mut Criterion) {
    let html = generate_html(20);
    c.bench_function("strip_html_20_sections", |b| {
        b.iter(|| strip_html(&html));
    });
}

criterion_group!(benches, bench_add_page, bench_strip_html);
criterion_main!(benches);
