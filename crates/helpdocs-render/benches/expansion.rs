//! Benchmarks for directive expansion and conversion.

#![allow(clippy::format_push_string)] // Benchmark setup code, performance not critical

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use helpdocs_render::{CmarkConverter, MarkdownConverter, RenderTarget, expand};

/// Generate a page using every directive family.
fn generate_page(sections: usize) -> String {
    let mut md = String::from("# Page Title\n\n{{toc}}\n\n");
    for i in 0..sections {
        md.push_str(&format!("## Section {i}\n\n"));
        md.push_str("Press {% kbd {{cmd}}{{shift}}N %} or use {% menu File,New Note ({{cmd}}N) %}.\n\n");
        md.push_str("{% apponly div %}Open {% prefspane Sync %} to configure.{% endapponly %}\n\n");
        md.push_str("{% note %}Internal only.{% endnote %}{>> reviewer comment <<}\n\n");
        md.push_str("### Details\n\nThe {{return}} key confirms.\n\n");
    }
    md
}

fn bench_expand_targets(c: &mut Criterion) {
    let page = generate_page(10);
    let mut group = c.benchmark_group("expand_by_target");
    group.throughput(Throughput::Bytes(page.len() as u64));

    for target in RenderTarget::ALL {
        group.bench_with_input(BenchmarkId::new("target", target), &page, |b, page| {
            b.iter(|| expand(page, target));
        });
    }

    group.finish();
}

fn bench_expand_and_convert(c: &mut Criterion) {
    let converter = CmarkConverter::new();
    let mut group = c.benchmark_group("expand_and_convert");

    for sections in [5, 20, 50] {
        let page = generate_page(sections);
        group.throughput(Throughput::Bytes(page.len() as u64));
        group.bench_with_input(BenchmarkId::new("sections", sections), &page, |b, page| {
            b.iter(|| converter.convert(&expand(page, RenderTarget::Embedded)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_expand_targets, bench_expand_and_convert);
criterion_main!(benches);
