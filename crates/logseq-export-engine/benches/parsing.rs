use criterion::{Criterion, criterion_group, criterion_main};
use logseq_export_engine::{Graph, Page, parse_outline};
mod common;

fn bench_outline_assembly(c: &mut Criterion) {
    let mut group = c.benchmark_group("parsing");
    group.sample_size(10);

    let content = common::generate_outline(100);
    group.bench_function("parse_outline", |b| {
        b.iter(|| {
            let outline = parse_outline(std::hint::black_box(&content)).unwrap();
            std::hint::black_box(outline);
        });
    });
    group.bench_function("page_parse", |b| {
        b.iter(|| {
            let page = Page::parse("Bench", "pages/Bench.md", std::hint::black_box(&content))
                .unwrap();
            std::hint::black_box(page);
        });
    });

    group.finish();
}

fn bench_public_projection(c: &mut Criterion) {
    let mut group = c.benchmark_group("projection");
    group.sample_size(10);

    let mut graph = Graph::new("/bench");
    for i in 0..20 {
        let content = common::generate_outline(50).replace("00000000-", &format!("{i:08}-"));
        let page = Page::parse(format!("Page {i}"), format!("pages/Page {i}.md"), &content).unwrap();
        graph.add_page(page).unwrap();
    }
    for i in 0..50 {
        graph
            .add_asset(logseq_export_engine::Asset::new(format!("img{i}.png")))
            .unwrap();
    }

    group.bench_function("public_graph", |b| {
        b.iter(|| {
            let public = graph.public_graph().unwrap();
            std::hint::black_box(public);
        });
    });

    group.finish();
}

criterion_group!(benches, bench_outline_assembly, bench_public_projection);
criterion_main!(benches);
