use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use mergeplate::rendering::{FontBook, RecordCompositor};
use mergeplate::{BatchRenderer, MergeOptions, Record, RowStore, Template};
use tiny_skia::Color;

fn bench_rows(n: usize) -> RowStore {
    RowStore::new(
        (0..n)
            .map(|i| {
                Record::new()
                    .with("broker", "Acme Realty")
                    .with("name", format!("Agent {}", i))
                    .with("project name", "Harbor View")
                    .with("submit", (2000 + i).to_string())
                    .with("email", format!("agent{}@example.com", i))
            })
            .collect(),
    )
}

fn bench_single_record(c: &mut Criterion) {
    let template = Template::solid(1000, 1500, Color::from_rgba8(30, 60, 120, 255)).unwrap();
    let rows = bench_rows(1);
    let mut book = FontBook::new();
    book.load_system_fonts();
    let compositor = RecordCompositor::with_font_book(MergeOptions::default(), &book);

    let mut group = c.benchmark_group("record");
    group.sample_size(10);

    group.bench_function("render_canvas_1000x1500", |b| {
        b.iter(|| {
            compositor
                .render_canvas(black_box(&rows.records()[0]), rows.columns(), &template)
                .unwrap()
        })
    });

    group.bench_function("composite_jpeg_1000x1500", |b| {
        b.iter(|| {
            compositor
                .composite(black_box(&rows.records()[0]), rows.columns(), &template)
                .unwrap()
        })
    });

    group.finish();
}

fn bench_batch(c: &mut Criterion) {
    let template = Template::solid(500, 750, Color::WHITE).unwrap();
    let mut book = FontBook::new();
    book.load_system_fonts();
    let renderer = BatchRenderer::with_font_book(MergeOptions::default(), &book);

    let mut group = c.benchmark_group("batch");
    group.sample_size(10);

    for n in [1usize, 8, 32] {
        let rows = bench_rows(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &rows, |b, rows| {
            b.iter(|| {
                renderer
                    .render_all(black_box(rows), Some(&template))
                    .unwrap()
                    .finalize()
                    .unwrap()
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_single_record, bench_batch);
criterion_main!(benches);
