//! Run encoder benchmarks

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use term_bridge::core::{encode_row, CellStyle, ColorRef, Palette, SnapshotCell};

fn bench_encode_row(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode_row");
    let palette = Palette::default();

    // A full uniform row: one run
    let uniform: Vec<SnapshotCell> = (0..200).map(|_| SnapshotCell::plain('x')).collect();
    group.bench_function("uniform_200", |b| {
        b.iter(|| black_box(encode_row(black_box(&uniform), &palette)))
    });

    // Worst case: every cell starts a new run
    let styles = [
        CellStyle::default(),
        CellStyle {
            bold: true,
            ..Default::default()
        },
        CellStyle {
            fg: ColorRef::Standard(196),
            ..Default::default()
        },
    ];
    let alternating: Vec<SnapshotCell> = (0..200)
        .map(|i| SnapshotCell::styled('x', styles[i % 3]))
        .collect();
    group.bench_function("alternating_200", |b| {
        b.iter(|| black_box(encode_row(black_box(&alternating), &palette)))
    });

    group.finish();
}

criterion_group!(benches, bench_encode_row);
criterion_main!(benches);
