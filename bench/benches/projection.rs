use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use nested_dict::{NestedMap, Scalar, TableOptions};

fn grid(rows: usize, columns: usize, ragged: bool) -> NestedMap {
    let mut map = NestedMap::new();
    for row in 0..rows {
        let width = if ragged { columns - row % columns } else { columns };
        for column in 0..width {
            map.at(row).at(format!("c{column}")).set((row * columns + column) as i64);
        }
    }
    map
}

fn build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    for size in [16, 128] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter(|| grid(black_box(size), size, false))
        });
    }
    group.finish();
}

fn project(c: &mut Criterion) {
    let regular = grid(128, 64, false);
    let ragged = grid(128, 64, true);
    let options = TableOptions::default();

    let mut group = c.benchmark_group("project");
    group.bench_function("to_array", |b| b.iter(|| black_box(&regular).to_array(None)));
    group.bench_function("to_array_fill", |b| {
        b.iter(|| black_box(&ragged).to_array(Some(Scalar::Null)))
    });
    group.bench_function("to_labeled_array", |b| {
        b.iter(|| black_box(&ragged).to_labeled_array(Some(Scalar::Null)))
    });
    group.bench_function("to_table", |b| b.iter(|| black_box(&ragged).to_table(&options)));
    group.bench_function("to_long_table", |b| {
        b.iter(|| black_box(&ragged).to_long_table(&options))
    });
    group.finish();
}

fn json(c: &mut Criterion) {
    let text = serde_json::to_string(&grid(128, 64, true)).unwrap();
    c.bench_function("from_json", |b| {
        b.iter(|| serde_json::from_str::<NestedMap>(black_box(&text)).unwrap())
    });
}

criterion_group!(benches, build, project, json);
criterion_main!(benches);
