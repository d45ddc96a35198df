use casemk_core::prelude::*;
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

fn generate_items(kinds: usize, min_size: f64, max_size: f64) -> Vec<Item> {
    use rand::{Rng, SeedableRng};
    let mut rng = rand::rngs::StdRng::seed_from_u64(0xCA5E);
    (0..kinds)
        .map(|i| {
            Item::new(
                rng.gen_range(min_size..=max_size),
                rng.gen_range(min_size..=max_size),
                rng.gen_range(5.0..=30.0),
            )
            .with_count(rng.gen_range(1..=4))
            .with_label(format!("P-{}", i))
        })
        .collect()
}

fn bench_grid(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid_layout");
    for (w, l) in [(350.0, 300.0), (700.0, 600.0), (1400.0, 1200.0)] {
        let cfg = CaseConfig::builder().max_footprint(w, l).build();
        group.bench_with_input(
            BenchmarkId::new("fill", format!("{}x{}", w, l)),
            &cfg,
            |b, cfg| {
                b.iter(|| black_box(compute_grid_layout((12.0, 8.0, 10.0), cfg, None)));
            },
        );
    }
    group.finish();
}

fn bench_mixed(c: &mut Criterion) {
    let mut group = c.benchmark_group("mixed_layout");
    let cfg = CaseConfig::builder()
        .max_footprint(2000.0, 2000.0)
        .label_size(Some((8.0, 20.0)))
        .build();
    for kinds in [10, 50, 200] {
        let items = generate_items(kinds, 5.0, 40.0);
        group.throughput(Throughput::Elements(kinds as u64));
        group.bench_with_input(BenchmarkId::new("first_fit", kinds), &items, |b, items| {
            b.iter(|| black_box(compute_mixed_layout(items, &cfg)));
        });
    }
    group.finish();
}

fn bench_assemble_and_render(c: &mut Criterion) {
    let cfg = CaseConfig::builder()
        .corner_radius(3.0)
        .stackable(true)
        .label_size(Some((8.0, 20.0)))
        .build();
    let items = generate_items(20, 5.0, 25.0);
    let Ok(layout) = compute_mixed_layout(&items, &cfg) else {
        return;
    };
    c.bench_function("assemble_render", |b| {
        b.iter(|| black_box(render_scad(&assemble_case(&layout, &cfg))));
    });
}

criterion_group!(benches, bench_grid, bench_mixed, bench_assemble_and_render);
criterion_main!(benches);
