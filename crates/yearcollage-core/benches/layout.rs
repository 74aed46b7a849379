use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use image::{Rgba, RgbaImage};
use yearcollage_core::prelude::*;

fn generate_ratios(count: usize) -> Vec<f64> {
    use rand::Rng;
    let mut rng = rand::thread_rng();
    (0..count).map(|_| rng.gen_range(0.25..4.0)).collect()
}

fn bench_column_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("column_search");

    for count in [12usize, 365, 5000] {
        let ratios = generate_ratios(64);
        group.throughput(Throughput::Elements(ratios.len() as u64));
        group.bench_with_input(BenchmarkId::new("pick_columns", count), &ratios, |b, ratios| {
            b.iter(|| {
                for &r in ratios {
                    black_box(pick_columns_for_collage(black_box(count), r));
                }
            });
        });
        group.bench_with_input(BenchmarkId::new("plan", count), &ratios, |b, ratios| {
            b.iter(|| {
                for &r in ratios {
                    let mode = LayoutMode::CollageAspect(AspectRatio::new(r));
                    let _ = black_box(GridLayout::plan(count, &mode));
                }
            });
        });
    }

    group.finish();
}

fn bench_compose(c: &mut Criterion) {
    let mut group = c.benchmark_group("compose");

    for count in [16usize, 64] {
        let tiles: Vec<RgbaImage> = (0..count)
            .map(|i| RgbaImage::from_pixel(120, 90, Rgba([(i * 7) as u8, 80, 160, 255])))
            .collect();
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("place_4x3_tiles", count), &tiles, |b, tiles| {
            b.iter(|| {
                let mode = LayoutMode::Columns {
                    columns: 8,
                    tile_aspect: AspectRatio::new(4.0 / 3.0),
                };
                let grid = GridLayout::plan(tiles.len(), &mode).expect("grid");
                let tile = grid.tile_size(64).expect("tile");
                let mut comp = Compositor::new(grid, tile, [0, 0, 0, 0]).expect("canvas");
                for (i, t) in tiles.iter().enumerate() {
                    let cropped = crop_to_aspect(t.clone(), grid.tile_aspect.value());
                    comp.place(i, &cropped).expect("place");
                }
                black_box(comp.finish())
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_column_search, bench_compose);
criterion_main!(benches);
