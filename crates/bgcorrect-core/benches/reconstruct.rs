use bgcorrect_core::{
    build_background, correct, reconstruct, GrayImage, GridSize, SampleGrid, UnsetAnchors,
};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn sample_grid(columns: usize, rows: usize) -> SampleGrid {
    let mut grid = SampleGrid::new(GridSize::new(columns, rows));
    for sx in 0..columns {
        for sy in 0..rows {
            grid.set(sx, sy, 60.0 + (sx * 7 + sy * 13) as f32).unwrap();
        }
    }
    grid
}

fn bench_reconstruct(c: &mut Criterion) {
    let grid = sample_grid(5, 4);
    let mut group = c.benchmark_group("reconstruct");
    for (w, h) in [(192usize, 144usize), (1920, 1440)] {
        group.bench_function(format!("{w}x{h}"), |b| {
            b.iter(|| reconstruct(black_box(&grid), w, h, UnsetAnchors::Reject).unwrap())
        });
    }
    group.finish();
}

fn bench_correct(c: &mut Criterion) {
    let grid = sample_grid(3, 3);
    let (w, h) = (1920usize, 1440usize);
    let image = GrayImage::filled(w, h, 128).unwrap();
    c.bench_function("reconstruct_and_correct_1920x1440", |b| {
        b.iter(|| {
            let surface = reconstruct(&grid, w, h, UnsetAnchors::Reject).unwrap();
            let background = build_background(&surface, grid.darkest_value().unwrap());
            correct(black_box(&image.view()), &background).unwrap()
        })
    });
}

criterion_group!(benches, bench_reconstruct, bench_correct);
criterion_main!(benches);
