#[macro_use]
extern crate criterion;

use criterion::Criterion;
use mandelbrot::config::{Mode, RenderConfig};
use mandelbrot::render;

fn config(mode: Mode) -> RenderConfig {
    RenderConfig {
        width: 200,
        height: 200,
        max_count: 256,
        mode,
        ..RenderConfig::default()
    }
}

fn single_pipeline(c: &mut Criterion) {
    let config = config(Mode::Single);
    c.bench_function("single 200x200", |b| b.iter(|| render(&config).unwrap()));
}

fn tiled_pipeline(c: &mut Criterion) {
    let config = config(Mode::Tiled);
    c.bench_function("tiled 3x2 200x200", |b| b.iter(|| render(&config).unwrap()));
}

criterion_group!(benches, single_pipeline, tiled_pipeline);
criterion_main!(benches);
