//! Per-frame pipeline benchmark: render, composite and ticker overlay at
//! the default 120x40 grid.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use image::RgbImage;
use vision_matrix::{Buffer, FadeCompositor, FrameRenderer, MatrixConfig, TickerOverlay};

/// A 960x480 frame with a diagonal gradient.
fn camera_frame() -> RgbImage {
    RgbImage::from_fn(960, 480, |x, y| {
        let v = ((x + y) % 256) as u8;
        image::Rgb([v, v / 2, 255 - v])
    })
}

fn render_frame(c: &mut Criterion) {
    let config = MatrixConfig::default();
    let renderer = FrameRenderer::new(&config).unwrap();
    let frame = camera_frame();

    c.bench_function("render_960x480_to_120x40", |b| {
        b.iter(|| renderer.render(black_box(&frame), config.base_brightness));
    });
}

fn composite(c: &mut Criterion) {
    let config = MatrixConfig::default();
    let renderer = FrameRenderer::new(&config).unwrap();
    let compositor = FadeCompositor::new(config.fade);
    let next = renderer.render(&camera_frame(), config.base_brightness);
    let mut persistent = Buffer::new(config.columns, config.rows);

    c.bench_function("composite_120x40", |b| {
        b.iter(|| compositor.composite(&mut persistent, black_box(&next)));
    });
}

fn ticker(c: &mut Criterion) {
    let config = MatrixConfig::default();
    let mut ticker = TickerOverlay::new(&config);
    let mut buffer = Buffer::new(config.columns, config.rows);
    let headline = ["Chip makers race to ship new accelerators"; 8].join(" || ");

    c.bench_function("ticker_overlay_120", |b| {
        b.iter(|| ticker.overlay(&mut buffer, black_box(&headline)));
    });
}

fn full_frame(c: &mut Criterion) {
    let config = MatrixConfig::default();
    let renderer = FrameRenderer::new(&config).unwrap();
    let compositor = FadeCompositor::new(config.fade);
    let mut ticker = TickerOverlay::new(&config);
    let mut persistent = Buffer::new(config.columns, config.rows);
    let frame = camera_frame();

    c.bench_function("frame_pipeline_120x40", |b| {
        b.iter(|| {
            let next = renderer.render(black_box(&frame), config.base_brightness);
            compositor.composite(&mut persistent, &next);
            ticker.overlay(&mut persistent, "Loading AI news...");
        });
    });
}

criterion_group!(benches, render_frame, composite, ticker, full_frame);
criterion_main!(benches);
