//! Diffing engine benchmark: cost of pushing one grid to the terminal.
//!
//! An ASCII camera feed changes most cells every frame, so the full-change
//! case is the one that matters.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use vision_matrix::buffer::diff::{render_diff, render_full, DiffState};
use vision_matrix::{Buffer, Cell, Rgb};

const RAMP: &[u8] = b" .:-=+*#%@";

/// A green ASCII grid whose content and shade depend on `seed`.
fn create_test_buffer(width: u16, height: u16, seed: u16) -> Buffer {
    let mut buffer = Buffer::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let level = (x * 3 + y * 7 + seed * 11) % 256;
            let glyph = RAMP[usize::from(level) * (RAMP.len() - 1) / 255] as char;
            let cell = Cell::new(glyph).with_fg(Rgb::new(0, level as u8, 0));
            buffer.set(x, y, cell);
        }
    }
    buffer
}

fn diff(a: &Buffer, b: &Buffer, capacity: usize) -> Vec<u8> {
    let mut output = Vec::with_capacity(capacity);
    let mut state = DiffState::new();
    render_diff(black_box(a), black_box(b), &mut output, &mut state);
    output
}

fn diff_identical_buffers(c: &mut Criterion) {
    let buffer = create_test_buffer(120, 40, 0);
    let buffer_clone = buffer.clone();

    c.bench_function("diff_120x40_identical", |b| {
        b.iter(|| diff(&buffer, &buffer_clone, 4096));
    });
}

fn diff_ticker_rows_change(c: &mut Criterion) {
    let buffer_a = create_test_buffer(120, 40, 0);
    let mut buffer_b = buffer_a.clone();
    for x in 0..120 {
        buffer_b.set(x, 38, Cell::new('N').with_fg(Rgb::new(50, 255, 50)));
        buffer_b.set(x, 39, Cell::new('N').with_fg(Rgb::new(20, 200, 20)));
    }

    c.bench_function("diff_120x40_ticker_change", |b| {
        b.iter(|| diff(&buffer_a, &buffer_b, 4096));
    });
}

fn full_render(c: &mut Criterion) {
    let buffer = create_test_buffer(120, 40, 0);

    c.bench_function("render_full_120x40", |b| {
        b.iter(|| {
            let mut output = Vec::with_capacity(65536);
            render_full(black_box(&buffer), &mut output);
            output
        });
    });
}

fn diff_various_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("diff_by_size");

    for (width, height) in [(80, 24), (120, 40), (200, 50), (300, 80)] {
        let buffer_a = create_test_buffer(width, height, 0);
        let buffer_b = create_test_buffer(width, height, 1);

        group.bench_with_input(
            BenchmarkId::new("full_change", format!("{width}x{height}")),
            &(buffer_a, buffer_b),
            |b, (a, bb)| b.iter(|| diff(a, bb, 65536)),
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    diff_identical_buffers,
    diff_ticker_rows_change,
    full_render,
    diff_various_sizes,
);
criterion_main!(benches);
