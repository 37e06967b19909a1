//! Diffing engine benchmark: measure flush generation for a 200×50 screen.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use weft::buffer::diff::render_diff;
use weft::terminal::OutputBuffer;
use weft::{Buffer, Cell, ColorSpec, Rgb, StyleState};

/// A buffer of letters with a color per column band.
fn create_test_buffer(width: u16, height: u16, seed: u16) -> Buffer {
    let mut buffer = Buffer::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let letter = char::from(b'A' + u8::try_from((x + y + seed) % 26).unwrap_or(0));
            let shade = u8::try_from((x * 3 + seed) % 256).unwrap_or(0);
            let style = StyleState::new().with_fg(ColorSpec::Rgb(Rgb::new(shade, 80, 160)));
            buffer.set(x, y, Cell::new(&letter.to_string(), &style));
        }
    }
    buffer
}

fn diff_identical_buffers(c: &mut Criterion) {
    let buffer = create_test_buffer(200, 50, 0);
    let previous = buffer.cells().to_vec();

    c.bench_function("diff_200x50_identical", |b| {
        let mut output = OutputBuffer::with_capacity(4096);
        b.iter(|| {
            output.clear();
            render_diff(Some(black_box(previous.as_slice())), black_box(buffer.cells()), 200, &mut output)
        });
    });
}

fn diff_single_cell_change(c: &mut Criterion) {
    let buffer = create_test_buffer(200, 50, 0);
    let previous = buffer.cells().to_vec();
    let mut changed = buffer;
    changed.set(100, 25, Cell::new("X", &StyleState::new().with_fg(ColorSpec::System(1))));

    c.bench_function("diff_200x50_single_change", |b| {
        let mut output = OutputBuffer::with_capacity(4096);
        b.iter(|| {
            output.clear();
            render_diff(Some(black_box(previous.as_slice())), black_box(changed.cells()), 200, &mut output)
        });
    });
}

fn diff_full_repaint(c: &mut Criterion) {
    let buffer = create_test_buffer(200, 50, 0);

    c.bench_function("diff_200x50_repaint", |b| {
        let mut output = OutputBuffer::with_capacity(65536);
        b.iter(|| {
            output.clear();
            render_diff(None, black_box(buffer.cells()), 200, &mut output)
        });
    });
}

fn diff_various_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("diff_by_size");

    for (width, height) in [(80, 24), (120, 40), (200, 50), (300, 80)] {
        let previous = create_test_buffer(width, height, 0).cells().to_vec();
        let next = create_test_buffer(width, height, 1);

        group.bench_with_input(
            BenchmarkId::new("full_change", format!("{width}x{height}")),
            &(previous, next),
            |b, (previous, next)| {
                let mut output = OutputBuffer::with_capacity(65536);
                b.iter(|| {
                    output.clear();
                    render_diff(Some(black_box(previous.as_slice())), black_box(next.cells()), width, &mut output)
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    diff_identical_buffers,
    diff_single_cell_change,
    diff_full_repaint,
    diff_various_sizes,
);
criterion_main!(benches);
