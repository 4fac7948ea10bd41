use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use vidfilter_core::crt::{TriadLut, TriadParams};
use vidfilter_core::filters::{Filter, FilterKind, FilterOptions};
use vidfilter_core::{PixelBuffer, PixelFormat, VISIBLE_HEIGHT, VISIBLE_WIDTH};

/// Frame with gradients and hard edges so every filter branch gets work
fn test_frame(width: usize, height: usize) -> PixelBuffer {
    let mut frame = PixelBuffer::new(width, height, PixelFormat::Rgb565);
    for y in 0..height {
        for x in 0..width {
            let pixel = if (x / 8 + y / 8) % 2 == 0 {
                let r = (x * 255 / width) as u8;
                let g = (y * 255 / height) as u8;
                PixelFormat::Rgb565.from_rgb8(r, g, 0x40)
            } else {
                0xFFFF
            };
            frame.set(x, y, pixel);
        }
    }
    frame
}

fn bench_filters(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_frame");
    let src = test_frame(VISIBLE_WIDTH, VISIBLE_HEIGHT);
    let options = FilterOptions::default();

    for kind in FilterKind::ALL {
        let filter = match Filter::new(kind, &options, PixelFormat::Rgb565) {
            Ok(filter) => filter,
            Err(_) => continue,
        };
        let (mx, my) = kind.multiplier();
        let mut dst =
            PixelBuffer::new(VISIBLE_WIDTH * mx, VISIBLE_HEIGHT * my, PixelFormat::Rgb565);

        group.bench_with_input(BenchmarkId::from_parameter(kind.name()), &kind, |b, _| {
            b.iter(|| {
                filter.transform(&src.full_region(), &mut dst.full_region_mut());
                black_box(dst.get(0, 0));
            });
        });
    }

    group.finish();
}

fn bench_triad_lut(c: &mut Criterion) {
    let mut group = c.benchmark_group("triad_lut");
    group.sample_size(10);

    group.bench_function("build_full_res", |b| {
        let params = TriadParams::full_res();
        b.iter(|| {
            let lut = TriadLut::build(black_box(&params));
            black_box(lut.len());
        });
    });

    group.finish();
}

criterion_group!(benches, bench_filters, bench_triad_lut);
criterion_main!(benches);
