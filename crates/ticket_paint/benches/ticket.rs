//! Benchmarks for ticket outline construction and shadow rendering

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ticket_core::{Contour, CornerRadius, HoleSpec, Orientation, Rect};
use ticket_paint::{build_contour, build_contour_into, ShadowConfig, ShadowRasterizer};

fn bench_contour(c: &mut Criterion) {
    let bounds = Rect::from_ltrb(12.5, 12.5, 347.5, 187.5);
    let radii = CornerRadius::uniform(12.0);
    let hole = HoleSpec::new(220.0, 14.0);

    let mut group = c.benchmark_group("contour");
    for orientation in [Orientation::Vertical, Orientation::Horizontal] {
        group.bench_with_input(
            BenchmarkId::new("build", format!("{orientation:?}")),
            &orientation,
            |b, &orientation| {
                b.iter(|| build_contour(black_box(bounds), radii, orientation, hole));
            },
        );
    }

    group.bench_function("rebuild_in_place", |b| {
        let mut contour = Contour::new();
        b.iter(|| {
            build_contour_into(
                &mut contour,
                black_box(bounds),
                radii,
                Orientation::Horizontal,
                hole,
            );
        });
    });
    group.finish();
}

fn bench_shadow(c: &mut Criterion) {
    let contour = build_contour(
        Rect::from_ltrb(12.5, 12.5, 347.5, 187.5),
        CornerRadius::uniform(12.0),
        Orientation::Horizontal,
        HoleSpec::new(220.0, 14.0),
    );

    let mut group = c.benchmark_group("shadow");
    for elevation in [4.0f32, 12.0, 24.0] {
        let config = ShadowConfig::from_elevation(elevation, 1.0);
        group.bench_with_input(
            BenchmarkId::new("render", elevation),
            &config,
            |b, config| {
                let mut rasterizer = ShadowRasterizer::new();
                b.iter(|| {
                    rasterizer
                        .render(black_box(&contour), None, config, 360, 200)
                        .map(|s| s.mask.coverage())
                });
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_contour, bench_shadow);
criterion_main!(benches);
