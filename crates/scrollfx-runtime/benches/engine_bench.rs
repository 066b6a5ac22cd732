//! Benchmarks for a full engine frame.
//!
//! Run with: cargo bench -p scrollfx-runtime

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use scrollfx_core::{GrowConfig, Span, Viewport};
use scrollfx_runtime::{
    ElementSet, EngineConfig, Measurements, ParallaxAttrs, RevealAttrs, ScrollEngine, SpeedAttrs,
};
use std::hint::black_box;

fn make_engine(n: usize) -> ScrollEngine {
    let elements = ElementSet {
        parallax: vec![ParallaxAttrs { scale: Some(1.2) }; n],
        grow: vec![GrowConfig::default(); 2],
        speed: vec![SpeedAttrs { speed: Some(1.0) }; 2],
        drift_children: vec![1, 5],
        reveal: (0..n as u32)
            .map(|i| RevealAttrs {
                parent: i / 3,
                text: true,
            })
            .collect(),
    };
    let mut engine = ScrollEngine::new(EngineConfig::home(), elements);
    let spans = |count: usize, pitch: f64| -> Vec<Span> {
        (0..count)
            .map(|i| Span::new(i as f64 * pitch, 420.0))
            .collect()
    };
    engine
        .measure(&Measurements {
            viewport: Viewport::new(1440.0, 900.0),
            parallax: spans(n, 700.0),
            grow: vec![Span::new(2_000.0, 2_340.0), Span::new(9_000.0, 2_340.0)],
            drift: vec![Span::new(6_000.0, 500.0), Span::new(14_000.0, 600.0)],
            reveal: spans(n, 350.0),
        })
        .expect("bench measurements match element counts");
    engine
}

fn bench_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine/update");
    for n in [6, 24, 96] {
        let mut engine = make_engine(n);
        group.bench_with_input(BenchmarkId::new("elements", n), &n, |b, _| {
            let mut y = 0.0;
            b.iter(|| {
                y = (y + 16.0) % 16_000.0;
                black_box(engine.update(black_box(y)))
            })
        });
    }
    group.finish();
}

fn bench_measure(c: &mut Criterion) {
    let mut engine = make_engine(24);
    let m = Measurements {
        viewport: Viewport::new(1385.0, 800.0),
        parallax: vec![Span::new(1_000.0, 400.0); 24],
        grow: vec![Span::new(2_000.0, 2_000.0); 2],
        drift: vec![Span::new(6_000.0, 500.0); 2],
        reveal: vec![Span::new(500.0, 80.0); 24],
    };
    c.bench_function("engine/measure", |b| {
        b.iter(|| black_box(engine.measure(black_box(&m))))
    });
}

criterion_group!(benches, bench_update, bench_measure);
criterion_main!(benches);
