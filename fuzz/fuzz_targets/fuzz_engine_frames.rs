#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use scrollfx_core::{GrowConfig, Span, Viewport};
use scrollfx_runtime::{
    ElementSet, EngineConfig, Measurements, ParallaxAttrs, RevealAttrs, ScrollEngine, SpeedAttrs,
};

#[derive(Debug, Arbitrary)]
struct Input {
    width: f64,
    height: f64,
    scale: f64,
    speed: f64,
    spans: [(f64, f64); 6],
    scrolls: Vec<f64>,
}

fuzz_target!(|input: Input| {
    if input.scrolls.len() > 256 {
        return;
    }
    let elements = ElementSet {
        parallax: vec![ParallaxAttrs { scale: Some(input.scale) }],
        grow: vec![GrowConfig::default()],
        speed: vec![SpeedAttrs { speed: Some(input.speed) }],
        drift_children: vec![1, 5],
        reveal: vec![RevealAttrs { parent: 0, text: true }],
    };
    let span = |i: usize| Span::new(input.spans[i].0, input.spans[i].1);
    let mut engine = ScrollEngine::new(EngineConfig::home(), elements);
    let measured = engine.measure(&Measurements {
        viewport: Viewport::new(input.width, input.height),
        parallax: vec![span(0)],
        grow: vec![span(1)],
        drift: vec![span(2), span(3)],
        reveal: vec![span(4)],
    });
    assert!(measured.is_ok());

    let mut reveals = 0;
    for y in input.scrolls {
        // Frame computation must never panic or emit NaN.
        let frame = engine.update(y);
        assert!(!frame.scroll_y.is_nan());
        for p in &frame.parallax {
            assert!(!p.offset.is_nan());
        }
        for g in &frame.grow {
            assert!((0.0..=1.0).contains(&g.progress));
        }
        reveals += frame.revealed.len();
    }
    assert!(reveals <= 1);
});
