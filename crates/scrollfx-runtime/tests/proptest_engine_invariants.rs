//! Property-based invariant tests for the scroll engine.
//!
//! 1. Every number in a frame is finite for any scroll sequence
//! 2. Each reveal target is reported at most once
//! 3. Grow progress stays in [0, 1]
//! 4. Reduced motion never emits transforms

use std::collections::HashSet;

use proptest::prelude::*;
use scrollfx_core::{GrowConfig, Span, Viewport};
use scrollfx_runtime::{
    ElementSet, EngineConfig, FrameTransforms, Measurements, ParallaxAttrs, RevealAttrs,
    ScrollEngine, SpeedAttrs,
};

// ── Strategies ──────────────────────────────────────────────────────────

fn span_strategy() -> impl Strategy<Value = Span> {
    (0.0f64..20_000.0, 0.0f64..3_000.0).prop_map(|(top, height)| Span::new(top, height))
}

fn viewport_strategy() -> impl Strategy<Value = Viewport> {
    (320.0f64..3_840.0, 320.0f64..2_160.0).prop_map(|(w, h)| Viewport::new(w, h))
}

fn scroll_strategy() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(
        prop_oneof![
            -1_000.0f64..25_000.0,
            Just(f64::NAN),
            Just(f64::INFINITY),
        ],
        1..40,
    )
}

fn engine_with(viewport: Viewport, spans: &[Span], reduced_motion: bool) -> ScrollEngine {
    let config = EngineConfig {
        reduced_motion,
        ..EngineConfig::home()
    };
    let elements = ElementSet {
        parallax: vec![ParallaxAttrs { scale: Some(1.3) }, ParallaxAttrs { scale: None }],
        grow: vec![GrowConfig::default()],
        speed: vec![SpeedAttrs { speed: Some(1.5) }],
        drift_children: vec![1, 5],
        reveal: vec![
            RevealAttrs { parent: 1, text: true },
            RevealAttrs { parent: 1, text: true },
            RevealAttrs { parent: 2, text: false },
        ],
    };
    let mut engine = ScrollEngine::new(config, elements);
    engine
        .measure(&Measurements {
            viewport,
            parallax: spans[0..2].to_vec(),
            grow: spans[2..3].to_vec(),
            drift: spans[3..5].to_vec(),
            reveal: spans[5..8].to_vec(),
        })
        .unwrap();
    engine
}

fn all_finite(frame: &FrameTransforms) -> bool {
    frame.scroll_y.is_finite()
        && frame
            .parallax
            .iter()
            .all(|p| p.offset.is_finite() && p.scale.is_finite())
        && frame.grow.iter().all(|g| {
            g.progress.is_finite() && g.frame_scale.is_finite() && g.secondary_scale.is_finite()
        })
        && frame.drift.iter().flatten().flatten().all(|d| d.is_finite())
        && frame.speed.iter().flatten().all(|s| s.is_finite())
}

// ═════════════════════════════════════════════════════════════════════════
// Frames
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn frames_are_finite_and_reveals_unique(
        viewport in viewport_strategy(),
        spans in prop::collection::vec(span_strategy(), 8),
        scrolls in scroll_strategy(),
    ) {
        let mut engine = engine_with(viewport, &spans, false);
        let mut seen = HashSet::new();
        for y in scrolls {
            let frame = engine.update(y);
            prop_assert!(all_finite(&frame), "non-finite frame at {y}: {frame:?}");
            for g in &frame.grow {
                prop_assert!((0.0..=1.0).contains(&g.progress));
            }
            for i in frame.revealed {
                prop_assert!(i < 3);
                prop_assert!(seen.insert(i), "target {i} revealed twice");
            }
        }
    }

    #[test]
    fn reduced_motion_is_static(
        viewport in viewport_strategy(),
        spans in prop::collection::vec(span_strategy(), 8),
        scrolls in scroll_strategy(),
    ) {
        let mut engine = engine_with(viewport, &spans, true);
        let mut total_revealed = 0;
        for y in scrolls {
            let frame = engine.update(y);
            prop_assert!(frame.parallax.is_empty());
            prop_assert!(frame.grow.is_empty());
            prop_assert!(frame.drift.is_empty());
            prop_assert!(frame.speed.is_empty());
            total_revealed += frame.revealed.len();
        }
        prop_assert_eq!(total_revealed, 3);
    }
}
