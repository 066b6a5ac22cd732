//! End-to-end driver lifecycle: load config, measure, scroll, resize, stop.

use std::cell::RefCell;
use std::rc::Rc;
use std::thread;

use pretty_assertions::assert_eq;
use scrollfx_core::{CssLength, GrowConfig, Span, Viewport};
use scrollfx_runtime::{
    ElementSet, EngineConfig, FrameTransforms, Measurements, ParallaxAttrs, RevealAttrs,
    ScrollDriver, ScrollEngine, ScrollTick,
};

const ABOUT_TOML: &str = r#"
page = "about"

[[drift]]
selector = ".s-a-a-1"
children = ".s-a-a-1-right, .s-a-a-1-left-wrapper"
factors = [0.15, 0.35]
"#;

fn elements() -> ElementSet {
    ElementSet {
        parallax: vec![ParallaxAttrs { scale: Some(1.2) }],
        grow: vec![GrowConfig {
            grow_distance: Some(CssLength::Vh(100.0)),
            hold_distance: Some(CssLength::Px(0.0)),
            ..GrowConfig::default()
        }],
        drift_children: vec![2],
        reveal: vec![
            RevealAttrs { parent: 1, text: true },
            RevealAttrs { parent: 2, text: true },
        ],
        ..ElementSet::default()
    }
}

fn measurements(width: f64, height: f64) -> Measurements {
    Measurements {
        viewport: Viewport::new(width, height),
        parallax: vec![Span::new(1000.0, 400.0)],
        grow: vec![Span::new(1000.0, 3.0 * height)],
        drift: vec![Span::new(4000.0, 600.0)],
        reveal: vec![Span::new(200.0, 80.0), Span::new(3000.0, 80.0)],
    }
}

#[test]
fn about_page_session() {
    let config = EngineConfig::from_toml_str(ABOUT_TOML).unwrap();
    let mut engine = ScrollEngine::new(config, elements());
    engine.measure(&measurements(1920.0, 800.0)).unwrap();
    let mut driver = ScrollDriver::new(engine);

    let frames: Rc<RefCell<Vec<FrameTransforms>>> = Rc::default();
    let sink = Rc::clone(&frames);
    driver
        .subscribe(move |frame| sink.borrow_mut().push(frame.clone()))
        .unwrap();

    for y in [0.0, 600.0, 1000.0, 1400.0, 1800.0, 2700.0, 3600.0] {
        assert!(driver.tick(y));
    }

    let frames = frames.borrow();
    assert_eq!(frames.len(), 7);

    // Grow progress rises from 0 and saturates once the section scrolled 800 px.
    let progress: Vec<f64> = frames.iter().map(|f| f.grow[0].progress).collect();
    assert_eq!(progress[0], 0.0);
    assert!((progress[3] - 0.5).abs() < 1e-12);
    assert_eq!(progress[4], 1.0);
    assert!(frames[4].grow[0].complete);
    assert!(progress.windows(2).all(|w| w[0] <= w[1]));

    // Header hides while pinned, shows again after the section.
    assert!(frames[3].header.hidden);
    assert!(!frames[6].header.hidden);
    assert!(frames[6].header.filled);

    // Each reveal reported exactly once across the session.
    let mut revealed: Vec<usize> = frames.iter().flat_map(|f| f.revealed.clone()).collect();
    revealed.sort_unstable();
    assert_eq!(revealed, vec![0, 1]);

    // Drift group wakes up near the fold.
    assert_eq!(frames[0].drift[0], vec![None, None]);
    assert!(frames[6].drift[0].iter().all(Option::is_some));
}

#[test]
fn resize_then_stop_from_another_thread() {
    let mut engine = ScrollEngine::new(EngineConfig::about(), elements());
    engine.measure(&measurements(1920.0, 800.0)).unwrap();
    let (mut driver, tx) = ScrollDriver::with_channel(engine);
    let handle = driver.stop_handle();

    let producer = thread::spawn(move || {
        tx.send(ScrollTick::Scroll(500.0)).unwrap();
        tx.send(ScrollTick::Resize(measurements(1385.0, 1000.0))).unwrap();
        tx.send(ScrollTick::Scroll(900.0)).unwrap();
    });
    producer.join().unwrap();

    assert_eq!(driver.pump(), Ok(3));
    assert!((driver.engine().responsive_scale() - 0.75).abs() < 1e-12);
    assert_eq!(driver.last_frame().map(|f| f.scroll_y), Some(900.0));
    assert_eq!(driver.frame_count(), 3);

    let stopper = thread::spawn(move || handle.stop());
    stopper.join().unwrap();

    assert!(!driver.tick(1000.0));
    assert!(driver.is_stopped());
    assert_eq!(driver.listener_count(), 0);
    assert_eq!(driver.pump(), Ok(0));
}
