//! The engine and driver report lifecycle events through `tracing`.

use std::sync::{Arc, Mutex};

use scrollfx_core::{Span, Viewport};
use scrollfx_runtime::{
    ElementSet, EngineConfig, Measurements, ParallaxAttrs, ScrollDriver, ScrollEngine,
};
use tracing::Level;
use tracing_subscriber::layer::{Context, SubscriberExt};

#[derive(Debug, Clone)]
struct CapturedEvent {
    level: Level,
    message: String,
}

#[derive(Clone, Default)]
struct EventCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

struct MessageVisitor(String);

impl tracing::field::Visit for MessageVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.0 = format!("{value:?}");
        }
    }
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for EventCapture {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = MessageVisitor(String::new());
        event.record(&mut visitor);
        self.events.lock().unwrap().push(CapturedEvent {
            level: *event.metadata().level(),
            message: visitor.0,
        });
    }
}

fn with_captured_events<F: FnOnce()>(f: F) -> Vec<CapturedEvent> {
    let capture = EventCapture::default();
    let subscriber = tracing_subscriber::registry().with(capture.clone());
    tracing::subscriber::with_default(subscriber, f);
    let events = capture.events.lock().unwrap().clone();
    events
}

fn elements() -> ElementSet {
    ElementSet {
        parallax: vec![ParallaxAttrs { scale: None }],
        ..ElementSet::default()
    }
}

#[test]
fn lifecycle_events_are_logged() {
    let events = with_captured_events(|| {
        let config = EngineConfig::from_json_str(r#"{"page": "legal", "drift": []}"#).unwrap();
        let mut engine = ScrollEngine::new(config, elements());
        engine
            .measure(&Measurements {
                viewport: Viewport::new(1280.0, 720.0),
                parallax: vec![Span::new(900.0, 300.0)],
                ..Measurements::default()
            })
            .unwrap();
        let mut driver = ScrollDriver::new(engine);
        driver.tick(100.0);
        driver.stop();
    });

    let messages: Vec<(Level, &str)> = events
        .iter()
        .map(|e| (e.level, e.message.as_str()))
        .collect();
    assert!(messages.contains(&(Level::INFO, "config loaded")), "{messages:?}");
    assert!(messages.contains(&(Level::INFO, "measured")), "{messages:?}");
    assert!(messages.contains(&(Level::TRACE, "frame")), "{messages:?}");
    assert!(messages.contains(&(Level::INFO, "scroll driver stopped")), "{messages:?}");
}

#[test]
fn degenerate_viewport_warns() {
    let events = with_captured_events(|| {
        let mut engine = ScrollEngine::new(EngineConfig::legal(), elements());
        engine
            .measure(&Measurements {
                viewport: Viewport::new(0.0, 0.0),
                parallax: vec![Span::new(0.0, 0.0)],
                ..Measurements::default()
            })
            .unwrap();
    });
    assert!(
        events
            .iter()
            .any(|e| e.level == Level::WARN && e.message.contains("degenerate viewport"))
    );
}

#[test]
fn malformed_grow_length_warns_and_falls_back() {
    let events = with_captured_events(|| {
        let elements: ElementSet =
            serde_json::from_str(r#"{"grow": [{"grow_distance": "12 parsecs"}]}"#).unwrap();
        assert_eq!(elements.grow[0].grow_distance, None);
    });
    // Lenient attribute parsing degrades silently or with a warning, never an error.
    assert!(events.iter().all(|e| e.level != Level::ERROR));
}
