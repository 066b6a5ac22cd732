#![forbid(unsafe_code)]

//! `wasm-bindgen` exports for the ScrollFxRunner.
//!
//! This module wraps [`super::runner_core::RunnerCore`] with JS-friendly types.
//! Only compiled on `wasm32` targets.

use js_sys::{Object, Reflect};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use super::runner_core::RunnerCore;

fn console_error(msg: &str) {
    let global = js_sys::global();
    let Ok(console) = Reflect::get(&global, &"console".into()) else {
        return;
    };
    let Ok(error) = Reflect::get(&console, &"error".into()) else {
        return;
    };
    let Ok(error_fn) = error.dyn_into::<js_sys::Function>() else {
        return;
    };
    let _ = error_fn.call1(&console, &JsValue::from_str(msg));
}

fn install_panic_hook() {
    use std::sync::Once;

    static ONCE: Once = Once::new();
    ONCE.call_once(|| {
        std::panic::set_hook(Box::new(|info| {
            let msg = if let Some(loc) = info.location() {
                format!(
                    "panic at {}:{}:{}: {info}",
                    loc.file(),
                    loc.line(),
                    loc.column()
                )
            } else {
                format!("panic: {info}")
            };
            console_error(&msg);
        }));
    });
}

fn set_js(obj: &Object, key: &str, value: JsValue) {
    let _ = Reflect::set(obj, &JsValue::from_str(key), &value);
}

/// Scroll-transform runner for one page.
///
/// Host-driven: JavaScript measures the page, then calls `tick` from its
/// smooth-scroll callback and applies the transforms in `frameJson`.
#[wasm_bindgen]
pub struct ScrollFxRunner {
    inner: RunnerCore,
}

#[wasm_bindgen(start)]
pub fn wasm_start() {
    install_panic_hook();
}

#[wasm_bindgen]
impl ScrollFxRunner {
    /// Create a runner for a built-in preset (`home`, `about`, `legal`).
    #[wasm_bindgen(constructor)]
    pub fn new(preset: &str) -> Result<ScrollFxRunner, JsValue> {
        install_panic_hook();
        RunnerCore::from_preset(preset)
            .map(|inner| Self { inner })
            .map_err(|err| JsValue::from_str(&err.to_string()))
    }

    /// Create a runner from a JSON configuration.
    #[wasm_bindgen(js_name = fromConfig)]
    pub fn from_config(json: &str) -> Result<ScrollFxRunner, JsValue> {
        install_panic_hook();
        RunnerCore::from_config_json(json)
            .map(|inner| Self { inner })
            .map_err(|err| JsValue::from_str(&err.to_string()))
    }

    /// Replace the configuration. Registered elements and geometry are kept
    /// when their counts still match.
    #[wasm_bindgen(js_name = loadConfig)]
    pub fn load_config(&mut self, json: &str) -> bool {
        self.inner.load_config_json(json)
    }

    /// Register per-element attributes:
    /// `{ parallax: [{scale}], grow: [{...}], speed: [{speed}],
    ///    drift_children: [n], reveal: [{parent, text}] }`.
    #[wasm_bindgen(js_name = registerElements)]
    pub fn register_elements(&mut self, json: &str) -> bool {
        self.inner.register_elements_json(json)
    }

    /// Commit measured geometry:
    /// `{ viewport: {width, height}, parallax: [{top, height}], ... }`.
    pub fn measure(&mut self, json: &str) -> bool {
        self.inner.measure_json(json)
    }

    /// Commit geometry after a resize and re-render the last position.
    pub fn resize(&mut self, json: &str) -> bool {
        self.inner.resize_json(json)
    }

    /// Compute transforms for a scroll position.
    pub fn tick(&mut self, scroll_y: f64) -> bool {
        self.inner.tick(scroll_y)
    }

    /// Transforms of the last tick as JSON.
    #[wasm_bindgen(js_name = frameJson)]
    pub fn frame_json(&self) -> Option<String> {
        self.inner.frame_json()
    }

    /// Header flags of the last tick: `{ filled, hidden }`.
    #[wasm_bindgen(js_name = headerState)]
    pub fn header_state(&self) -> JsValue {
        let Some(frame) = self.inner.last_frame() else {
            return JsValue::NULL;
        };
        let obj = Object::new();
        set_js(&obj, "filled", JsValue::from_bool(frame.header.filled));
        set_js(&obj, "hidden", JsValue::from_bool(frame.header.hidden));
        obj.into()
    }

    #[wasm_bindgen(js_name = selectorsJson)]
    pub fn selectors_json(&self) -> Option<String> {
        self.inner.selectors_json()
    }

    #[wasm_bindgen(js_name = driftGroupsJson)]
    pub fn drift_groups_json(&self) -> Option<String> {
        self.inner.drift_groups_json()
    }

    /// Height to give each grow section, in pixels.
    #[wasm_bindgen(js_name = pinnedHeights)]
    pub fn pinned_heights(&self) -> Vec<f64> {
        self.inner.pinned_heights()
    }

    /// Transition delay per reveal target in ms (`-1` for images).
    #[wasm_bindgen(js_name = revealStagger)]
    pub fn reveal_stagger(&self) -> Vec<f64> {
        self.inner.reveal_stagger_ms()
    }

    #[wasm_bindgen(js_name = anchorTarget)]
    pub fn anchor_target(&self, element_top: f64) -> f64 {
        self.inner.anchor_target(element_top)
    }

    #[wasm_bindgen(js_name = setReducedMotion)]
    pub fn set_reduced_motion(&mut self, reduced: bool) {
        self.inner.set_reduced_motion(reduced);
    }

    /// Reason the last call returned `false`, cleared on read.
    #[wasm_bindgen(js_name = takeError)]
    pub fn take_error(&mut self) -> Option<String> {
        self.inner.take_error()
    }

    #[wasm_bindgen(js_name = frameCount)]
    pub fn frame_count(&self) -> f64 {
        self.inner.frame_count() as f64
    }

    /// Stop the runner and release its listeners.
    pub fn destroy(&mut self) {
        self.inner.destroy();
    }

    #[wasm_bindgen(js_name = isDestroyed)]
    pub fn is_destroyed(&self) -> bool {
        self.inner.is_destroyed()
    }
}
