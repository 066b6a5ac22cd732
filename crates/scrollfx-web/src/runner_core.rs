#![forbid(unsafe_code)]

//! Platform-independent runner core wrapping a [`ScrollDriver`].
//!
//! This module contains the logic shared between the wasm-bindgen exports
//! and the native test harness. No JS/WASM types here. Every input arrives
//! as a JSON string or a plain number, and malformed input is rejected with
//! `false` instead of a panic.

use scrollfx_runtime::{
    ConfigError, ElementSet, EngineConfig, FrameTransforms, Measurements, ScrollDriver,
    ScrollEngine,
};
use tracing::warn;

/// Platform-independent scroll runner.
pub struct RunnerCore {
    config: EngineConfig,
    elements: ElementSet,
    driver: ScrollDriver,
    /// Last accepted geometry, replayed when the engine is rebuilt.
    measurements: Option<Measurements>,
    /// Human-readable reason the last call was rejected.
    last_error: Option<String>,
    destroyed: bool,
}

#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
impl RunnerCore {
    /// Runner for a built-in page preset with no elements registered yet.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        Ok(Self::with_config(EngineConfig::preset(name)?))
    }

    /// Runner for a JSON configuration.
    pub fn from_config_json(json: &str) -> Result<Self, ConfigError> {
        Ok(Self::with_config(EngineConfig::from_json_str(json)?))
    }

    fn with_config(config: EngineConfig) -> Self {
        let elements = ElementSet::default();
        let driver = ScrollDriver::new(ScrollEngine::new(config.clone(), elements.clone()));
        Self {
            config,
            elements,
            driver,
            measurements: None,
            last_error: None,
            destroyed: false,
        }
    }

    /// Replace the page configuration. Returns `false` on invalid JSON.
    pub fn load_config_json(&mut self, json: &str) -> bool {
        if self.destroyed {
            return false;
        }
        match EngineConfig::from_json_str(json) {
            Ok(config) => {
                self.config = config;
                self.rebuild();
                true
            }
            Err(err) => self.reject("loadConfig", err.to_string()),
        }
    }

    /// Register the per-element attributes read from the page.
    pub fn register_elements_json(&mut self, json: &str) -> bool {
        if self.destroyed {
            return false;
        }
        match serde_json::from_str::<ElementSet>(json) {
            Ok(elements) => {
                self.elements = elements;
                self.rebuild();
                true
            }
            Err(err) => self.reject("registerElements", err.to_string()),
        }
    }

    /// Commit geometry without rendering a frame.
    pub fn measure_json(&mut self, json: &str) -> bool {
        if self.destroyed {
            return false;
        }
        let Some(m) = self.parse_measurements(json) else {
            return false;
        };
        match self.driver.engine_mut().measure(&m) {
            Ok(()) => {
                self.measurements = Some(m);
                true
            }
            Err(err) => self.reject("measure", err.to_string()),
        }
    }

    /// Commit geometry and re-render the last scroll position.
    pub fn resize_json(&mut self, json: &str) -> bool {
        if self.destroyed {
            return false;
        }
        let Some(m) = self.parse_measurements(json) else {
            return false;
        };
        match self.driver.resize(&m) {
            Ok(applied) => {
                self.measurements = Some(m);
                applied
            }
            Err(err) => self.reject("resize", err.to_string()),
        }
    }

    /// Compute a frame for `scroll_y`.
    pub fn tick(&mut self, scroll_y: f64) -> bool {
        !self.destroyed && self.driver.tick(scroll_y)
    }

    /// Most recent frame.
    pub fn last_frame(&self) -> Option<&FrameTransforms> {
        self.driver.last_frame()
    }

    /// Most recent frame as JSON, `None` before the first tick.
    pub fn frame_json(&self) -> Option<String> {
        self.last_frame()
            .and_then(|frame| serde_json::to_string(frame).ok())
    }

    /// Selectors the host should query, as JSON.
    pub fn selectors_json(&self) -> Option<String> {
        serde_json::to_string(&self.config.selectors).ok()
    }

    /// Drift group selectors with their factor arrays, as JSON.
    pub fn drift_groups_json(&self) -> Option<String> {
        serde_json::to_string(&self.config.drift).ok()
    }

    /// Layout height per grow section.
    pub fn pinned_heights(&self) -> Vec<f64> {
        self.driver.engine().pinned_heights()
    }

    /// Stagger delay in milliseconds per reveal target, `-1` for image targets.
    pub fn reveal_stagger_ms(&self) -> Vec<f64> {
        self.driver
            .engine()
            .reveal_stagger()
            .iter()
            .copied()
            .map(|d| d.map_or(-1.0, |d| d.as_secs_f64() * 1_000.0))
            .collect()
    }

    /// Scroll target for an anchor whose document top is `element_top`.
    pub fn anchor_target(&self, element_top: f64) -> f64 {
        self.driver.engine().anchor_target(element_top)
    }

    pub fn reduced_motion(&self) -> bool {
        self.config.reduced_motion
    }

    /// Switch reduced motion on or off, keeping registered elements.
    pub fn set_reduced_motion(&mut self, reduced: bool) {
        if self.destroyed || self.config.reduced_motion == reduced {
            return;
        }
        self.config.reduced_motion = reduced;
        self.rebuild();
    }

    pub fn frame_count(&self) -> u64 {
        self.driver.frame_count()
    }

    pub fn is_measured(&self) -> bool {
        self.driver.engine().is_measured()
    }

    /// Take the last rejection message, if any.
    pub fn take_error(&mut self) -> Option<String> {
        self.last_error.take()
    }

    /// Stop the driver; every later call is a no-op.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;
        self.driver.stop();
        self.measurements = None;
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Rebuild the engine after a config or element change.
    ///
    /// Stored geometry is replayed when its counts still match; otherwise
    /// the host has to measure again. The driver keeps its scroll position,
    /// so the next resize renders where the page actually is.
    fn rebuild(&mut self) {
        let mut engine = ScrollEngine::new(self.config.clone(), self.elements.clone());
        let stale = self
            .measurements
            .as_ref()
            .is_some_and(|m| engine.measure(m).is_err());
        if stale {
            self.measurements = None;
        }
        self.driver.replace_engine(engine);
    }

    fn parse_measurements(&mut self, json: &str) -> Option<Measurements> {
        match serde_json::from_str::<Measurements>(json) {
            Ok(m) => Some(m),
            Err(err) => {
                self.reject("measurements", err.to_string());
                None
            }
        }
    }

    fn reject(&mut self, call: &str, message: String) -> bool {
        warn!(call, %message, "runner call rejected");
        self.last_error = Some(format!("{call}: {message}"));
        false
    }
}
