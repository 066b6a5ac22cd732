#![forbid(unsafe_code)]

//! scrollfx runtime
//!
//! This crate ties the pure math in `scrollfx-core` into a stateful engine a
//! page can drive once per animation frame.
//!
//! # Key Components
//!
//! - [`ScrollEngine`] - Tracked elements, cached geometry, per-frame update
//! - [`ScrollDriver`] - Injected scroll ticks fanned out to listeners
//! - [`EngineConfig`] - Page configuration from presets, JSON or TOML
//! - [`ElementSet`] - Per-element attributes read by the host
//! - [`ConfigError`] / [`EngineError`] - Typed failures outside frame time
//!
//! # Role in scrollfx
//! The host measures, the engine computes, the host applies. Measurement and
//! frame computation are separate calls so layout is never read and written
//! within the same step.

pub mod config;
pub mod driver;
pub mod engine;
pub mod error;
pub mod logging;

pub use config::{
    DriftGroupConfig, ElementSet, EngineConfig, ParallaxAttrs, RevealAttrs, RevealConfig,
    SelectorConfig, SpeedAttrs,
};
pub use driver::{ListenerId, ScrollDriver, ScrollTick, StopHandle};
pub use engine::{FrameTransforms, Measurements, ScrollEngine};
pub use error::{ConfigError, EngineError};
#[cfg(feature = "tracing-json")]
pub use logging::init_json_logging;
