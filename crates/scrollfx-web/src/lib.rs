#![forbid(unsafe_code)]

//! WASM runner for the scrollfx engine.
//!
//! This crate provides [`ScrollFxRunner`], a `wasm-bindgen`-exported struct
//! that wraps a `scrollfx_runtime::ScrollDriver` and exposes it to
//! JavaScript for host-driven execution. A typical page:
//!
//! ```js
//! const runner = new ScrollFxRunner("home");
//! runner.registerElements(JSON.stringify(readAttributes()));
//! runner.measure(JSON.stringify(readGeometry()));
//! lenis.on("scroll", ({ scroll }) => {
//!   runner.tick(scroll);
//!   apply(JSON.parse(runner.frameJson()));
//! });
//! ```

#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::ScrollFxRunner;

// Runner core is used by the wasm module and by native tests.
#[cfg(any(target_arch = "wasm32", test))]
mod runner_core;
