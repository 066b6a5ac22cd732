#![forbid(unsafe_code)]

//! Core: pure scroll-to-transform math.
//!
//! # Role in scrollfx
//! `scrollfx-core` is the geometry layer. It turns a scroll position, a
//! viewport size and already-measured element boxes into transform
//! parameters (pixel offsets, scale factors, reveal flags). It never reads
//! layout and never writes styles; the host does both.
//!
//! # Primary responsibilities
//! - **Parallax**: oversized images drifting through their scroll-through window.
//! - **Grow**: pinned sections scaling up over a fixed scroll distance.
//! - **Responsive scale**: damping factor for narrow viewports.
//! - **Drift / speed**: linear scroll-coupled translations.
//! - **Reveal**: one-shot in-view detection and sibling stagger.
//! - **Units**: `vh` / `vw` / `px` length resolution.
//!
//! # How it fits in the system
//! `scrollfx-runtime` owns the mutable engine built on these functions, and
//! `scrollfx-web` exposes that engine to a JavaScript host. Everything here
//! is deterministic and allocation-light so it can run once per frame.

pub mod chrome;
pub mod drift;
pub mod geometry;
pub mod grow;
pub mod logging;
pub mod parallax;
pub mod responsive;
pub mod reveal;
pub mod units;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, trace, warn};

pub use chrome::{HeaderState, anchor_scroll_target, header_filled, header_state, inside_any_section};
pub use drift::{compute_drift_offset, compute_drift_offsets, compute_speed_offset, drift_visible};
pub use geometry::{Span, Viewport, clamp, lerp, normalize};
pub use grow::{GrowConfig, GrowFrame, GrowSectionState, compute_grow_scale, grow_progress};
pub use parallax::{ParallaxFrame, TrackedElement, compute_parallax_offset, scroll_through_progress};
pub use responsive::{ResponsiveRange, compute_responsive_scale};
pub use reveal::{RevealTracker, intersection_ratio, stagger_delays};
pub use units::{CssLength, LengthParseError};
