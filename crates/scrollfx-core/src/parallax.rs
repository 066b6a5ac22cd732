#![forbid(unsafe_code)]

//! Parallax offset mapping for oversized images.
//!
//! A tracked element hosts an inner image scaled by `scale > 1`. The surplus
//! height, `extra = (scale - 1) * height`, is the shift budget: as the
//! element travels through the viewport the image slides from `+extra / 2`
//! to `-extra / 2`, never exposing its edges.
//!
//! The *scroll-through window* starts when the element's top touches the
//! bottom of the viewport and ends when its bottom leaves the top:
//!
//! ```text
//! window_start = top - viewport_height
//! window_end   = top + height
//! t            = clamp((scroll_y - window_start) / (window_end - window_start), 0, 1)
//! offset       = (0.5 - t) * extra
//! ```
//!
//! # Invariants
//!
//! 1. `offset == 0` when `t == 0.5` (element centered in its window).
//! 2. `|offset| <= |extra| / 2` for every scroll position.
//! 3. For `extra > 0`, `offset` is non-increasing in `scroll_y`.
//! 4. A zero-length window yields `t = 1`.

use serde::{Deserialize, Serialize};

use crate::geometry::{Span, finite_or, normalize};

/// Scale applied when an element does not configure one.
pub const DEFAULT_PARALLAX_SCALE: f64 = 1.2;

/// A parallax element and its geometry at the last measurement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackedElement {
    /// Measured height in pixels.
    pub height: f64,
    /// Document-relative top in pixels.
    pub top: f64,
    /// Configured image scale factor.
    pub scale: f64,
    /// Shift budget, `(scale - 1) * height`.
    pub extra: f64,
}

impl TrackedElement {
    /// Create an unmeasured element with the given scale.
    ///
    /// `None` or a non-finite scale falls back to [`DEFAULT_PARALLAX_SCALE`].
    #[must_use]
    pub fn new(scale: Option<f64>) -> Self {
        let scale = scale
            .filter(|s| s.is_finite())
            .unwrap_or(DEFAULT_PARALLAX_SCALE);
        Self {
            height: 0.0,
            top: 0.0,
            scale,
            extra: 0.0,
        }
    }

    /// Create an element and measure it in one step.
    #[must_use]
    pub fn measured(scale: Option<f64>, span: Span) -> Self {
        let mut element = Self::new(scale);
        element.measure(span);
        element
    }

    /// Commit freshly measured geometry and recompute the shift budget.
    pub fn measure(&mut self, span: Span) {
        let span = Span::new(span.top, span.height);
        self.top = span.top;
        self.height = span.height;
        self.extra = (self.scale - 1.0) * self.height;
    }

    /// The element's scroll-through window as `(start, end)`.
    #[must_use]
    pub fn window(&self, viewport_height: f64) -> (f64, f64) {
        (self.top - viewport_height, self.top + self.height)
    }
}

/// Per-frame parallax output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParallaxFrame {
    /// Vertical translation in pixels.
    pub offset: f64,
    /// Image scale, echoed so the host can set both values together.
    pub scale: f64,
}

/// Normalized position of `scroll_y` in the element's scroll-through window.
#[must_use]
pub fn scroll_through_progress(scroll_y: f64, viewport_height: f64, element: &TrackedElement) -> f64 {
    let (start, end) = element.window(viewport_height);
    normalize(finite_or(scroll_y, 0.0), start, end)
}

/// Signed parallax offset in pixels for `element` at `scroll_y`.
#[must_use]
pub fn compute_parallax_offset(scroll_y: f64, viewport_height: f64, element: &TrackedElement) -> f64 {
    let t = scroll_through_progress(scroll_y, viewport_height, element);
    finite_or((0.5 - t) * element.extra, 0.0)
}

impl TrackedElement {
    /// Full frame output for this element.
    #[must_use]
    pub fn frame(&self, scroll_y: f64, viewport_height: f64) -> ParallaxFrame {
        ParallaxFrame {
            offset: compute_parallax_offset(scroll_y, viewport_height, self),
            scale: self.scale,
        }
    }
}
