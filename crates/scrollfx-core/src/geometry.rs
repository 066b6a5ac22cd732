#![forbid(unsafe_code)]

//! Geometric primitives and scalar helpers shared by every mapping.
//!
//! All coordinates are CSS pixels. Document-relative values grow downward
//! from the top of the page; viewport-relative values are document values
//! minus the current scroll offset.
//!
//! # Invariants
//!
//! 1. [`clamp`] never returns NaN: a NaN input maps to the lower bound.
//! 2. [`normalize`] always lands in `[0, 1]`; an empty or inverted range
//!    counts as already traversed (`1.0`).
//! 3. [`lerp`] returns `a` exactly at `t = 0` and `b` exactly at `t = 1`.

use serde::{Deserialize, Serialize};

/// Clamp `value` into `[lo, hi]`.
///
/// Unlike [`f64::clamp`] this does not panic when `lo > hi` (the lower bound
/// wins) and maps NaN to `lo`.
#[inline]
#[must_use]
pub fn clamp(value: f64, lo: f64, hi: f64) -> f64 {
    if value.is_nan() {
        return lo;
    }
    lo.max(hi.min(value))
}

/// Linear interpolation between `a` and `b`.
///
/// Written as a weighted sum so both endpoints are reproduced exactly.
#[inline]
#[must_use]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a * (1.0 - t) + b * t
}

/// Normalize `value` into `[0, 1]` over the range `[start, end]`.
///
/// A zero-length, inverted or non-finite range yields `1.0` so callers never
/// divide by zero.
#[inline]
#[must_use]
pub fn normalize(value: f64, start: f64, end: f64) -> f64 {
    let span = end - start;
    if !(span.is_finite() && span > 0.0) {
        return 1.0;
    }
    clamp((value - start) / span, 0.0, 1.0)
}

/// Replace a non-finite value with `fallback`.
#[inline]
#[must_use]
pub fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() { value } else { fallback }
}

// ---------------------------------------------------------------------------
// Viewport
// ---------------------------------------------------------------------------

/// Visible window size in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Viewport {
    /// Inner width.
    pub width: f64,
    /// Inner height.
    pub height: f64,
}

impl Viewport {
    /// Create a viewport, sanitizing negative or non-finite sizes to zero.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: finite_or(width, 0.0).max(0.0),
            height: finite_or(height, 0.0).max(0.0),
        }
    }

    /// Whether both dimensions are strictly positive.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

// ---------------------------------------------------------------------------
// Span
// ---------------------------------------------------------------------------

/// Vertical extent of a measured element, document-relative.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Span {
    /// Top edge, in pixels from the top of the document.
    pub top: f64,
    /// Height in pixels.
    pub height: f64,
}

impl Span {
    /// Create a span. Negative or non-finite heights collapse to zero and a
    /// non-finite top becomes zero.
    #[must_use]
    pub fn new(top: f64, height: f64) -> Self {
        Self {
            top: finite_or(top, 0.0),
            height: finite_or(height, 0.0).max(0.0),
        }
    }

    /// Bottom edge (exclusive).
    #[inline]
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Top edge relative to the viewport at `scroll_y`.
    #[inline]
    #[must_use]
    pub fn top_in_viewport(&self, scroll_y: f64) -> f64 {
        self.top - scroll_y
    }

    /// Whether `y` lies within `[top, bottom)`.
    #[inline]
    #[must_use]
    pub fn contains(&self, y: f64) -> bool {
        y >= self.top && y < self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_maps_nan_to_lower_bound() {
        assert_eq!(clamp(f64::NAN, 0.0, 1.0), 0.0);
        assert_eq!(clamp(f64::INFINITY, 0.0, 1.0), 1.0);
        assert_eq!(clamp(f64::NEG_INFINITY, 0.0, 1.0), 0.0);
        assert_eq!(clamp(0.25, 0.0, 1.0), 0.25);
    }

    #[test]
    fn lerp_hits_endpoints_exactly() {
        assert_eq!(lerp(0.7, 1.0, 0.0), 0.7);
        assert_eq!(lerp(0.7, 1.0, 1.0), 1.0);
        assert_eq!(lerp(0.3, 0.9, 1.0), 0.9);
    }

    #[test]
    fn normalize_degenerate_range_is_complete() {
        assert_eq!(normalize(5.0, 10.0, 10.0), 1.0);
        assert_eq!(normalize(5.0, 10.0, 0.0), 1.0);
        assert_eq!(normalize(5.0, 0.0, f64::NAN), 1.0);
    }

    #[test]
    fn normalize_clamps_outside_range() {
        assert_eq!(normalize(-10.0, 0.0, 100.0), 0.0);
        assert_eq!(normalize(50.0, 0.0, 100.0), 0.5);
        assert_eq!(normalize(500.0, 0.0, 100.0), 1.0);
    }

    #[test]
    fn span_sanitizes_inputs() {
        let span = Span::new(f64::NAN, -20.0);
        assert_eq!(span, Span::new(0.0, 0.0));
        let span = Span::new(100.0, 50.0);
        assert_eq!(span.bottom(), 150.0);
        assert_eq!(span.top_in_viewport(40.0), 60.0);
        assert!(span.contains(100.0));
        assert!(!span.contains(150.0));
    }

    #[test]
    fn viewport_validity() {
        assert!(Viewport::new(1280.0, 800.0).is_valid());
        assert!(!Viewport::new(1280.0, 0.0).is_valid());
        assert_eq!(Viewport::new(-5.0, f64::NAN), Viewport::default());
    }
}
