#![forbid(unsafe_code)]

//! Responsive damping factor for scroll-coupled offsets.
//!
//! Narrow viewports get gentler motion: offsets are multiplied by a factor
//! that ramps linearly from [`MIN_RESPONSIVE_SCALE`] at `min_width` to
//! [`MAX_RESPONSIVE_SCALE`] at `max_width`.
//!
//! # Invariants
//!
//! 1. Result is always in `[0.5, 1.0]`.
//! 2. Exactly `0.5` at or below `min_width`, exactly `1.0` at or above `max_width`.
//! 3. Continuous and non-decreasing in `viewport_width` for `min_width < max_width`.

use serde::{Deserialize, Serialize};

use crate::geometry::finite_or;

/// Factor applied at and below the minimum width.
pub const MIN_RESPONSIVE_SCALE: f64 = 0.5;
/// Factor applied at and above the maximum width.
pub const MAX_RESPONSIVE_SCALE: f64 = 1.0;

/// Width range over which the factor ramps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponsiveRange {
    pub min_width: f64,
    pub max_width: f64,
}

impl Default for ResponsiveRange {
    fn default() -> Self {
        Self {
            min_width: 850.0,
            max_width: 1920.0,
        }
    }
}

impl ResponsiveRange {
    /// Factor for `viewport_width` over this range.
    #[must_use]
    pub fn scale_for(&self, viewport_width: f64) -> f64 {
        compute_responsive_scale(viewport_width, self.min_width, self.max_width)
    }
}

/// Damping factor for `viewport_width` over `[min_width, max_width]`.
///
/// A non-finite width is treated as zero. When `max_width <= min_width` the
/// ramp collapses into a step at `max_width`.
#[must_use]
pub fn compute_responsive_scale(viewport_width: f64, min_width: f64, max_width: f64) -> f64 {
    let width = finite_or(viewport_width, 0.0);
    if width >= max_width {
        MAX_RESPONSIVE_SCALE
    } else if width <= min_width {
        MIN_RESPONSIVE_SCALE
    } else {
        let fraction = (width - min_width) / (max_width - min_width);
        MIN_RESPONSIVE_SCALE + fraction * (MAX_RESPONSIVE_SCALE - MIN_RESPONSIVE_SCALE)
    }
}
