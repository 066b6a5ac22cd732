#![forbid(unsafe_code)]

//! Progressive scale mapping for pinned "grow" sections.
//!
//! A grow section pins its content while the user scrolls through
//! `grow_distance_px`. Over that distance a frame scales linearly from
//! `start_scale` to `end_scale`, and a secondary element (typically a video)
//! scales over its own range, paced by a power curve. After the grow
//! distance the section stays pinned for `hold_distance_px` more pixels.
//!
//! ```text
//! progress        = clamp(-section_top / grow_distance_px, 0, 1)
//! frame_scale     = lerp(start_scale, end_scale, progress)
//! secondary_scale = lerp(video_start, video_end, clamp(progress ^ curve, 0, 1))
//! complete        = frame_scale >= 1
//! pinned_height   = viewport_height + grow_distance_px + hold_distance_px
//! ```
//!
//! The hold distance extends the pinned height only; it does not enter the
//! progress denominator.
//!
//! # Failure Modes
//!
//! - `grow_distance_px <= 0` (or non-finite): progress is `1.0`.
//! - Malformed configuration values fall back to the documented defaults.

use serde::{Deserialize, Serialize};

use crate::geometry::{Viewport, clamp, finite_or, lerp};
use crate::units::{CssLength, lenient};

/// Frame scale before the section starts growing.
pub const DEFAULT_START_SCALE: f64 = 0.7;
/// Frame scale once the grow distance has been scrolled.
pub const DEFAULT_END_SCALE: f64 = 1.0;
/// Linear pacing for the secondary element.
pub const DEFAULT_CURVE_EXPONENT: f64 = 1.0;
/// Scroll distance over which the section grows.
pub const DEFAULT_GROW_DISTANCE: CssLength = CssLength::Vh(120.0);
/// Extra pinned distance after the grow completes.
pub const DEFAULT_HOLD_DISTANCE: CssLength = CssLength::Vh(20.0);

/// Declarative grow configuration as authored on the section.
///
/// Every field is optional; missing or malformed values take the defaults
/// above. Video scales default to the frame scales.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrowConfig {
    /// Host-side label (for example a CSS selector); not interpreted here.
    pub label: String,
    /// Frame start scale.
    #[serde(deserialize_with = "lenient::number")]
    pub start_scale: Option<f64>,
    /// Frame end scale.
    #[serde(deserialize_with = "lenient::number")]
    pub end_scale: Option<f64>,
    /// Secondary start scale.
    #[serde(deserialize_with = "lenient::number")]
    pub video_start_scale: Option<f64>,
    /// Secondary end scale.
    #[serde(deserialize_with = "lenient::number")]
    pub video_end_scale: Option<f64>,
    /// Pacing exponent: `< 1` is faster at start, `> 1` slower at start.
    #[serde(deserialize_with = "lenient::number")]
    pub curve_exponent: Option<f64>,
    /// Grow distance (`"120vh"`, `"900px"`, ...).
    #[serde(deserialize_with = "lenient::length")]
    pub grow_distance: Option<CssLength>,
    /// Hold distance after the grow completes.
    #[serde(deserialize_with = "lenient::length")]
    pub hold_distance: Option<CssLength>,
}

/// Resolved, pixel-valued grow parameters for one section.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrowSectionState {
    pub start_scale: f64,
    pub end_scale: f64,
    pub video_start_scale: f64,
    pub video_end_scale: f64,
    pub curve_exponent: f64,
    pub grow_distance_px: f64,
    pub hold_distance_px: f64,
}

impl Default for GrowSectionState {
    fn default() -> Self {
        Self::resolve(&GrowConfig::default(), Viewport::default())
    }
}

impl GrowSectionState {
    /// Resolve `config` against `viewport`.
    ///
    /// Must be called again whenever the viewport changes, since the
    /// distances are usually viewport-relative.
    #[must_use]
    pub fn resolve(config: &GrowConfig, viewport: Viewport) -> Self {
        let start_scale = finite(config.start_scale).unwrap_or(DEFAULT_START_SCALE);
        let end_scale = finite(config.end_scale).unwrap_or(DEFAULT_END_SCALE);
        let grow = config.grow_distance.unwrap_or(DEFAULT_GROW_DISTANCE);
        let hold = config.hold_distance.unwrap_or(DEFAULT_HOLD_DISTANCE);
        Self {
            start_scale,
            end_scale,
            video_start_scale: finite(config.video_start_scale).unwrap_or(start_scale),
            video_end_scale: finite(config.video_end_scale).unwrap_or(end_scale),
            curve_exponent: finite(config.curve_exponent).unwrap_or(DEFAULT_CURVE_EXPONENT),
            grow_distance_px: grow.resolve(viewport),
            hold_distance_px: hold.resolve(viewport),
        }
    }

    /// Layout height the host gives the section so the pin lasts for the
    /// grow and hold distances.
    #[must_use]
    pub fn pinned_height(&self, viewport_height: f64) -> f64 {
        viewport_height + self.grow_distance_px.max(0.0) + self.hold_distance_px.max(0.0)
    }
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

/// Per-frame grow output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrowFrame {
    /// Normalized grow progress in `[0, 1]`.
    pub progress: f64,
    /// Scale for the pinned frame.
    pub frame_scale: f64,
    /// Scale for the secondary element.
    pub secondary_scale: f64,
    /// Whether the frame has reached full size.
    pub complete: bool,
}

/// Grow progress for a section whose top sits at `section_top` relative to
/// the viewport.
#[must_use]
pub fn grow_progress(section_top: f64, grow_distance_px: f64) -> f64 {
    if !(grow_distance_px.is_finite() && grow_distance_px > 0.0) {
        return 1.0;
    }
    clamp(-finite_or(section_top, 0.0) / grow_distance_px, 0.0, 1.0)
}

/// Map a section position to frame and secondary scales.
#[must_use]
pub fn compute_grow_scale(section_top: f64, state: &GrowSectionState) -> GrowFrame {
    let progress = grow_progress(section_top, state.grow_distance_px);
    let frame_scale = lerp(state.start_scale, state.end_scale, progress);
    let curved = clamp(progress.powf(state.curve_exponent), 0.0, 1.0);
    let secondary_scale = lerp(state.video_start_scale, state.video_end_scale, curved);
    GrowFrame {
        progress,
        frame_scale,
        secondary_scale,
        complete: frame_scale >= 1.0,
    }
}
