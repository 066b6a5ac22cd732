#![forbid(unsafe_code)]

//! Linear scroll-coupled translations.
//!
//! Two simpler relatives of parallax:
//!
//! - **Drift**: children of a section translate by
//!   `factor * responsive_scale * (anchor_top - scroll_y)`, each child with
//!   its own factor. Gated groups only update while the section is inside a
//!   band around the viewport; outside it the host keeps the last transform.
//! - **Speed**: hero elements translate by `scroll_y * speed * 0.1` until the
//!   page has scrolled one and a half viewports, then freeze.

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Per-child drift factors of the home page image group.
pub const HOME_DRIFT_FACTORS: [f64; 5] = [0.22, 0.15, 0.08, 0.15, 0.22];
/// Per-child drift factors of the about page image group.
pub const ABOUT_DRIFT_FACTORS: [f64; 2] = [0.15, 0.35];
/// Factor for a single ungated element drifting against the scroll.
pub const ANCHOR_DRIFT_FACTOR: f64 = -0.1;

/// Viewports ahead of the section at which drift starts updating.
pub const DRIFT_LEAD_VIEWPORTS: f64 = 1.5;
/// Viewports past the section's bottom at which drift stops updating.
pub const DRIFT_TRAIL_VIEWPORTS: f64 = 0.5;

/// Multiplier converting a speed attribute into pixels per scrolled pixel.
pub const SPEED_SCALE: f64 = 0.1;
/// Scroll depth, in viewports, after which speed elements freeze.
pub const SPEED_CUTOFF_VIEWPORTS: f64 = 1.5;

// ---------------------------------------------------------------------------
// Drift
// ---------------------------------------------------------------------------

/// Whether a gated drift group should update this frame.
///
/// `section_top` is relative to the viewport.
#[must_use]
pub fn drift_visible(section_top: f64, section_height: f64, viewport_height: f64) -> bool {
    section_top - DRIFT_LEAD_VIEWPORTS * viewport_height < 0.0
        && section_top + section_height + DRIFT_TRAIL_VIEWPORTS * viewport_height > 0.0
}

/// Translation for one drifting child.
#[must_use]
pub fn compute_drift_offset(factor: f64, responsive_scale: f64, anchor_top: f64, scroll_y: f64) -> f64 {
    let offset = factor * responsive_scale * (anchor_top - scroll_y);
    if offset.is_finite() { offset } else { 0.0 }
}

/// Translations for `child_count` children using `factors` in order.
///
/// Children without a factor get `None` (left untransformed).
#[must_use]
pub fn compute_drift_offsets(
    factors: &[f64],
    child_count: usize,
    responsive_scale: f64,
    anchor_top: f64,
    scroll_y: f64,
) -> Vec<Option<f64>> {
    (0..child_count)
        .map(|i| {
            factors
                .get(i)
                .map(|&factor| compute_drift_offset(factor, responsive_scale, anchor_top, scroll_y))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Speed
// ---------------------------------------------------------------------------

/// Translation for a speed element, or `None` once past the cutoff.
#[must_use]
pub fn compute_speed_offset(scroll_y: f64, speed: f64, viewport_height: f64) -> Option<f64> {
    if scroll_y < SPEED_CUTOFF_VIEWPORTS * viewport_height {
        let offset = scroll_y * speed * SPEED_SCALE;
        Some(if offset.is_finite() { offset } else { 0.0 })
    } else {
        None
    }
}
