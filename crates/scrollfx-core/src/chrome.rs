#![forbid(unsafe_code)]

//! Header chrome state and anchor scrolling.

use serde::{Deserialize, Serialize};

use crate::geometry::Span;

/// Pixels before the first viewport ends at which the header fills in.
pub const HEADER_FILL_LEAD_PX: f64 = 100.0;
/// Sticky header height on the home and about pages.
pub const HOME_STICKY_OFFSET_PX: f64 = 64.0;
/// Sticky header height on the legal pages.
pub const LEGAL_STICKY_OFFSET_PX: f64 = 56.0;

/// Header flags derived from the scroll position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HeaderState {
    /// Solid (and inverted) header once the hero has scrolled away.
    pub filled: bool,
    /// Header hidden while a grow section is pinned.
    pub hidden: bool,
}

/// Whether the header should switch to its filled style.
#[must_use]
pub fn header_filled(scroll_y: f64, viewport_height: f64) -> bool {
    scroll_y > viewport_height - HEADER_FILL_LEAD_PX
}

/// Whether the top of the viewport lies inside any of `sections`.
#[must_use]
pub fn inside_any_section(scroll_y: f64, sections: &[Span]) -> bool {
    sections.iter().any(|s| s.contains(scroll_y))
}

/// Combined header state.
#[must_use]
pub fn header_state(scroll_y: f64, viewport_height: f64, pinned_sections: &[Span]) -> HeaderState {
    HeaderState {
        filled: header_filled(scroll_y, viewport_height),
        hidden: inside_any_section(scroll_y, pinned_sections),
    }
}

/// Scroll position that brings an anchor target just below the sticky header.
#[must_use]
pub fn anchor_scroll_target(element_top: f64, sticky_offset: f64) -> f64 {
    let target = element_top - sticky_offset;
    if target.is_finite() { target.max(0.0) } else { 0.0 }
}
