#![forbid(unsafe_code)]

//! The scroll engine: tracked elements, cached geometry, per-frame update.
//!
//! [`ScrollEngine`] owns every tracked element for one page. The host
//! drives it with two calls:
//!
//! 1. [`measure`](ScrollEngine::measure) after load and on every resize,
//!    passing freshly read geometry. This recomputes shift budgets, resolves
//!    viewport-relative distances and the responsive factor.
//! 2. [`update`](ScrollEngine::update) once per animation frame with the
//!    current scroll position, returning every transform to apply.
//!
//! Both take `&mut self`, so a measurement pass can never interleave with a
//! transform computation.
//!
//! # Invariants
//!
//! 1. Element counts are fixed at construction; measurements must match.
//! 2. `update` never fails and never produces NaN.
//! 3. Reveal indices are reported exactly once.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace, warn};

use scrollfx_core::chrome::{HeaderState, anchor_scroll_target, header_state};
use scrollfx_core::drift::{compute_drift_offsets, compute_speed_offset, drift_visible};
use scrollfx_core::geometry::{Span, Viewport, finite_or};
use scrollfx_core::grow::{GrowConfig, GrowFrame, GrowSectionState, compute_grow_scale};
use scrollfx_core::parallax::{ParallaxFrame, TrackedElement};
use scrollfx_core::reveal::{RevealTracker, intersection_ratio, stagger_delays};

use crate::config::{ElementSet, EngineConfig, RevealAttrs};
use crate::error::EngineError;

/// Geometry read by the host, in the same order as the [`ElementSet`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Measurements {
    pub viewport: Viewport,
    pub parallax: Vec<Span>,
    pub grow: Vec<Span>,
    pub drift: Vec<Span>,
    pub reveal: Vec<Span>,
}

/// Every transform for one frame.
///
/// Empty vectors mean "leave untouched" (reduced motion). A `None` offset
/// means the host keeps the element's previous transform.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameTransforms {
    pub scroll_y: f64,
    pub parallax: Vec<ParallaxFrame>,
    pub grow: Vec<GrowFrame>,
    pub drift: Vec<Vec<Option<f64>>>,
    pub speed: Vec<Option<f64>>,
    /// Reveal targets that became visible this frame.
    pub revealed: Vec<usize>,
    pub header: HeaderState,
}

#[derive(Debug, Clone)]
struct GrowSlot {
    config: GrowConfig,
    state: GrowSectionState,
    span: Span,
}

#[derive(Debug, Clone)]
struct DriftSlot {
    factors: Vec<f64>,
    gated: bool,
    children: usize,
    span: Span,
}

/// Scroll-transform engine for one page.
#[derive(Debug, Clone)]
pub struct ScrollEngine {
    config: EngineConfig,
    viewport: Viewport,
    responsive_scale: f64,
    parallax: Vec<TrackedElement>,
    grow: Vec<GrowSlot>,
    drift: Vec<DriftSlot>,
    speed: Vec<f64>,
    reveal_spans: Vec<Span>,
    reveal: RevealTracker,
    stagger: Vec<Option<Duration>>,
    measured: bool,
}

impl ScrollEngine {
    /// Build an engine for `elements` under `config`.
    ///
    /// Drift groups beyond `elements.drift_children` get zero children.
    #[must_use]
    pub fn new(config: EngineConfig, elements: ElementSet) -> Self {
        let default_scale = config.default_parallax_scale;
        let parallax = elements
            .parallax
            .iter()
            .map(|attrs| TrackedElement::new(Some(attrs.scale.unwrap_or(default_scale))))
            .collect();

        let viewport = Viewport::default();
        let grow = elements
            .grow
            .into_iter()
            .map(|config| GrowSlot {
                state: GrowSectionState::resolve(&config, viewport),
                config,
                span: Span::default(),
            })
            .collect();

        let drift = config
            .drift
            .iter()
            .enumerate()
            .map(|(i, group)| DriftSlot {
                factors: group.factors.clone(),
                gated: group.gated,
                children: elements.drift_children.get(i).copied().unwrap_or(0),
                span: Span::default(),
            })
            .collect();

        let speed = elements
            .speed
            .iter()
            .map(|attrs| attrs.speed.unwrap_or(0.0))
            .collect();

        let stagger = reveal_stagger(&elements.reveal, config.reveal.stagger_step_ms);
        let reveal = RevealTracker::new(elements.reveal.len(), config.reveal.threshold);

        Self {
            responsive_scale: config.responsive.scale_for(viewport.width),
            viewport,
            parallax,
            grow,
            drift,
            speed,
            reveal_spans: vec![Span::default(); elements.reveal.len()],
            reveal,
            stagger,
            measured: false,
            config,
        }
    }

    /// Commit fresh geometry.
    pub fn measure(&mut self, m: &Measurements) -> Result<(), EngineError> {
        check_count("parallax", self.parallax.len(), m.parallax.len())?;
        check_count("grow", self.grow.len(), m.grow.len())?;
        check_count("drift", self.drift.len(), m.drift.len())?;
        check_count("reveal", self.reveal_spans.len(), m.reveal.len())?;

        let viewport = Viewport::new(m.viewport.width, m.viewport.height);
        if !viewport.is_valid() {
            warn!(
                width = m.viewport.width,
                height = m.viewport.height,
                "degenerate viewport; transforms will saturate"
            );
        }
        self.viewport = viewport;
        self.responsive_scale = self.config.responsive.scale_for(viewport.width);

        for (el, span) in self.parallax.iter_mut().zip(&m.parallax) {
            el.measure(*span);
        }
        for (slot, span) in self.grow.iter_mut().zip(&m.grow) {
            slot.state = GrowSectionState::resolve(&slot.config, viewport);
            slot.span = Span::new(span.top, span.height);
        }
        for (slot, span) in self.drift.iter_mut().zip(&m.drift) {
            slot.span = Span::new(span.top, span.height);
        }
        for (slot, span) in self.reveal_spans.iter_mut().zip(&m.reveal) {
            *slot = Span::new(span.top, span.height);
        }
        self.measured = true;

        info!(
            page = %self.config.page,
            width = viewport.width,
            height = viewport.height,
            responsive_scale = self.responsive_scale,
            parallax = self.parallax.len(),
            grow = self.grow.len(),
            "measured"
        );
        Ok(())
    }

    /// Compute every transform for `scroll_y`.
    pub fn update(&mut self, scroll_y: f64) -> FrameTransforms {
        let scroll_y = finite_or(scroll_y, 0.0);
        if !self.measured {
            debug!("update before first measure; using zero geometry");
        }
        let vh = self.viewport.height;
        let pinned: Vec<Span> = self.grow.iter().map(|s| s.span).collect();
        let header = header_state(scroll_y, vh, &pinned);

        if self.config.reduced_motion {
            let revealed = (0..self.reveal.len())
                .filter(|&i| self.reveal.observe(i, 1.0))
                .collect();
            return FrameTransforms {
                scroll_y,
                revealed,
                header,
                ..FrameTransforms::default()
            };
        }

        let parallax = self.parallax.iter().map(|el| el.frame(scroll_y, vh)).collect();

        let grow = self
            .grow
            .iter()
            .map(|slot| compute_grow_scale(slot.span.top_in_viewport(scroll_y), &slot.state))
            .collect();

        let drift = self
            .drift
            .iter()
            .map(|slot| {
                let visible =
                    !slot.gated || drift_visible(slot.span.top_in_viewport(scroll_y), slot.span.height, vh);
                if visible {
                    compute_drift_offsets(
                        &slot.factors,
                        slot.children,
                        self.responsive_scale,
                        slot.span.top,
                        scroll_y,
                    )
                } else {
                    vec![None; slot.children]
                }
            })
            .collect();

        let speed = self
            .speed
            .iter()
            .map(|&s| compute_speed_offset(scroll_y, s, vh))
            .collect();

        let mut revealed = Vec::new();
        if !self.reveal.is_done() {
            for (i, span) in self.reveal_spans.iter().enumerate() {
                let ratio = intersection_ratio(
                    span.top_in_viewport(scroll_y),
                    span.height,
                    vh,
                    self.config.reveal.bottom_margin,
                );
                if self.reveal.observe(i, ratio) {
                    revealed.push(i);
                }
            }
        }

        trace!(scroll_y, revealed = revealed.len(), "frame");
        FrameTransforms {
            scroll_y,
            parallax,
            grow,
            drift,
            speed,
            revealed,
            header,
        }
    }

    /// Layout height for each grow section at the current viewport.
    #[must_use]
    pub fn pinned_heights(&self) -> Vec<f64> {
        self.grow
            .iter()
            .map(|slot| slot.state.pinned_height(self.viewport.height))
            .collect()
    }

    /// Stagger delay per reveal target (`None` for image targets).
    #[must_use]
    pub fn reveal_stagger(&self) -> &[Option<Duration>] {
        &self.stagger
    }

    /// Scroll position for an in-page anchor whose top is at `element_top`.
    #[must_use]
    pub fn anchor_target(&self, element_top: f64) -> f64 {
        anchor_scroll_target(element_top, self.config.sticky_offset_px)
    }

    /// Whether [`measure`](Self::measure) has run at least once.
    #[must_use]
    pub fn is_measured(&self) -> bool {
        self.measured
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn responsive_scale(&self) -> f64 {
        self.responsive_scale
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Tracked parallax elements with their cached geometry.
    #[must_use]
    pub fn parallax_elements(&self) -> &[TrackedElement] {
        &self.parallax
    }

    /// Resolved grow parameters per section.
    pub fn grow_states(&self) -> impl Iterator<Item = &GrowSectionState> {
        self.grow.iter().map(|slot| &slot.state)
    }
}

fn check_count(kind: &'static str, expected: usize, got: usize) -> Result<(), EngineError> {
    if expected == got {
        Ok(())
    } else {
        Err(EngineError::MeasurementCount {
            kind,
            expected,
            got,
        })
    }
}

/// Stagger text targets by parent run; image targets get `None`.
fn reveal_stagger(targets: &[RevealAttrs], step_ms: u64) -> Vec<Option<Duration>> {
    let text_parents: Vec<u32> = targets.iter().filter(|t| t.text).map(|t| t.parent).collect();
    let mut text_delays = stagger_delays(&text_parents, Duration::from_millis(step_ms)).into_iter();
    targets
        .iter()
        .map(|t| if t.text { text_delays.next() } else { None })
        .collect()
}
