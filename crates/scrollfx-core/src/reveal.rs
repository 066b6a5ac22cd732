#![forbid(unsafe_code)]

//! Reveal-on-scroll geometry.
//!
//! Targets fade in once, the first time enough of them is on screen. The
//! observation root is the viewport with its bottom edge pulled up by a
//! margin, so elements reveal slightly before they are fully visible.
//!
//! # Invariants
//!
//! 1. [`intersection_ratio`] is always in `[0, 1]`.
//! 2. A revealed target never reverts ([`RevealTracker`] is a one-shot latch).
//! 3. With reduced motion every target is revealed from the start.
//! 4. Stagger delays restart at zero for every run of siblings.

use std::time::Duration;

use crate::geometry::{clamp, finite_or};

/// Minimum visible fraction before a target reveals.
pub const REVEAL_THRESHOLD: f64 = 0.12;
/// Fraction of the viewport height trimmed from the bottom of the root.
pub const REVEAL_BOTTOM_MARGIN: f64 = 0.15;
/// Delay between consecutive siblings in a stagger run.
pub const STAGGER_STEP: Duration = Duration::from_millis(70);

/// Fraction of an element visible inside the shrunken viewport root.
///
/// `top` is relative to the viewport. Zero-height elements count as fully
/// intersecting when their top lies within the root.
#[must_use]
pub fn intersection_ratio(top: f64, height: f64, viewport_height: f64, bottom_margin: f64) -> f64 {
    let top = finite_or(top, f64::INFINITY);
    let height = finite_or(height, 0.0).max(0.0);
    let root_bottom = viewport_height * (1.0 - clamp(bottom_margin, 0.0, 1.0));

    if height == 0.0 {
        return if top >= 0.0 && top <= root_bottom { 1.0 } else { 0.0 };
    }

    let visible = (top + height).min(root_bottom) - top.max(0.0);
    clamp(visible / height, 0.0, 1.0)
}

/// One-shot reveal latch for a fixed list of targets.
#[derive(Debug, Clone, PartialEq)]
pub struct RevealTracker {
    revealed: Vec<bool>,
    threshold: f64,
}

impl RevealTracker {
    /// Track `count` targets with the given threshold.
    #[must_use]
    pub fn new(count: usize, threshold: f64) -> Self {
        Self {
            revealed: vec![false; count],
            threshold: clamp(threshold, 0.0, 1.0),
        }
    }

    /// Record an observation for target `index`.
    ///
    /// Returns `true` only on the frame the target becomes revealed.
    /// Out-of-range indices are ignored.
    pub fn observe(&mut self, index: usize, ratio: f64) -> bool {
        let Some(slot) = self.revealed.get_mut(index) else {
            return false;
        };
        if *slot {
            return false;
        }
        if ratio > 0.0 && ratio >= self.threshold {
            *slot = true;
            return true;
        }
        false
    }

    /// Whether target `index` has been revealed.
    #[must_use]
    pub fn is_revealed(&self, index: usize) -> bool {
        self.revealed.get(index).copied().unwrap_or(false)
    }

    /// Number of revealed targets.
    #[must_use]
    pub fn revealed_count(&self) -> usize {
        self.revealed.iter().filter(|r| **r).count()
    }

    /// Whether every target has been revealed, after which observation can stop.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.revealed.iter().all(|r| *r)
    }

    /// Number of tracked targets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.revealed.len()
    }

    /// Whether no targets are tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.revealed.is_empty()
    }
}

/// Stagger delays for text targets in document order.
///
/// `parents[i]` identifies the parent of target `i`. Consecutive targets
/// sharing a parent form a run; the n-th member of a run waits `n * step`.
#[must_use]
pub fn stagger_delays<P: PartialEq>(parents: &[P], step: Duration) -> Vec<Duration> {
    let mut delays = Vec::with_capacity(parents.len());
    let mut run_index: u32 = 0;
    for (i, parent) in parents.iter().enumerate() {
        if i > 0 && parents[i - 1] == *parent {
            run_index += 1;
        } else {
            run_index = 0;
        }
        delays.push(step * run_index);
    }
    delays
}
