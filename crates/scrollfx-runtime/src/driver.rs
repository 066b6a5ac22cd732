#![forbid(unsafe_code)]

//! Tick driver: feeds scroll positions into the engine and fans frames out.
//!
//! The engine does not know where scroll positions come from. A smoothing
//! library, a native scroll listener or a test harness all push plain
//! numbers into a [`ScrollDriver`], either directly with
//! [`tick`](ScrollDriver::tick) or through a channel drained by
//! [`pump`](ScrollDriver::pump).
//!
//! # Lifecycle
//!
//! 1. Build the driver around a [`ScrollEngine`].
//! 2. [`subscribe`](ScrollDriver::subscribe) listeners that apply transforms.
//! 3. Feed ticks and resizes.
//! 4. [`stop`](ScrollDriver::stop) on teardown, or trigger a [`StopHandle`]
//!    from elsewhere. After stopping, every tick is ignored and all
//!    listeners have been dropped.
//!
//! Resizes are applied before any tick queued after them, so a frame never
//! reads half-committed geometry.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;

use tracing::{debug, info};

use crate::engine::{FrameTransforms, Measurements, ScrollEngine};
use crate::error::EngineError;

/// Identifier returned by [`ScrollDriver::subscribe`].
pub type ListenerId = u64;

type Listener = Box<dyn FnMut(&FrameTransforms)>;

/// Input accepted over the driver's channel.
#[derive(Debug, Clone, PartialEq)]
pub enum ScrollTick {
    /// New scroll position in pixels.
    Scroll(f64),
    /// New geometry after a layout change.
    Resize(Measurements),
    /// Tear down the driver.
    Stop,
}

/// Cloneable, thread-safe handle that stops a driver.
///
/// Dropping the handle does **not** stop the driver.
#[derive(Debug, Clone, Default)]
pub struct StopHandle {
    stopped: Arc<AtomicBool>,
}

impl StopHandle {
    /// Request the driver to stop; takes effect on its next call.
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::Release);
    }

    /// Whether a stop has been requested.
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Acquire)
    }
}

/// Drives a [`ScrollEngine`] from injected scroll ticks.
pub struct ScrollDriver {
    engine: ScrollEngine,
    listeners: Vec<(ListenerId, Listener)>,
    next_id: ListenerId,
    receiver: Option<mpsc::Receiver<ScrollTick>>,
    stop: StopHandle,
    torn_down: bool,
    last_scroll: f64,
    last_frame: Option<FrameTransforms>,
    frames: u64,
}

impl std::fmt::Debug for ScrollDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrollDriver")
            .field("listeners", &self.listeners.len())
            .field("has_channel", &self.receiver.is_some())
            .field("stopped", &self.is_stopped())
            .field("last_scroll", &self.last_scroll)
            .field("frames", &self.frames)
            .finish()
    }
}

impl ScrollDriver {
    /// Create a driver fed by direct calls.
    #[must_use]
    pub fn new(engine: ScrollEngine) -> Self {
        Self {
            engine,
            listeners: Vec::new(),
            next_id: 1,
            receiver: None,
            stop: StopHandle::default(),
            torn_down: false,
            last_scroll: 0.0,
            last_frame: None,
            frames: 0,
        }
    }

    /// Create a driver plus the sender half of its tick channel.
    #[must_use]
    pub fn with_channel(engine: ScrollEngine) -> (Self, mpsc::Sender<ScrollTick>) {
        let (tx, rx) = mpsc::channel();
        let mut driver = Self::new(engine);
        driver.receiver = Some(rx);
        (driver, tx)
    }

    /// Register a listener called with every frame.
    ///
    /// Returns `None` once the driver has stopped.
    pub fn subscribe<F>(&mut self, listener: F) -> Option<ListenerId>
    where
        F: FnMut(&FrameTransforms) + 'static,
    {
        if self.check_stopped() {
            return None;
        }
        let id = self.next_id;
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        Some(id)
    }

    /// Remove a listener. Returns whether it was registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    /// Process one scroll position. Returns `false` if the driver has stopped.
    pub fn tick(&mut self, scroll_y: f64) -> bool {
        if self.check_stopped() {
            return false;
        }
        self.render(scroll_y);
        true
    }

    /// Commit new geometry and re-render the last scroll position.
    ///
    /// Returns `Ok(false)` if the driver has stopped.
    pub fn resize(&mut self, measurements: &Measurements) -> Result<bool, EngineError> {
        if self.check_stopped() {
            return Ok(false);
        }
        self.engine.measure(measurements)?;
        self.render(self.last_scroll);
        Ok(true)
    }

    /// Swap in a rebuilt engine, keeping listeners and the scroll position.
    ///
    /// When the new engine is measured and a frame was already rendered,
    /// the last position is rendered again. Otherwise the previous frame is
    /// dropped and the next tick or resize renders from the kept position.
    /// Returns `false` if the driver has stopped.
    pub fn replace_engine(&mut self, engine: ScrollEngine) -> bool {
        if self.check_stopped() {
            return false;
        }
        self.engine = engine;
        self.last_frame = None;
        let rerender = self.frames > 0 && self.engine.is_measured();
        debug!(rerender, scroll_y = self.last_scroll, "engine replaced");
        if rerender {
            self.render(self.last_scroll);
        }
        true
    }

    /// Scroll position of the most recent frame.
    #[must_use]
    pub fn last_scroll(&self) -> f64 {
        self.last_scroll
    }

    /// Drain the tick channel in order. Returns the number of ticks handled.
    ///
    /// Consecutive scroll ticks are coalesced: only the latest position in a
    /// run is rendered.
    pub fn pump(&mut self) -> Result<usize, EngineError> {
        let Some(rx) = self.receiver.take() else {
            return Ok(0);
        };
        let mut handled = 0;
        let mut pending_scroll: Option<f64> = None;
        let mut result = Ok(());

        while let Ok(tick) = rx.try_recv() {
            if self.check_stopped() {
                break;
            }
            handled += 1;
            match tick {
                ScrollTick::Scroll(y) => pending_scroll = Some(y),
                ScrollTick::Resize(m) => {
                    if let Some(y) = pending_scroll.take() {
                        self.render(y);
                    }
                    if let Err(e) = self.resize(&m) {
                        result = Err(e);
                        break;
                    }
                }
                ScrollTick::Stop => {
                    pending_scroll = None;
                    self.stop();
                }
            }
        }
        if let Some(y) = pending_scroll {
            if !self.check_stopped() {
                self.render(y);
            }
        }

        if !self.torn_down {
            self.receiver = Some(rx);
        }
        result.map(|()| handled)
    }

    /// Stop the driver and release every listener and the channel.
    pub fn stop(&mut self) {
        self.stop.stop();
        self.teardown();
    }

    /// Handle that can stop this driver from elsewhere.
    #[must_use]
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Whether the driver has stopped.
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.torn_down || self.stop.is_stopped()
    }

    /// Most recent frame, if any.
    #[must_use]
    pub fn last_frame(&self) -> Option<&FrameTransforms> {
        self.last_frame.as_ref()
    }

    /// Frames rendered so far.
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    /// Registered listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    #[must_use]
    pub fn engine(&self) -> &ScrollEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut ScrollEngine {
        &mut self.engine
    }

    fn render(&mut self, scroll_y: f64) {
        let frame = self.engine.update(scroll_y);
        self.last_scroll = frame.scroll_y;
        self.frames += 1;
        for (_, listener) in &mut self.listeners {
            listener(&frame);
        }
        self.last_frame = Some(frame);
    }

    /// Tear down if a stop was requested through a handle.
    fn check_stopped(&mut self) -> bool {
        if self.stop.is_stopped() && !self.torn_down {
            self.teardown();
        }
        self.torn_down
    }

    fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        let released = self.listeners.len();
        self.listeners.clear();
        self.receiver = None;
        self.last_frame = None;
        info!(frames = self.frames, released, "scroll driver stopped");
    }
}

impl Drop for ScrollDriver {
    fn drop(&mut self) {
        if !self.torn_down {
            debug!("scroll driver dropped without stop");
        }
    }
}
