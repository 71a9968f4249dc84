//! Visibility gating
//!
//! The host reports how much of the region currently intersects the visible
//! viewport. The gate keeps only the newest ratio and exposes a single
//! boolean the render loop reads synchronously each tick; no queuing, no
//! history. A closed gate takes effect on the very next tick, and reopening
//! resumes without replaying anything that was missed.

use std::sync::mpsc;

/// Source of intersection-ratio notifications
pub trait VisibilitySource {
    /// Latest intersection ratio observed since the last poll, if any
    ///
    /// Ratios are the visible fraction of the host region's area, in
    /// `[0, 1]`. Bursts collapse to the newest value.
    fn poll_latest(&mut self) -> Option<f32>;

    /// Stop observing; subsequent polls return nothing
    fn detach(&mut self);
}

/// Channel-backed visibility source fed by host intersection callbacks
pub struct ChannelVisibilitySource {
    receiver: Option<mpsc::Receiver<f32>>,
}

impl VisibilitySource for ChannelVisibilitySource {
    fn poll_latest(&mut self) -> Option<f32> {
        self.receiver.as_ref().and_then(|rx| rx.try_iter().last())
    }

    fn detach(&mut self) {
        self.receiver = None;
    }
}

/// Create a connected sender/source pair for visibility notifications
pub fn visibility_channel() -> (mpsc::Sender<f32>, ChannelVisibilitySource) {
    let (sender, receiver) = mpsc::channel();
    (
        sender,
        ChannelVisibilitySource {
            receiver: Some(receiver),
        },
    )
}

/// Latest-value visibility state with an activation threshold
///
/// Starts open: until the host reports otherwise, the region is assumed
/// visible so the first frames are not dropped while observation spins up.
pub struct VisibilityGate {
    source: Box<dyn VisibilitySource>,
    threshold: f32,
    visible: bool,
}

impl VisibilityGate {
    /// Create a gate over the host's visibility source
    pub fn new(source: Box<dyn VisibilitySource>, threshold: f32) -> Self {
        Self {
            source,
            threshold,
            visible: true,
        }
    }

    /// Drain pending ratios and refresh the gate state
    ///
    /// Returns true when the boolean state flipped.
    pub fn poll(&mut self) -> bool {
        let Some(ratio) = self.source.poll_latest() else {
            return false;
        };
        let visible = ratio >= self.threshold;
        if visible != self.visible {
            log::debug!(
                "Visibility changed: {} (ratio {:.2}, threshold {:.2})",
                if visible { "in view" } else { "out of view" },
                ratio,
                self.threshold
            );
            self.visible = visible;
            return true;
        }
        false
    }

    /// Whether the next tick should perform render work
    pub fn should_render(&self) -> bool {
        self.visible
    }

    /// Detach the underlying visibility observer
    pub fn detach(&mut self) {
        self.source.detach();
    }
}
