//! Render loop scheduling
//!
//! The host runtime owns the actual frame callbacks; this module owns the
//! loop's lifecycle. The scheduler holds a cancellation flag: `start`
//! begins the chain, `stop` flips the flag, and the next tick observes it
//! and halts. While running, ticks either advance the frame clock (active
//! frame) or re-anchor it (gated frame); the chain itself never stops on
//! its own.

use std::time::Duration;

use crate::foundation::time::FrameClock;

/// What a single scheduled tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The loop has been cancelled; the frame chain terminates
    Halted,

    /// The chain stays alive but no simulation or draw work was performed
    Idle,

    /// A full update and draw were performed
    Rendered,
}

/// Cancellable render-loop state
#[derive(Debug, Clone)]
pub struct RenderLoop {
    clock: FrameClock,
    running: bool,
}

impl Default for RenderLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderLoop {
    /// Create a stopped loop
    pub fn new() -> Self {
        Self {
            clock: FrameClock::new(),
            running: false,
        }
    }

    /// Begin the frame chain
    pub fn start(&mut self) {
        if self.running {
            return;
        }
        log::debug!("Render loop started");
        self.running = true;
    }

    /// Flip the cancellation flag; the next tick observes it and halts
    pub fn stop(&mut self) {
        if !self.running {
            return;
        }
        log::debug!(
            "Render loop stopped after {} active ticks ({:.2}s active time)",
            self.clock.tick_count(),
            self.clock.elapsed()
        );
        self.running = false;
    }

    /// Whether the chain is still alive
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Frame clock backing the loop
    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    /// Record a gated frame: keep the chain alive, perform no work
    pub fn skip(&mut self, now: Duration) {
        self.clock.skip(now);
    }

    /// Record an active frame; returns the wall-clock delta in seconds
    pub fn advance(&mut self, now: Duration) -> f32 {
        self.clock.tick(now)
    }
}
