//! Debounces a raw stream of tap timestamps into N-tap gestures.
//!
//! One sequencer instance is shared by every state of a machine; the tap
//! threshold is supplied per call so each state can ask for its own gesture
//! (2 taps to acknowledge, 3 to cancel) without duplicating counters.


use embassy_time::{Duration, Instant};

#[derive(Clone, Copy, Debug)]
pub struct TapSequencer {
    window: Duration,
    count: u8,
    last_tap: Option<Instant>,
}

impl TapSequencer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            count: 0,
            last_tap: None,
        }
    }

    /// Feeds one tap. Returns true when `threshold` consecutive taps have
    /// landed with every inter-tap gap inside the debounce window; the
    /// sequence then restarts from zero. A tap after a too-long gap starts a
    /// new count of 1 by itself.
    pub fn on_tap(&mut self, now: Instant, threshold: u8) -> bool {
        debug_assert!(threshold > 0, "tap threshold must be at least 1");
        if let Some(last) = self.last_tap {
            if now.saturating_duration_since(last) > self.window {
                self.count = 0;
            }
        }
        self.count = self.count.saturating_add(1);
        self.last_tap = Some(now);
        if self.count >= threshold {
            self.count = 0;
            true
        } else {
            false
        }
    }

    /// Clears any partial sequence. Called on every state transition so a
    /// half-finished gesture never carries over into the next state.
    pub fn reset(&mut self) {
        self.count = 0;
        self.last_tap = None;
    }

    pub fn count(&self) -> u8 {
        self.count
    }
}
