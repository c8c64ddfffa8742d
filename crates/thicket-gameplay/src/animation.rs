//! Walk-cycle frame selection.

use serde::{Deserialize, Serialize};

/// Cycles through numbered walk frames for a sprite prefix, producing
/// keys of the form `{prefix}-walk-{n}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalkAnimation {
    /// Sprite key prefix the frame suffix is appended to.
    pub prefix: String,
    frame_count: u32,
    rate: u32,
    ticks: u32,
    index: u32,
}

impl WalkAnimation {
    /// Creates a walk cycle with `frame_count` frames, advancing every
    /// `rate` ticks.
    #[must_use]
    pub fn new(prefix: impl Into<String>, frame_count: u32, rate: u32) -> Self {
        debug_assert!(frame_count > 0);
        debug_assert!(rate > 0);
        Self {
            prefix: prefix.into(),
            frame_count,
            rate,
            ticks: 0,
            index: 0,
        }
    }

    /// Key for the current frame.
    #[must_use]
    pub fn current(&self) -> String {
        format!("{}-walk-{}", self.prefix, self.index)
    }

    /// Counts one tick, advancing the frame when the rate elapses, and
    /// returns the (possibly new) current key.
    pub fn advance(&mut self) -> String {
        self.ticks += 1;
        if self.ticks >= self.rate {
            self.ticks = 0;
            self.index = (self.index + 1) % self.frame_count;
        }
        self.current()
    }

    /// Rewinds to the first frame.
    pub fn reset(&mut self) {
        self.ticks = 0;
        self.index = 0;
    }
}
