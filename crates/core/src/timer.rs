//! Gravity timer - a fire-once countdown rearmed explicitly after each fall.
//!
//! The timer owns no clock. The frontend reports elapsed time through
//! [`GravityTimer::advance`], and the game rearms it after every gravity step.

/// Fire-once gravity countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GravityTimer {
    interval_ms: u32,
    remaining_ms: Option<u32>,
}

impl GravityTimer {
    /// A stopped timer
    pub fn new() -> Self {
        Self::default()
    }

    /// (Re)arm with a fresh interval, discarding any time left.
    pub fn arm(&mut self, interval_ms: u32) {
        self.interval_ms = interval_ms;
        self.remaining_ms = Some(interval_ms);
    }

    pub fn stop(&mut self) {
        self.remaining_ms = None;
    }

    pub fn is_armed(&self) -> bool {
        self.remaining_ms.is_some()
    }

    /// Interval the timer was last armed with
    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    /// Time left until expiry, `None` while stopped
    pub fn remaining_ms(&self) -> Option<u32> {
        self.remaining_ms
    }

    /// Let time pass. Returns true when the timer expires, which also stops it.
    pub fn advance(&mut self, elapsed_ms: u32) -> bool {
        let Some(remaining) = self.remaining_ms else {
            return false;
        };
        let left = remaining.saturating_sub(elapsed_ms);
        if left == 0 {
            self.remaining_ms = None;
            true
        } else {
            self.remaining_ms = Some(left);
            false
        }
    }
}
