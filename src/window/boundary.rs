//! Debounced viewport boundary enforcement.
//!
//! Resize events arrive in bursts while the host window is being resized.
//! Only the last size of a burst is acted on, once the burst has been quiet
//! for the configured delay.

use std::time::{Duration, Instant};

use crate::layout::Size;

#[derive(Debug, Clone)]
pub struct ResizeDebouncer {
    delay: Duration,
    pending: Option<(Size, Instant)>,
}

impl ResizeDebouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Record a resize; restarts the quiet period.
    pub fn note(&mut self, viewport: Size, now: Instant) {
        self.pending = Some((viewport, now + self.delay));
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.map(|(_, due)| due)
    }

    /// The settled viewport, once its quiet period has elapsed.
    pub fn take_due(&mut self, now: Instant) -> Option<Size> {
        match self.pending {
            Some((viewport, due)) if now >= due => {
                self.pending = None;
                Some(viewport)
            }
            _ => None,
        }
    }
}
