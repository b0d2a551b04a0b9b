//! Trailing-edge coalescing of scroll-to-bottom requests
//!
//! Streamed deltas can arrive many times per frame. Each one asks for the
//! view to follow the end of the transcript; the coalescer turns a burst of
//! such requests into a single scroll once the burst has been quiet for the
//! debounce window.

use std::time::{Duration, Instant};

/// Default debounce window
pub const DEFAULT_SCROLL_DEBOUNCE: Duration = Duration::from_millis(100);

#[derive(Debug, Clone)]
pub struct ScrollCoalescer {
    window: Duration,
    deadline: Option<Instant>,
}

impl Default for ScrollCoalescer {
    fn default() -> Self {
        Self::new(DEFAULT_SCROLL_DEBOUNCE)
    }
}

impl ScrollCoalescer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            deadline: None,
        }
    }

    /// Record a request; pushes the deadline to `now + window`.
    pub fn trigger(&mut self, now: Instant) {
        self.deadline = Some(now + self.window);
    }

    /// When the pending scroll is due, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Returns true exactly once per burst, when its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Drop a pending scroll (an immediate scroll already covered it).
    pub fn cancel(&mut self) {
        self.deadline = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_millis(100);

    #[test]
    fn test_idle_coalescer_never_fires() {
        let mut scroll = ScrollCoalescer::new(WINDOW);
        assert!(scroll.deadline().is_none());
        assert!(!scroll.poll(Instant::now()));
    }

    #[test]
    fn test_single_trigger_fires_after_window() {
        let start = Instant::now();
        let mut scroll = ScrollCoalescer::new(WINDOW);
        scroll.trigger(start);

        assert!(!scroll.poll(start + Duration::from_millis(50)));
        assert!(scroll.poll(start + WINDOW));
        assert!(!scroll.poll(start + WINDOW * 2));
    }

    #[test]
    fn test_burst_produces_one_trailing_scroll() {
        let start = Instant::now();
        let mut scroll = ScrollCoalescer::new(WINDOW);
        let mut fired = 0;

        // Ten triggers 20ms apart, polling in between
        for i in 0..10 {
            let now = start + Duration::from_millis(20 * i);
            scroll.trigger(now);
            if scroll.poll(now) {
                fired += 1;
            }
        }
        let last = start + Duration::from_millis(180);
        assert_eq!(scroll.deadline(), Some(last + WINDOW));
        assert!(!scroll.poll(last + Duration::from_millis(99)));

        if scroll.poll(last + WINDOW) {
            fired += 1;
        }
        assert_eq!(fired, 1);
    }

    #[test]
    fn test_cancel_drops_pending_scroll() {
        let start = Instant::now();
        let mut scroll = ScrollCoalescer::new(WINDOW);
        scroll.trigger(start);
        scroll.cancel();
        assert!(!scroll.poll(start + WINDOW));
    }
}
