use std::time::Duration;

/// Shortest gap between two drawn frames (144 Hz)
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_micros(1_000_000 / 144);

/// Drops frames that come too fast or would repaint identical content
///
/// `now` is any monotonic timestamp, typically `Instant::elapsed` of a
/// fixed start. A frame dropped for timing does not remember its
/// fingerprint, so the same content is drawn on the next call past the
/// interval.
#[derive(Debug, Clone)]
pub struct FrameLimiter {
    min_interval: Duration,
    last_render: Duration,
    last_fingerprint: u64,
    has_rendered: bool,
}

impl FrameLimiter {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_render: Duration::ZERO,
            last_fingerprint: 0,
            has_rendered: false,
        }
    }

    /// Decide whether to draw a frame with the given content fingerprint
    pub fn should_render(&mut self, now: Duration, fingerprint: u64) -> bool {
        if !self.has_rendered {
            self.has_rendered = true;
            self.last_render = now;
            self.last_fingerprint = fingerprint;
            return true;
        }

        if now.saturating_sub(self.last_render) < self.min_interval {
            return false;
        }
        self.last_render = now;

        if fingerprint == self.last_fingerprint {
            return false;
        }
        self.last_fingerprint = fingerprint;
        true
    }

    /// Forget the last frame so the next call always draws
    pub fn invalidate(&mut self) {
        self.has_rendered = false;
    }
}

impl Default for FrameLimiter {
    fn default() -> Self {
        Self::new(DEFAULT_FRAME_INTERVAL)
    }
}
