//! Converts host frame timestamps into elapsed-time ticks.

use std::time::Duration;

/// Tracks the previous frame timestamp and yields the delta to the next.
///
/// Hosts feed it monotonic millisecond timestamps (e.g. the value passed to
/// a `requestAnimationFrame` callback); tests can skip it entirely and call
/// `tick(Duration)` on a controller directly.
///
/// ```rust
/// use complexity_view::FrameClock;
/// use std::time::Duration;
///
/// let mut clock = FrameClock::new();
/// assert_eq!(clock.advance(1000.0), Duration::ZERO);
/// assert_eq!(clock.advance(1016.0), Duration::from_millis(16));
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    /// Longest delta a single frame may report.
    ///
    /// A backgrounded tab can deliver a multi-second gap; playback should not
    /// jump ahead by that much.
    pub const MAX_DELTA: Duration = Duration::from_millis(250);

    pub fn new() -> Self {
        Self::default()
    }

    /// Record a timestamp and return the time since the previous one.
    ///
    /// The first call, non-finite timestamps and clocks running backwards all
    /// yield [`Duration::ZERO`].
    pub fn advance(&mut self, now_ms: f64) -> Duration {
        if !now_ms.is_finite() {
            return Duration::ZERO;
        }
        let delta = match self.last_ms {
            Some(last) if now_ms > last => {
                Duration::from_micros(((now_ms - last) * 1000.0).round() as u64).min(Self::MAX_DELTA)
            }
            _ => Duration::ZERO,
        };
        self.last_ms = Some(now_ms);
        delta
    }

    /// Forget the previous timestamp so the next frame reports zero.
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}
