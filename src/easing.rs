//! Easing curves and time-based transitions.

use std::time::Duration;

/// Cubic ease-in-out: slow start, fast middle, slow end.
///
/// Input is clamped to [0, 1].
///
/// ```rust
/// use complexity_view::easing::ease_in_out_cubic;
///
/// assert_eq!(ease_in_out_cubic(0.0), 0.0);
/// assert_eq!(ease_in_out_cubic(0.5), 0.5);
/// assert_eq!(ease_in_out_cubic(1.0), 1.0);
/// ```
#[inline]
pub fn ease_in_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Linear interpolation between `from` and `to`.
#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

/// Progress from 0 to 1 over a fixed duration.
///
/// A transition starts settled (progress 1) and is restarted explicitly.
/// Elapsed time is kept as a [`Duration`] so repeated small ticks do not
/// drift.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transition {
    elapsed: Duration,
    duration: Duration,
}

impl Transition {
    /// Create a settled transition of the given length.
    pub fn new(duration: Duration) -> Self {
        let duration = if duration.is_zero() {
            Duration::from_nanos(1)
        } else {
            duration
        };
        Self {
            elapsed: duration,
            duration,
        }
    }

    /// Restart from progress 0.
    pub fn restart(&mut self) {
        self.elapsed = Duration::ZERO;
    }

    /// Jump straight to the settled state.
    pub fn settle(&mut self) {
        self.elapsed = self.duration;
    }

    /// Advance by `dt`. Returns true if this tick settled the transition.
    pub fn tick(&mut self, dt: Duration) -> bool {
        if self.is_settled() {
            return false;
        }
        self.elapsed = self.elapsed.saturating_add(dt).min(self.duration);
        self.is_settled()
    }

    /// Linear progress in [0, 1].
    pub fn progress(&self) -> f64 {
        (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    /// Eased progress in [0, 1].
    #[inline]
    pub fn eased(&self) -> f64 {
        ease_in_out_cubic(self.progress())
    }

    #[inline]
    pub fn is_settled(&self) -> bool {
        self.elapsed >= self.duration
    }

    #[inline]
    pub fn duration(&self) -> Duration {
        self.duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ease_endpoints_and_clamp() {
        assert_eq!(ease_in_out_cubic(-1.0), 0.0);
        assert_eq!(ease_in_out_cubic(2.0), 1.0);
        assert!((ease_in_out_cubic(0.25) - 0.0625).abs() < 1e-12);
        assert!((ease_in_out_cubic(0.75) - 0.9375).abs() < 1e-12);
    }

    #[test]
    fn test_ease_monotonic() {
        let mut prev = 0.0;
        for i in 1..=100 {
            let v = ease_in_out_cubic(i as f64 / 100.0);
            assert!(v >= prev);
            prev = v;
        }
    }

    #[test]
    fn test_transition_starts_settled() {
        let t = Transition::new(Duration::from_millis(300));
        assert!(t.is_settled());
        assert_eq!(t.progress(), 1.0);
    }

    #[test]
    fn test_transition_progress() {
        let mut t = Transition::new(Duration::from_millis(400));
        t.restart();
        assert_eq!(t.progress(), 0.0);

        assert!(!t.tick(Duration::from_millis(100)));
        assert!((t.progress() - 0.25).abs() < 1e-9);

        assert!(t.tick(Duration::from_millis(500)));
        assert_eq!(t.progress(), 1.0);
        assert_eq!(t.eased(), 1.0);

        // Already settled: further ticks report nothing new
        assert!(!t.tick(Duration::from_millis(16)));
    }

    #[test]
    fn test_zero_duration() {
        let mut t = Transition::new(Duration::ZERO);
        t.restart();
        assert!(t.tick(Duration::from_millis(1)));
    }
}
