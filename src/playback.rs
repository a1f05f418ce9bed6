//! Playback controller for stepping through a generated trace.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::{clamp_speed, TimeConfig};
use crate::easing::{lerp, Transition};
use crate::step::{Step, StepSequence};
use crate::{generate, Complexity, MAX_INPUT};

/// Shortest delay between automatic advances.
pub const MIN_STEP_DELAY_MS: f64 = 30.0;

/// Speed above which several steps may be consumed in one frame.
const BURST_SPEED: f64 = 95.0;

/// Steps consumed per frame above [`BURST_SPEED`].
const BURST_STEPS: usize = 3;

/// Current playback state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackState {
    /// Freshly reset, nothing advanced yet
    Idle,
    /// Advancing on a timer
    Playing,
    /// Frozen mid-trace, resumable
    Paused,
    /// Every step has been consumed
    Completed,
}

/// Something the presentation layer should react to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlaybackEvent {
    /// The trace was regenerated; counters and transcript are cleared
    Reset { total: usize },
    /// Step `index` was consumed
    Advanced { index: usize },
    /// The last step was consumed
    Completed,
}

/// Map a speed slider position (0-100) to the delay between advances.
///
/// `delay = max(30ms, 1000ms - speed * 9.7)`
///
/// ```rust
/// use complexity_view::playback::step_delay;
/// use std::time::Duration;
///
/// assert_eq!(step_delay(0.0), Duration::from_millis(1000));
/// assert_eq!(step_delay(50.0), Duration::from_millis(515));
/// assert_eq!(step_delay(100.0), Duration::from_millis(30));
/// ```
pub fn step_delay(speed: f64) -> Duration {
    let ms = (1000.0 - clamp_speed(speed) * 9.7).max(MIN_STEP_DELAY_MS);
    Duration::from_micros((ms * 1000.0).round() as u64)
}

/// Platform-agnostic controller owning one `(complexity, n)` trace.
///
/// The controller never reads a clock. The host calls
/// [`tick`](Self::tick) once per frame with the elapsed time, and reacts to
/// the events drained with [`drain_events`](Self::drain_events).
///
/// ## Example
///
/// ```rust
/// use complexity_view::{Complexity, PlaybackController, PlaybackState};
/// use std::time::Duration;
///
/// let mut ctrl = PlaybackController::new(Complexity::Linear, 3).with_seed(1);
/// ctrl.set_speed(100.0);
/// ctrl.play();
///
/// while ctrl.state() == PlaybackState::Playing {
///     ctrl.tick(Duration::from_millis(16));
/// }
/// assert_eq!(ctrl.state(), PlaybackState::Completed);
/// assert_eq!(ctrl.transcript().len(), 3);
/// ```
#[derive(Clone, Debug)]
pub struct PlaybackController {
    complexity: Complexity,
    /// Input size the current trace was generated for
    n: u32,
    /// Input size requested by the slider
    target_n: u32,
    /// Displayed input size when the current transition began
    from_n: f64,
    min_input: u32,
    max_input: u32,
    sequence: StepSequence,
    /// Number of steps consumed so far
    index: usize,
    state: PlaybackState,
    speed: f64,
    /// Time accumulated since the last automatic advance
    idle: Duration,
    input_transition: Transition,
    step_transition: Transition,
    resume_after_transition: bool,
    transcript: Vec<String>,
    events: Vec<PlaybackEvent>,
    rng: StdRng,
}

impl PlaybackController {
    /// Create a controller with default timing, seeded from entropy.
    ///
    /// `n` is clamped to `1..=`[`MAX_INPUT`](crate::MAX_INPUT).
    pub fn new(complexity: Complexity, n: u32) -> Self {
        let config = TimeConfig {
            default_input: n,
            max_input: MAX_INPUT,
            ..TimeConfig::default()
        };
        Self::with_config(complexity, &config)
    }

    /// Create a controller using slider bounds and durations from `config`.
    ///
    /// The input range is capped at [`MAX_INPUT`](crate::MAX_INPUT).
    pub fn with_config(complexity: Complexity, config: &TimeConfig) -> Self {
        let min_input = config.min_input.clamp(1, MAX_INPUT);
        let max_input = config.max_input.clamp(min_input, MAX_INPUT);
        let n = config.default_input.clamp(min_input, max_input);
        let mut ctrl = Self {
            complexity,
            n,
            target_n: n,
            from_n: n as f64,
            min_input,
            max_input,
            sequence: StepSequence::empty(complexity),
            index: 0,
            state: PlaybackState::Idle,
            speed: clamp_speed(config.default_speed),
            idle: Duration::ZERO,
            input_transition: Transition::new(config.input_transition()),
            step_transition: Transition::new(config.step_transition()),
            resume_after_transition: false,
            transcript: Vec::new(),
            events: Vec::new(),
            rng: StdRng::from_entropy(),
        };
        ctrl.reset();
        ctrl
    }

    /// Reseed the random source and regenerate.
    ///
    /// Makes the O(1) index and the O(log n) target reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self.reset();
        self
    }

    #[inline]
    pub fn complexity(&self) -> Complexity {
        self.complexity
    }

    /// Input size of the current trace.
    #[inline]
    pub fn n(&self) -> u32 {
        self.n
    }

    /// Input size the slider last requested.
    #[inline]
    pub fn target_n(&self) -> u32 {
        self.target_n
    }

    /// Input size to draw this frame, eased during a transition.
    pub fn display_n(&self) -> f64 {
        if self.input_transition.is_settled() {
            self.n as f64
        } else {
            lerp(self.from_n, self.target_n as f64, self.input_transition.eased())
        }
    }

    #[inline]
    pub fn sequence(&self) -> &StepSequence {
        &self.sequence
    }

    /// Number of steps consumed so far.
    #[inline]
    pub fn current_index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn total_steps(&self) -> usize {
        self.sequence.len()
    }

    /// Share of the trace consumed, in [0, 1].
    pub fn position(&self) -> f64 {
        if self.sequence.is_empty() {
            0.0
        } else {
            self.index as f64 / self.sequence.len() as f64
        }
    }

    #[inline]
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    #[inline]
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Set the speed slider position; clamped to [0, 100].
    pub fn set_speed(&mut self, speed: f64) {
        self.speed = clamp_speed(speed);
    }

    /// Delay between automatic advances at the current speed.
    #[inline]
    pub fn delay(&self) -> Duration {
        step_delay(self.speed)
    }

    /// Eased highlight progress of the most recent step, in [0, 1].
    #[inline]
    pub fn step_progress(&self) -> f64 {
        self.step_transition.eased()
    }

    /// Whether the most recent step is still animating in.
    #[inline]
    pub fn is_animating(&self) -> bool {
        !self.step_transition.is_settled()
    }

    /// Whether an input-size change is still easing.
    #[inline]
    pub fn is_transitioning(&self) -> bool {
        !self.input_transition.is_settled()
    }

    /// The most recently consumed step.
    pub fn current_step(&self) -> Option<&Step> {
        self.index.checked_sub(1).and_then(|i| self.sequence.get(i))
    }

    /// Source line of the most recently consumed step.
    pub fn highlighted_line(&self) -> Option<usize> {
        self.current_step().map(|s| s.line)
    }

    /// Log lines of every step consumed since the last reset.
    #[inline]
    pub fn transcript(&self) -> &[String] {
        &self.transcript
    }

    /// Take the events produced since the last call.
    ///
    /// Events older than the latest reset are discarded with it.
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.events)
    }

    /// Switch complexity class and regenerate.
    pub fn set_complexity(&mut self, complexity: Complexity) {
        if self.complexity != complexity {
            tracing::debug!(from = self.complexity.label(), to = complexity.label(), "complexity changed");
        }
        self.complexity = complexity;
        self.reset();
    }

    /// Request a new input size.
    ///
    /// Playback pauses while the displayed size eases towards the target;
    /// the trace is regenerated once the transition settles, and playback
    /// resumes if it was running before the change.
    pub fn set_input(&mut self, n: u32) {
        let n = n.clamp(self.min_input, self.max_input);
        if n == self.target_n {
            return;
        }
        if self.is_playing() && !self.resume_after_transition {
            self.resume_after_transition = true;
        }
        self.pause();
        self.from_n = self.display_n();
        self.target_n = n;
        self.input_transition.restart();
        tracing::debug!(from = self.n, to = n, "input transition started");
    }

    /// Start or resume playback; restarts from the beginning when completed.
    pub fn play(&mut self) {
        if self.index >= self.sequence.len() {
            self.reset();
        }
        self.idle = Duration::ZERO;
        self.set_state(PlaybackState::Playing);
    }

    /// Pause playback. Has no effect unless playing.
    pub fn pause(&mut self) {
        if self.state == PlaybackState::Playing {
            self.set_state(PlaybackState::Paused);
        }
    }

    /// Toggle play/pause.
    pub fn toggle(&mut self) {
        if self.is_playing() {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Pause and consume exactly one step, restarting first when completed.
    pub fn step(&mut self) {
        self.pause();
        if self.state == PlaybackState::Completed {
            self.reset();
        }
        if self.state == PlaybackState::Idle && !self.sequence.is_empty() {
            self.set_state(PlaybackState::Paused);
        }
        self.advance();
    }

    /// Regenerate the trace for the current `(complexity, n)` and rewind.
    pub fn reset(&mut self) {
        self.sequence = generate(self.complexity, self.n, &mut self.rng);
        self.index = 0;
        self.idle = Duration::ZERO;
        self.step_transition.settle();
        self.transcript.clear();
        self.set_state(PlaybackState::Idle);
        self.events.clear();
        self.events.push(PlaybackEvent::Reset {
            total: self.sequence.len(),
        });
    }

    /// Advance time by `dt`.
    ///
    /// Eases the input size, then the step highlight, then consumes steps
    /// when playing, the highlight has settled and the accumulated time
    /// reached [`delay`](Self::delay). Above speed 95 up to three steps are
    /// consumed per frame.
    ///
    /// Every consumed step queues an event; hosts that never call
    /// [`drain_events`](Self::drain_events) hold at most one trace's worth.
    pub fn tick(&mut self, dt: Duration) {
        if self.input_transition.tick(dt) {
            self.n = self.target_n;
            self.from_n = self.n as f64;
            self.reset();
            if self.resume_after_transition {
                self.resume_after_transition = false;
                self.play();
            }
        }

        self.step_transition.tick(dt);

        if !self.is_playing() {
            return;
        }

        self.idle = self.idle.saturating_add(dt);
        if self.idle < self.delay() || self.is_animating() {
            return;
        }

        let burst = if self.speed > BURST_SPEED { BURST_STEPS } else { 1 };
        for _ in 0..burst {
            if self.index >= self.sequence.len() || !self.is_playing() {
                break;
            }
            self.advance();
        }
        self.idle = Duration::ZERO;
    }

    /// Consume the next step; completes when none remain.
    fn advance(&mut self) {
        let Some(step) = self.sequence.get(self.index) else {
            self.complete();
            return;
        };
        tracing::trace!(index = self.index, line = step.line, "{}", step.log);
        self.transcript.push(step.log.clone());
        self.events.push(PlaybackEvent::Advanced { index: self.index });
        self.index += 1;
        self.step_transition.restart();

        if self.index >= self.sequence.len() {
            self.complete();
        }
    }

    fn complete(&mut self) {
        self.set_state(PlaybackState::Completed);
        self.events.push(PlaybackEvent::Completed);
    }

    fn set_state(&mut self, state: PlaybackState) {
        if self.state != state {
            tracing::debug!(from = ?self.state, to = ?state, index = self.index, "playback state");
            self.state = state;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StepKind;

    const FRAME: Duration = Duration::from_millis(16);

    fn controller(complexity: Complexity, n: u32) -> PlaybackController {
        PlaybackController::new(complexity, n).with_seed(9)
    }

    fn run_to_completion(ctrl: &mut PlaybackController) {
        for _ in 0..1_000_000 {
            if ctrl.state() != PlaybackState::Playing {
                return;
            }
            ctrl.tick(FRAME);
        }
        panic!("playback never completed");
    }

    #[test]
    fn test_initial_state() {
        let ctrl = controller(Complexity::Linear, 5);
        assert_eq!(ctrl.state(), PlaybackState::Idle);
        assert_eq!(ctrl.current_index(), 0);
        assert_eq!(ctrl.total_steps(), 5);
        assert!(!ctrl.is_animating());
        assert_eq!(ctrl.step_progress(), 1.0);
        assert_eq!(ctrl.highlighted_line(), None);
    }

    #[test]
    fn test_basic_playback() {
        let mut ctrl = controller(Complexity::Linear, 5);
        ctrl.set_speed(50.0);
        ctrl.play();
        assert_eq!(ctrl.state(), PlaybackState::Playing);

        // 515ms delay at speed 50: nothing before it elapses
        ctrl.tick(Duration::from_millis(500));
        assert_eq!(ctrl.current_index(), 0);
        ctrl.tick(Duration::from_millis(15));
        assert_eq!(ctrl.current_index(), 1);
        assert!(ctrl.is_animating());
        assert_eq!(ctrl.highlighted_line(), Some(3));

        ctrl.pause();
        assert_eq!(ctrl.state(), PlaybackState::Paused);
        ctrl.tick(Duration::from_secs(5));
        assert_eq!(ctrl.current_index(), 1);
    }

    #[test]
    fn test_pause_idempotent() {
        let mut ctrl = controller(Complexity::Quadratic, 4);
        ctrl.play();
        ctrl.tick(Duration::from_millis(600));
        ctrl.pause();
        let once = (ctrl.state(), ctrl.current_index(), ctrl.transcript().to_vec());
        ctrl.pause();
        let twice = (ctrl.state(), ctrl.current_index(), ctrl.transcript().to_vec());
        assert_eq!(once, twice);

        let mut idle = controller(Complexity::Linear, 3);
        idle.pause();
        idle.pause();
        assert_eq!(idle.state(), PlaybackState::Idle);
    }

    #[test]
    fn test_step_forces_pause() {
        let mut ctrl = controller(Complexity::Linear, 4);
        ctrl.play();
        ctrl.step();
        assert_eq!(ctrl.state(), PlaybackState::Paused);
        assert_eq!(ctrl.current_index(), 1);
        ctrl.step();
        assert_eq!(ctrl.current_index(), 2);
        assert_eq!(ctrl.transcript(), &["→ step 1: print(0)", "→ step 2: print(1)"]);
    }

    #[test]
    fn test_step_to_completion_and_restart() {
        let mut ctrl = controller(Complexity::Linear, 2);
        ctrl.step();
        ctrl.step();
        assert_eq!(ctrl.state(), PlaybackState::Completed);
        let events = ctrl.drain_events();
        assert_eq!(events.last(), Some(&PlaybackEvent::Completed));

        // Stepping from completed restarts the run
        ctrl.step();
        assert_eq!(ctrl.current_index(), 1);
        assert_eq!(ctrl.transcript().len(), 1);
        assert_eq!(
            ctrl.drain_events(),
            vec![PlaybackEvent::Reset { total: 2 }, PlaybackEvent::Advanced { index: 0 }]
        );
    }

    #[test]
    fn test_play_to_completion() {
        let mut ctrl = controller(Complexity::Linear, 5);
        ctrl.set_speed(80.0);
        ctrl.play();
        run_to_completion(&mut ctrl);
        assert_eq!(ctrl.state(), PlaybackState::Completed);
        assert_eq!(ctrl.current_index(), 5);
        assert_eq!(ctrl.transcript().len(), 5);

        // Playing again restarts
        ctrl.play();
        assert_eq!(ctrl.current_index(), 0);
        assert_eq!(ctrl.state(), PlaybackState::Playing);
    }

    #[test]
    fn test_reset_round_trip() {
        for complexity in Complexity::ALL {
            let mut stepped = controller(complexity, 6);
            let mut played = controller(complexity, 6);

            stepped.reset();
            played.reset();
            assert_eq!(stepped.sequence(), played.sequence());

            for _ in 0..stepped.total_steps() {
                stepped.step();
            }
            played.set_speed(100.0);
            played.play();
            run_to_completion(&mut played);

            assert_eq!(stepped.state(), PlaybackState::Completed);
            assert_eq!(played.state(), PlaybackState::Completed);
            assert_eq!(stepped.current_index(), played.current_index());
            assert_eq!(stepped.transcript(), played.transcript());
        }
    }

    #[test]
    fn test_step_animation_gates_advance() {
        let mut ctrl = controller(Complexity::Linear, 10);
        ctrl.set_speed(90.0); // 127ms delay, shorter than the 300ms highlight
        ctrl.play();
        ctrl.tick(Duration::from_millis(130));
        assert_eq!(ctrl.current_index(), 1);

        // Delay elapsed again, but the highlight has not settled
        ctrl.tick(Duration::from_millis(130));
        assert_eq!(ctrl.current_index(), 1);
        ctrl.tick(Duration::from_millis(130));
        assert_eq!(ctrl.current_index(), 1);
        ctrl.tick(Duration::from_millis(50));
        assert_eq!(ctrl.current_index(), 2);
    }

    #[test]
    fn test_burst_at_high_speed() {
        let mut ctrl = controller(Complexity::Linear, 10);
        ctrl.set_speed(100.0);
        ctrl.play();
        ctrl.tick(Duration::from_millis(30));
        assert_eq!(ctrl.current_index(), 3);

        let mut slow = controller(Complexity::Linear, 10);
        slow.set_speed(95.0);
        slow.play();
        slow.tick(Duration::from_secs(1));
        assert_eq!(slow.current_index(), 1);
    }

    #[test]
    fn test_burst_stops_at_end() {
        let mut ctrl = controller(Complexity::Linear, 2);
        ctrl.set_speed(100.0);
        ctrl.play();
        ctrl.tick(Duration::from_millis(30));
        assert_eq!(ctrl.current_index(), 2);
        assert_eq!(ctrl.state(), PlaybackState::Completed);
    }

    #[test]
    fn test_input_transition() {
        let mut ctrl = controller(Complexity::Linear, 10);
        ctrl.play();
        ctrl.set_input(20);
        assert_eq!(ctrl.state(), PlaybackState::Paused);
        assert!(ctrl.is_transitioning());
        assert_eq!(ctrl.n(), 10);

        ctrl.tick(Duration::from_millis(200));
        let mid = ctrl.display_n();
        assert!(mid > 10.0 && mid < 20.0, "display_n = {}", mid);
        // Trace is not regenerated mid-transition
        assert_eq!(ctrl.total_steps(), 10);

        ctrl.tick(Duration::from_millis(200));
        assert!(!ctrl.is_transitioning());
        assert_eq!(ctrl.display_n(), 20.0);
        assert_eq!(ctrl.n(), 20);
        assert_eq!(ctrl.total_steps(), 20);
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(ctrl.sequence(), &generate(Complexity::Linear, 20, &mut rng));
        // Was playing before the change, so it resumes
        assert_eq!(ctrl.state(), PlaybackState::Playing);
    }

    #[test]
    fn test_input_transition_while_paused_stays_paused() {
        let mut ctrl = controller(Complexity::Quadratic, 4);
        ctrl.set_input(6);
        ctrl.tick(Duration::from_millis(400));
        assert_eq!(ctrl.n(), 6);
        assert_eq!(ctrl.total_steps(), 36);
        assert_eq!(ctrl.state(), PlaybackState::Idle);
    }

    #[test]
    fn test_input_clamped_and_same_value_ignored() {
        let mut ctrl = controller(Complexity::Linear, 10);
        ctrl.set_input(10);
        assert!(!ctrl.is_transitioning());

        ctrl.set_input(0);
        assert_eq!(ctrl.target_n(), 1);
        ctrl.tick(Duration::from_millis(400));
        assert_eq!(ctrl.total_steps(), 1);
    }

    #[test]
    fn test_set_complexity_resets() {
        let mut ctrl = controller(Complexity::Linear, 5);
        ctrl.step();
        ctrl.set_complexity(Complexity::Exponential);
        assert_eq!(ctrl.current_index(), 0);
        assert!(ctrl.transcript().is_empty());
        assert_eq!(ctrl.sequence().call_count(), 15);
        assert!(matches!(
            ctrl.sequence().get(0).map(|s| &s.kind),
            Some(StepKind::Call { k: 5, .. })
        ));
    }

    #[test]
    fn test_oversized_input_is_clamped() {
        let ctrl = controller(Complexity::Quadratic, 2000);
        assert_eq!(ctrl.n(), MAX_INPUT);
        assert_eq!(ctrl.total_steps(), (MAX_INPUT * MAX_INPUT) as usize);

        let config = TimeConfig {
            max_input: 3000,
            default_input: 3000,
            ..TimeConfig::default()
        };
        let mut ctrl = PlaybackController::with_config(Complexity::Quadratic, &config).with_seed(9);
        assert_eq!(ctrl.n(), MAX_INPUT);
        assert!(ctrl.total_steps() <= 2500);

        ctrl.set_input(u32::MAX);
        assert_eq!(ctrl.target_n(), MAX_INPUT);
        assert!(!ctrl.is_transitioning());
    }

    #[test]
    fn test_undrained_events_cleared_on_reset() {
        let mut ctrl = controller(Complexity::Linear, 5);
        ctrl.set_speed(100.0);
        for _ in 0..20 {
            ctrl.play();
            run_to_completion(&mut ctrl);
        }
        // Only the last run survives: reset, five advances, completion
        assert_eq!(ctrl.drain_events().len(), 7);

        ctrl.step();
        ctrl.reset();
        assert_eq!(ctrl.drain_events(), vec![PlaybackEvent::Reset { total: 5 }]);
    }

    #[test]
    fn test_toggle() {
        let mut ctrl = controller(Complexity::Constant, 5);
        ctrl.toggle();
        assert!(ctrl.is_playing());
        ctrl.toggle();
        assert_eq!(ctrl.state(), PlaybackState::Paused);
    }

    #[test]
    fn test_position() {
        let mut ctrl = controller(Complexity::Linear, 4);
        assert_eq!(ctrl.position(), 0.0);
        ctrl.step();
        assert_eq!(ctrl.position(), 0.25);
    }
}
