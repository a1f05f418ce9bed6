//! Host-facing facades for the time and space visualizers.
//!
//! A host forwards UI events as controls, calls `frame` from its animation
//! loop, and reads scenes and text outputs back.

use crate::code::{self, Language};
use crate::config::{SpaceConfig, Theme, TimeConfig, VisualizerConfig};
use crate::curve::{space_curve, time_curve};
use crate::explain::{self, AlgorithmProfile, Explanation};
use crate::render::Scene;
use crate::scene::time_scene;
use crate::space::{self, SpaceAnimator, SpaceClass, SpaceExplanation, SpaceMode, SpaceProfile};
use crate::{Complexity, FrameClock, PlaybackController, PlaybackEvent, PlaybackState};

/// Canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    fn sanitized(self) -> Self {
        let clean = |v: f64| if v.is_finite() { v.max(0.0) } else { 0.0 };
        Self::new(clean(self.width), clean(self.height))
    }
}

impl Default for Size {
    fn default() -> Self {
        Self::new(800.0, 400.0)
    }
}

/// UI event for the time visualizer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TimeControl {
    SelectComplexity(Complexity),
    /// Changes the code panel only
    SelectLanguage(Language),
    /// Raw input slider value
    SetInput(f64),
    /// Raw speed slider value
    SetSpeed(f64),
    Play,
    Pause,
    Step,
    Reset,
    /// Main canvas resized
    Resize(Size),
    /// Graph canvas resized
    ResizeGraph(Size),
}

/// Time-complexity visualizer: playback, canvases and text panels.
///
/// ```rust
/// use complexity_view::visualizer::{TimeControl, TimeVisualizer};
/// use complexity_view::{Complexity, VisualizerConfig};
///
/// let mut vis = TimeVisualizer::new(&VisualizerConfig::default()).with_seed(4);
/// vis.apply(TimeControl::SelectComplexity(Complexity::Linear));
/// vis.apply(TimeControl::SetInput(3.0));
/// // Let the input-size transition settle
/// for t in [0.0, 250.0, 500.0] {
///     vis.frame(t);
/// }
///
/// for _ in 0..3 {
///     vis.apply(TimeControl::Step);
/// }
/// assert_eq!(vis.counters(), (3, 3));
/// assert!(vis.explanation().is_some());
/// ```
#[derive(Clone, Debug)]
pub struct TimeVisualizer {
    config: TimeConfig,
    theme: Theme,
    controller: PlaybackController,
    language: Language,
    clock: FrameClock,
    explanation: Option<Explanation>,
    canvas: Size,
    graph: Size,
}

impl TimeVisualizer {
    pub fn new(config: &VisualizerConfig) -> Self {
        let config = config.clone().normalized();
        Self {
            controller: PlaybackController::with_config(Complexity::default(), &config.time),
            config: config.time,
            theme: config.theme,
            language: Language::default(),
            clock: FrameClock::new(),
            explanation: None,
            canvas: Size::default(),
            graph: Size::default(),
        }
    }

    /// Reseed the random source; see [`PlaybackController::with_seed`].
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.controller = self.controller.with_seed(seed);
        self.sync();
        self
    }

    pub fn apply(&mut self, control: TimeControl) {
        match control {
            TimeControl::SelectComplexity(complexity) => self.controller.set_complexity(complexity),
            TimeControl::SelectLanguage(language) => self.language = language,
            TimeControl::SetInput(raw) => self.controller.set_input(self.config.clamp_input(raw)),
            TimeControl::SetSpeed(raw) => self.controller.set_speed(raw),
            TimeControl::Play => self.controller.play(),
            TimeControl::Pause => self.controller.pause(),
            TimeControl::Step => self.controller.step(),
            TimeControl::Reset => self.controller.reset(),
            TimeControl::Resize(size) => self.canvas = size.sanitized(),
            TimeControl::ResizeGraph(size) => self.graph = size.sanitized(),
        }
        self.sync();
    }

    /// Advance to the host timestamp `now_ms`.
    pub fn frame(&mut self, now_ms: f64) {
        let dt = self.clock.advance(now_ms);
        self.controller.tick(dt);
        self.sync();
    }

    fn sync(&mut self) {
        for event in self.controller.drain_events() {
            match event {
                PlaybackEvent::Reset { .. } => self.explanation = None,
                PlaybackEvent::Completed => {
                    self.explanation = Some(Explanation::for_sequence(
                        self.controller.sequence(),
                        self.config.transcript_limit,
                    ));
                }
                PlaybackEvent::Advanced { .. } => {}
            }
        }
    }

    #[inline]
    pub fn controller(&self) -> &PlaybackController {
        &self.controller
    }

    #[inline]
    pub fn state(&self) -> PlaybackState {
        self.controller.state()
    }

    #[inline]
    pub fn language(&self) -> Language {
        self.language
    }

    /// Steps consumed and total steps.
    pub fn counters(&self) -> (usize, usize) {
        (self.controller.current_index(), self.controller.total_steps())
    }

    pub fn transcript(&self) -> &[String] {
        self.controller.transcript()
    }

    /// Line of the code listing to highlight in the selected language.
    pub fn highlighted_line(&self) -> Option<usize> {
        let line = self.controller.highlighted_line()?;
        code::highlight(self.language, self.controller.complexity(), line)
    }

    pub fn listing(&self) -> &'static [&'static str] {
        code::listing(self.language, self.controller.complexity())
    }

    pub fn profile(&self) -> AlgorithmProfile {
        explain::profile(self.controller.complexity())
    }

    pub fn teaching_text(&self) -> &'static str {
        explain::teaching_text(self.controller.complexity())
    }

    /// Completion summary, present from completion until the next reset.
    pub fn explanation(&self) -> Option<&Explanation> {
        self.explanation.as_ref()
    }

    pub fn scene(&self) -> Scene {
        time_scene(&self.controller, self.canvas.width, self.canvas.height, &self.theme)
    }

    pub fn curve(&self) -> Scene {
        time_curve(
            &self.controller,
            self.config.max_input,
            self.graph.width,
            self.graph.height,
            &self.theme,
        )
    }
}

/// UI event for the space visualizer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SpaceControl {
    SelectComplexity(SpaceClass),
    SelectMode(SpaceMode),
    /// Raw input slider value
    SetInput(f64),
    /// Raw depth slider value
    SetDepth(f64),
    Play,
    Pause,
    Step,
    Resize(Size),
    ResizeGraph(Size),
}

/// Space-complexity visualizer.
#[derive(Clone, Debug)]
pub struct SpaceVisualizer {
    config: SpaceConfig,
    class: SpaceClass,
    mode: SpaceMode,
    n: u32,
    depth: u32,
    animator: SpaceAnimator,
    clock: FrameClock,
    canvas: Size,
    graph: Size,
}

impl SpaceVisualizer {
    pub fn new(config: &VisualizerConfig) -> Self {
        let config = config.clone().normalized().space;
        Self {
            class: SpaceClass::default(),
            mode: SpaceMode::default(),
            n: config.default_input,
            depth: config.default_depth,
            animator: SpaceAnimator::new(&config),
            clock: FrameClock::new(),
            canvas: Size::default(),
            graph: Size::default(),
            config,
        }
    }

    pub fn apply(&mut self, control: SpaceControl) {
        match control {
            SpaceControl::SelectComplexity(class) => {
                tracing::debug!(from = self.class.label(), to = class.label(), "space class changed");
                self.class = class;
            }
            SpaceControl::SelectMode(mode) => self.mode = mode,
            SpaceControl::SetInput(raw) => {
                self.n = self.config.clamp_input(raw);
                self.animator.restart_cycle();
            }
            SpaceControl::SetDepth(raw) => self.depth = self.config.clamp_depth(raw),
            SpaceControl::Play => self.animator.play(),
            SpaceControl::Pause => self.animator.pause(),
            SpaceControl::Step => self.animator.step(),
            SpaceControl::Resize(size) => self.canvas = size.sanitized(),
            SpaceControl::ResizeGraph(size) => self.graph = size.sanitized(),
        }
    }

    pub fn frame(&mut self, now_ms: f64) {
        let dt = self.clock.advance(now_ms);
        self.animator.tick(dt);
    }

    #[inline]
    pub fn class(&self) -> SpaceClass {
        self.class
    }

    #[inline]
    pub fn mode(&self) -> SpaceMode {
        self.mode
    }

    #[inline]
    pub fn n(&self) -> u32 {
        self.n
    }

    #[inline]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.animator.is_playing()
    }

    #[inline]
    pub fn phase(&self) -> f64 {
        self.animator.phase()
    }

    pub fn units(&self) -> f64 {
        space::memory_units(self.class, self.n)
    }

    pub fn breakdown(&self) -> String {
        space::breakdown(self.class, self.mode, self.n, self.depth)
    }

    pub fn usage_line(&self) -> String {
        space::usage_line(self.class, self.n)
    }

    /// Formatted footprint for the memory stats panel.
    pub fn footprint(&self) -> String {
        space::format_bytes(space::footprint_bytes(self.units(), self.depth))
    }

    pub fn profile(&self) -> SpaceProfile {
        self.class.profile()
    }

    pub fn explanation(&self) -> SpaceExplanation {
        self.class.explanation()
    }

    pub fn scene(&self) -> Scene {
        space::space_scene(
            self.class,
            self.mode,
            self.n,
            self.depth,
            self.animator.phase(),
            self.canvas.width,
            self.canvas.height,
        )
    }

    pub fn curve(&self) -> Scene {
        space_curve(self.class, self.n, self.config.max_input, self.graph.width, self.graph.height)
    }
}
